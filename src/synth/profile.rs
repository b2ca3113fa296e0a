//! Per-row waveform descriptors and the draw protocol that produces them.
//!
//! The order of random draws is part of the output format: changing it changes every
//! document generated from a given seed. For one row, draws happen in this order:
//!
//! 1. peak count (inclusive integer range);
//! 2. per peak: center, width, amplitude;
//! 3. classic style, per wave: frequency, phase, amplitude;
//!    layered style, per layer (primary, secondary, tertiary): wave count, then per wave
//!    frequency, phase, amplitude;
//! 4. classic style only: one Gaussian noise draw per sample, in sample order
//!    (consumed by [`crate::synth::row::RowSynthesizer`]).

use std::f64::consts::TAU;

use rand::Rng;

use crate::{
    config::model::{Configuration, WaveStyle},
    foundation::core::{Band, CountRange},
    foundation::math::{gaussian, sine},
    synth::stream::unit,
};

const PHASE: Band = Band::new(0.0, TAU);

const PRIMARY_COUNT: CountRange = CountRange::new(2, 3);
const PRIMARY_FREQ_FACTOR: Band = Band::new(0.7, 1.3);
const PRIMARY_AMP: Band = Band::new(0.5, 2.0);

const SECONDARY_COUNT: CountRange = CountRange::new(2, 3);
const SECONDARY_FREQ_FACTOR: Band = Band::new(3.0, 6.0);
const SECONDARY_AMP: Band = Band::new(0.3, 0.8);

const TERTIARY_COUNT: CountRange = CountRange::new(3, 5);
const TERTIARY_FREQ: Band = Band::new(15.0, 30.0);
const TERTIARY_AMP_FACTOR: Band = Band::new(0.1, 0.3);

/// Largest summed wave amplitude and largest frequency the layered style can draw.
pub(crate) fn layered_bounds(base_frequency: f64, noise_level: f64) -> (f64, f64) {
    let amplitude = f64::from(PRIMARY_COUNT.max) * PRIMARY_AMP.max_abs()
        + f64::from(SECONDARY_COUNT.max) * SECONDARY_AMP.max_abs()
        + f64::from(TERTIARY_COUNT.max) * TERTIARY_AMP_FACTOR.max_abs() * noise_level;
    let frequency = (base_frequency * PRIMARY_FREQ_FACTOR.max)
        .max(base_frequency * SECONDARY_FREQ_FACTOR.max)
        .max(TERTIARY_FREQ.max);
    (amplitude, frequency)
}

/// A localized Gaussian bump in normalized x.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Peak {
    /// Center in `[0, 1]`.
    pub center: f64,
    /// Standard deviation in normalized x.
    pub width: f64,
    /// Height in user units.
    pub amplitude: f64,
}

impl Peak {
    /// Contribution at normalized `x`.
    pub fn offset(&self, x: f64) -> f64 {
        gaussian(x, self.center, self.width, self.amplitude)
    }
}

/// A full-width sinusoid in normalized x.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wave {
    /// Cycles across the full width.
    pub frequency: f64,
    /// Phase in radians.
    pub phase: f64,
    /// Amplitude in user units.
    pub amplitude: f64,
}

impl Wave {
    /// Contribution at normalized `x`.
    pub fn offset(&self, x: f64) -> f64 {
        sine(x, self.frequency, self.phase, self.amplitude)
    }
}

/// Everything drawn for one row before sampling.
#[derive(Clone, Debug, PartialEq)]
pub struct RowProfile {
    /// Peaks, in draw order.
    pub peaks: Vec<Peak>,
    /// Waves, in draw order (all layers concatenated for the layered style).
    pub waves: Vec<Wave>,
}

impl RowProfile {
    /// Draw a row profile from `rng` following the module-level protocol.
    pub fn draw<R: Rng + ?Sized>(config: &Configuration, rng: &mut R) -> Self {
        let shape = &config.shape;
        let width_scale = config.peak_width_scale();

        let peak_count = draw_count(rng, shape.peak_count);
        let peaks = (0..peak_count)
            .map(|_| {
                let center = shape.peak_center.lerp(unit(rng));
                let width = shape.peak_width.lerp(unit(rng)) * width_scale;
                let amplitude = shape.peak_amplitude.lerp(unit(rng)) * config.max_amplitude;
                Peak {
                    center,
                    width,
                    amplitude,
                }
            })
            .collect();

        let waves = match config.waves {
            WaveStyle::Classic => (0..shape.wave_count)
                .map(|_| draw_wave(rng, shape.wave_frequency, 1.0, shape.wave_amplitude, 1.0))
                .collect(),
            WaveStyle::Layered { base_frequency } => {
                let mut waves = Vec::new();
                draw_layer(
                    rng,
                    &mut waves,
                    PRIMARY_COUNT,
                    PRIMARY_FREQ_FACTOR,
                    base_frequency,
                    PRIMARY_AMP,
                    1.0,
                );
                draw_layer(
                    rng,
                    &mut waves,
                    SECONDARY_COUNT,
                    SECONDARY_FREQ_FACTOR,
                    base_frequency,
                    SECONDARY_AMP,
                    1.0,
                );
                draw_layer(
                    rng,
                    &mut waves,
                    TERTIARY_COUNT,
                    TERTIARY_FREQ,
                    1.0,
                    TERTIARY_AMP_FACTOR,
                    config.noise_level,
                );
                waves
            }
        };

        Self { peaks, waves }
    }

    /// Deterministic part of the row offset at normalized `x` (waves, then peaks).
    pub fn offset(&self, x: f64) -> f64 {
        let mut offset = 0.0;
        for w in &self.waves {
            offset += w.offset(x);
        }
        for p in &self.peaks {
            offset += p.offset(x);
        }
        offset
    }
}

fn draw_count<R: Rng + ?Sized>(rng: &mut R, range: CountRange) -> u32 {
    rng.random_range(range.min..=range.max)
}

fn draw_wave<R: Rng + ?Sized>(
    rng: &mut R,
    freq: Band,
    freq_scale: f64,
    amp: Band,
    amp_scale: f64,
) -> Wave {
    let frequency = freq.lerp(unit(rng)) * freq_scale;
    let phase = PHASE.lerp(unit(rng));
    let amplitude = amp.lerp(unit(rng)) * amp_scale;
    Wave {
        frequency,
        phase,
        amplitude,
    }
}

fn draw_layer<R: Rng + ?Sized>(
    rng: &mut R,
    out: &mut Vec<Wave>,
    count: CountRange,
    freq: Band,
    freq_scale: f64,
    amp: Band,
    amp_scale: f64,
) {
    let n = draw_count(rng, count);
    out.extend((0..n).map(|_| draw_wave(rng, freq, freq_scale, amp, amp_scale)));
}

#[cfg(test)]
#[path = "../../tests/unit/synth/profile.rs"]
mod tests;
