use std::{f64::consts::TAU, fs::File, io::BufReader, path::Path};

use crate::{
    composite::occlusion::MASK_DEPTH_FACTOR,
    foundation::{
        core::{Band, Canvas, CountRange},
        error::{RidgeError, RidgeResult},
    },
    synth::profile::layered_bounds,
};

/// Sigma value at which drawn peak widths are used unscaled.
pub const REFERENCE_SIGMA: f64 = 100.0;

/// Bound on the magnitude of one standard normal draw from the ziggurat sampler.
const NOISE_Z_BOUND: f64 = 16.0;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Complete, immutable input to one generation run.
///
/// Partial JSON documents are accepted; missing fields take the values of
/// [`Configuration::default`], which is the reference 600x800 portrait drawing with seed 42.
pub struct Configuration {
    /// Canvas width in user units.
    pub width: f64,
    /// Canvas height in user units.
    pub height: f64,
    /// Number of stacked rows.
    pub row_count: u32,
    /// Vertical distance between consecutive row baselines.
    pub row_spacing: f64,
    /// Peak-width scale; drawn widths are multiplied by `sigma / 100`.
    pub sigma: f64,
    /// Largest amplitude a single peak can reach.
    pub max_amplitude: f64,
    /// Standard deviation of per-sample noise (classic style) or tertiary
    /// wave amplitude scale (layered style).
    pub noise_level: f64,
    /// Stroke width of every visible row.
    pub stroke_width: f64,
    /// Seed for the random stream. `None` draws one from OS entropy.
    pub seed: Option<u64>,
    /// Distribution bands for peaks and classic waves.
    pub shape: ShapeParams,
    /// Which waveform recipe rows are built from.
    pub waves: WaveStyle,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 800.0,
            row_count: 80,
            row_spacing: 6.0,
            sigma: REFERENCE_SIGMA,
            max_amplitude: 40.0,
            noise_level: 0.5,
            stroke_width: 1.5,
            seed: Some(42),
            shape: ShapeParams::default(),
            waves: WaveStyle::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Distribution bands used by the per-row draw protocol.
pub struct ShapeParams {
    /// Inclusive range for the number of peaks per row.
    pub peak_count: CountRange,
    /// Normalized horizontal band peak centers are drawn from.
    pub peak_center: Band,
    /// Normalized peak widths, before the sigma scale is applied.
    pub peak_width: Band,
    /// Peak amplitude as a fraction of `max_amplitude`.
    pub peak_amplitude: Band,
    /// Number of full-width waves per row (classic style).
    pub wave_count: u32,
    /// Wave frequency in cycles across the full width (classic style).
    pub wave_frequency: Band,
    /// Wave amplitude in user units (classic style).
    pub wave_amplitude: Band,
}

impl Default for ShapeParams {
    fn default() -> Self {
        Self {
            peak_count: CountRange::new(4, 9),
            peak_center: Band::new(0.3, 0.7),
            peak_width: Band::new(0.01, 0.05),
            peak_amplitude: Band::new(0.3, 1.0),
            wave_count: 3,
            wave_frequency: Band::new(1.0, 4.0),
            wave_amplitude: Band::new(0.5, 2.0),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Waveform recipe for each row.
pub enum WaveStyle {
    /// A few broad full-width waves plus Gaussian per-sample noise.
    #[default]
    Classic,
    /// Three harmonic wave layers and no per-sample noise.
    Layered {
        /// Frequency the primary and secondary layers are scaled from.
        base_frequency: f64,
    },
}

impl Configuration {
    /// Return a copy with `seed` replaced.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Canvas dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Baseline of row 0; rows are centered vertically on the canvas.
    pub fn start_y(&self) -> f64 {
        let total_height = f64::from(self.row_count) * self.row_spacing;
        (self.height - total_height) / 2.0
    }

    /// Baseline of row `index`.
    pub fn baseline(&self, index: u32) -> f64 {
        self.start_y() + f64::from(index) * self.row_spacing
    }

    /// `true` when the row stack is taller than the canvas.
    pub fn overflows_canvas(&self) -> bool {
        f64::from(self.row_count) * self.row_spacing > self.height
    }

    /// Peak widths are multiplied by this factor after drawing.
    pub fn peak_width_scale(&self) -> f64 {
        self.sigma / REFERENCE_SIGMA
    }

    /// Validate every field. Generation calls this before sampling anything.
    pub fn validate(&self) -> RidgeResult<()> {
        for (field, value) in [
            ("width", self.width),
            ("height", self.height),
            ("row_spacing", self.row_spacing),
            ("sigma", self.sigma),
            ("max_amplitude", self.max_amplitude),
            ("stroke_width", self.stroke_width),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(RidgeError::invalid(field, "must be finite and > 0"));
            }
        }
        if self.row_count == 0 {
            return Err(RidgeError::invalid("row_count", "must be > 0"));
        }
        if !self.noise_level.is_finite() || self.noise_level < 0.0 {
            return Err(RidgeError::invalid("noise_level", "must be finite and >= 0"));
        }
        self.shape.validate()?;
        if let WaveStyle::Layered { base_frequency } = self.waves
            && (!base_frequency.is_finite() || base_frequency <= 0.0)
        {
            return Err(RidgeError::invalid(
                "waves.base_frequency",
                "must be finite and > 0",
            ));
        }
        self.validate_extent()
    }

    /// Reject configurations whose sampled coordinates could overflow to a non-finite value.
    fn validate_extent(&self) -> RidgeResult<()> {
        let shape = &self.shape;

        let peaks = self.max_amplitude
            * shape.peak_amplitude.max_abs()
            * f64::from(shape.peak_count.max);
        if !peaks.is_finite() {
            return Err(RidgeError::invalid(
                "max_amplitude",
                "is too large: summed peaks overflow",
            ));
        }

        let narrowest = shape.peak_width.min * self.peak_width_scale();
        if 2.0 * narrowest * narrowest <= 0.0 {
            let field = if 2.0 * shape.peak_width.min * shape.peak_width.min <= 0.0 {
                "shape.peak_width"
            } else {
                "sigma"
            };
            return Err(RidgeError::invalid(field, "makes peak widths underflow to zero"));
        }

        let (waves, amplitude_field, frequency, frequency_field) = match self.waves {
            WaveStyle::Classic => (
                f64::from(shape.wave_count) * shape.wave_amplitude.max_abs(),
                "shape.wave_amplitude",
                shape.wave_frequency.max_abs(),
                "shape.wave_frequency",
            ),
            WaveStyle::Layered { base_frequency } => {
                let (amplitude, frequency) = layered_bounds(base_frequency, self.noise_level);
                (amplitude, "noise_level", frequency, "waves.base_frequency")
            }
        };
        if !waves.is_finite() {
            return Err(RidgeError::invalid(
                amplitude_field,
                "is too large: summed waves overflow",
            ));
        }
        if !(TAU * frequency + TAU).is_finite() {
            return Err(RidgeError::invalid(
                frequency_field,
                "is too large: wave phase overflows",
            ));
        }

        let noise = match self.waves {
            WaveStyle::Classic => self.noise_level * NOISE_Z_BOUND,
            WaveStyle::Layered { .. } => 0.0,
        };
        if !noise.is_finite() {
            return Err(RidgeError::invalid("noise_level", "is too large: noise overflows"));
        }

        let top = self.start_y();
        let floor = self.baseline(self.row_count - 1) + self.row_spacing * MASK_DEPTH_FACTOR;
        if !top.is_finite() || !floor.is_finite() {
            return Err(RidgeError::invalid(
                "row_spacing",
                "is too large: row baselines overflow",
            ));
        }

        let reach = peaks + waves + noise;
        if !(top - reach).is_finite() || !(floor + reach).is_finite() {
            return Err(RidgeError::invalid(
                "max_amplitude",
                "is too large: row offsets overflow the canvas coordinates",
            ));
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON configuration.
    pub fn from_json_str(s: &str) -> RidgeResult<Self> {
        serde_json::from_str(s).map_err(|e| RidgeError::serde(format!("parse configuration: {e}")))
    }

    /// Parse a JSON configuration from a reader.
    pub fn from_reader(r: impl std::io::Read) -> RidgeResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| RidgeError::serde(format!("parse configuration: {e}")))
    }

    /// Open and parse a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> RidgeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| RidgeError::io(path, e))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Pretty JSON rendering of this configuration.
    pub fn to_json_pretty(&self) -> RidgeResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| RidgeError::serde(e.to_string()))
    }
}

impl ShapeParams {
    /// Validate band ordering and domain constraints.
    pub fn validate(&self) -> RidgeResult<()> {
        self.peak_count.validate("shape.peak_count")?;
        self.peak_center.validate("shape.peak_center")?;
        if self.peak_center.min < 0.0 || self.peak_center.max > 1.0 {
            return Err(RidgeError::invalid(
                "shape.peak_center",
                "must lie within [0, 1]",
            ));
        }
        self.peak_width.validate("shape.peak_width")?;
        if self.peak_width.min <= 0.0 {
            return Err(RidgeError::invalid("shape.peak_width", "min must be > 0"));
        }
        self.peak_amplitude.validate("shape.peak_amplitude")?;
        if self.wave_count == 0 {
            return Err(RidgeError::invalid("shape.wave_count", "must be > 0"));
        }
        self.wave_frequency.validate("shape.wave_frequency")?;
        self.wave_amplitude.validate("shape.wave_amplitude")?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
