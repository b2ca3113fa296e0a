use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::{
    config::model::{Configuration, WaveStyle},
    foundation::core::Point,
    foundation::error::{RidgeError, RidgeResult},
    synth::profile::RowProfile,
};

/// Samples per row, evenly spaced from `x = 0` to `x = width`.
pub const NUM_POINTS: usize = 400;

/// One sampled row of the drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    /// 0-based row index, top row first.
    pub index: u32,
    /// Vertical position the row is perturbed around.
    pub baseline: f64,
    /// Exactly [`NUM_POINTS`] points with strictly increasing x.
    pub points: Vec<Point>,
}

/// Builds rows for one validated configuration.
#[derive(Debug)]
pub struct RowSynthesizer<'a> {
    config: &'a Configuration,
    noise: Option<Normal<f64>>,
}

impl<'a> RowSynthesizer<'a> {
    /// Validate `config` and prepare the noise distribution.
    pub fn new(config: &'a Configuration) -> RidgeResult<Self> {
        config.validate()?;
        let noise = match config.waves {
            WaveStyle::Classic => Some(
                Normal::new(0.0, config.noise_level)
                    .map_err(|e| RidgeError::invalid("noise_level", e.to_string()))?,
            ),
            WaveStyle::Layered { .. } => None,
        };
        Ok(Self { config, noise })
    }

    /// Synthesize row `index`, consuming draws from `rng` in protocol order.
    pub fn synthesize<R: Rng + ?Sized>(&self, index: u32, rng: &mut R) -> Row {
        let profile = RowProfile::draw(self.config, rng);
        self.sample(index, &profile, rng)
    }

    /// Sample an already drawn profile. Classic rows consume one noise draw per point.
    pub fn sample<R: Rng + ?Sized>(&self, index: u32, profile: &RowProfile, rng: &mut R) -> Row {
        let width = self.config.width;
        let baseline = self.config.baseline(index);
        let last = (NUM_POINTS - 1) as f64;

        let points = (0..NUM_POINTS)
            .map(|i| {
                let x = (i as f64 / last) * width;
                let x_norm = x / width;
                let mut offset = profile.offset(x_norm);
                if let Some(noise) = &self.noise {
                    offset += noise.sample(rng);
                }
                Point::new(x, baseline - offset)
            })
            .collect();

        Row {
            index,
            baseline,
            points,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/synth/row.rs"]
mod tests;
