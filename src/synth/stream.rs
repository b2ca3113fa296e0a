//! Random streams for a generation run.
//!
//! A run owns exactly one seed. In [`StreamMode::Shared`] a single ChaCha8 stream is consumed
//! across all rows in index order. In [`StreamMode::PerRow`] each row gets its own ChaCha8
//! stream (same key, stream id = row index), so rows can be synthesized in any order or in
//! parallel without changing the output.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// How random draws are distributed over rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamMode {
    /// One stream consumed row after row. Reference behaviour.
    #[default]
    Shared,
    /// One independent substream per row index.
    PerRow,
}

/// Return `seed`, or draw a fresh one from OS entropy when absent.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| rand::rng().random())
}

/// The shared stream for a run.
pub fn run_stream(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// The dedicated substream of row `index`.
pub fn row_substream(seed: u64, index: u32) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(u64::from(index));
    rng
}

/// One uniform draw in `[0, 1)`.
pub(crate) fn unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.random::<f64>()
}

#[cfg(test)]
#[path = "../../tests/unit/synth/stream.rs"]
mod tests;
