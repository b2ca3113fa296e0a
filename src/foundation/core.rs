use crate::foundation::error::{RidgeError, RidgeResult};

pub use kurbo::{BezPath, PathEl, Point, Rect};

/// Fill used for the background rectangle and every occlusion mask.
pub const BACKGROUND_FILL: &str = "white";

/// Ink used for every visible row stroke.
pub const INK_COLOR: &str = "black";

/// Drawing surface dimensions in SVG user units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in user units.
    pub width: f64,
    /// Height in user units.
    pub height: f64,
}

impl Canvas {
    /// Full-canvas rectangle anchored at the origin.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Closed interval `[min, max]` for uniform draws.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Band {
    /// Lower bound (inclusive).
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl Band {
    /// Create a band without validation.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Width of the band.
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// Map a unit sample `u` in `[0, 1)` into the band.
    pub fn lerp(self, u: f64) -> f64 {
        self.min + self.span() * u
    }

    /// Largest magnitude any value in the band can have.
    pub fn max_abs(self) -> f64 {
        self.min.abs().max(self.max.abs())
    }

    /// Return `true` when `v` lies inside `[min, max]`.
    pub fn contains(self, v: f64) -> bool {
        self.min <= v && v <= self.max
    }

    /// Validate that both bounds are finite and ordered.
    pub fn validate(self, field: &str) -> RidgeResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(RidgeError::invalid(field, "bounds must be finite"));
        }
        if self.min > self.max {
            return Err(RidgeError::invalid(field, "min must be <= max"));
        }
        if !self.span().is_finite() {
            return Err(RidgeError::invalid(field, "span must be finite"));
        }
        Ok(())
    }
}

/// Inclusive integer range `[min, max]` for count draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CountRange {
    /// Smallest count (inclusive).
    pub min: u32,
    /// Largest count (inclusive).
    pub max: u32,
}

impl CountRange {
    /// Create a range without validation.
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Validate that `min <= max`.
    pub fn validate(self, field: &str) -> RidgeResult<()> {
        if self.min > self.max {
            return Err(RidgeError::invalid(field, "min must be <= max"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
