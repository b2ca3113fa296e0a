//! Assembled drawings and their SVG serialization.

pub(crate) mod model;
pub(crate) mod svg;
