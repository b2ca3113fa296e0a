//! Generation inputs: the [`model::Configuration`] value and named canvas presets.

pub(crate) mod model;
pub(crate) mod presets;
