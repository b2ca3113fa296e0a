//! Row synthesis: random streams, per-row descriptors, and point sampling.

pub(crate) mod profile;
pub(crate) mod row;
pub(crate) mod stream;
