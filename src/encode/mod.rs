//! Document sinks.
//!
//! Sinks receive serialized markup plus a label and timestamp and decide where it lives.

pub(crate) mod sink;
