use std::path::PathBuf;

/// Convenience result type used across ridgeplot.
pub type RidgeResult<T> = Result<T, RidgeError>;

/// Top-level error taxonomy used by generation and sink APIs.
#[derive(thiserror::Error, Debug)]
pub enum RidgeError {
    /// A configuration field violates its constraint. Raised before any sampling.
    #[error("invalid configuration: `{field}` {constraint}")]
    InvalidConfiguration {
        /// Dotted path of the offending field (e.g. `shape.peak_center`).
        field: String,
        /// Human-readable constraint that was violated.
        constraint: String,
    },

    /// A sink could not read or write its target.
    #[error("io error on '{}': {source}", path.display())]
    Io {
        /// Path that was being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RidgeError {
    /// Build a [`RidgeError::InvalidConfiguration`] value.
    pub fn invalid(field: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field: field.into(),
            constraint: constraint.into(),
        }
    }

    /// Build a [`RidgeError::Io`] value.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Build a [`RidgeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for configuration rejections.
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
