use crate::render::pass::PassId;

/// Convenience result type used across Kanvas.
pub type KanvasResult<T> = Result<T, KanvasError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum KanvasError {
    /// Invalid caller-provided arguments (rejected at the call that supplied them).
    #[error("validation error: {0}")]
    Validation(String),

    /// Scene configuration the engine cannot lay out or draw, e.g. a layout member
    /// without a bounding box.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A pass handle that does not belong to the scene (or was removed).
    #[error("unknown render pass {0:?}")]
    UnknownPass(PassId),

    /// Offscreen raster creation or readback failed.
    #[error("raster error: {0}")]
    Raster(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KanvasError {
    /// Build a [`KanvasError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`KanvasError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`KanvasError::Raster`] value.
    pub fn raster(msg: impl Into<String>) -> Self {
        Self::Raster(msg.into())
    }

    /// Build a [`KanvasError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
