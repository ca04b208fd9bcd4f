/// Convenience result type used across visbin.
pub type BinResult<T> = Result<T, BinError>;

/// Top-level error taxonomy used by the composition engine.
///
/// A depth outside the bin's supported mask is not represented here: `Bin::set_depth`
/// ignores such requests without failing.
#[derive(thiserror::Error, Debug)]
pub enum BinError {
    /// A required actor, input or surface was not bound when an operation needed it.
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// A surface the current state requires (main, private or pending) is absent.
    #[error("missing surface: {0}")]
    MissingSurface(String),

    /// Plugin lookup or initialization failed.
    #[error("plugin error: {0}")]
    Plugin(String),

    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// A branch that the engine's own bookkeeping should make unreachable was taken.
    #[error("internal consistency fault: {0}")]
    Consistency(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BinError {
    /// Build a [`BinError::Precondition`] value.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Build a [`BinError::MissingSurface`] value.
    pub fn missing_surface(msg: impl Into<String>) -> Self {
        Self::MissingSurface(msg.into())
    }

    /// Build a [`BinError::Plugin`] value.
    pub fn plugin(msg: impl Into<String>) -> Self {
        Self::Plugin(msg.into())
    }

    /// Build a [`BinError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BinError::Consistency`] value.
    pub fn consistency(msg: impl Into<String>) -> Self {
        Self::Consistency(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
