use thiserror::Error;

/// Errors raised at the engine's validated entry points.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// `tick` was called with a step that is zero, negative or not finite.
    #[error("invalid tick step: {0} (must be finite and > 0)")]
    InvalidStep(f64),

    /// A constructor override was NaN or infinite.
    #[error("invalid initial value for {field}: {value}")]
    InvalidOverride { field: &'static str, value: f64 },

    /// An action tag that is not one of the known actions.
    #[error("unknown action: {0:?}")]
    UnknownAction(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
