//! Error types shared by every stage of the pipeline.

#[derive(Debug, thiserror::Error)]
pub enum FractalError {
    /// Rule keys must be non-empty runs of ASCII uppercase letters.
    #[error("invalid rule key {0:?}: keys must be uppercase letters")]
    InvalidRuleKey(String),

    #[error("invalid generation index {0}: must not be negative")]
    InvalidIndex(i64),

    /// The wrapped producer ended before the requested index was reached.
    #[error("sequence exhausted: requested index {requested}, only {available} available")]
    Exhausted { requested: usize, available: usize },

    /// `]` was reached with nothing left to restore.
    #[error("unbalanced restore at symbol offset {offset}: state stack is empty")]
    UnbalancedState { offset: usize },

    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// A preset parsed but carries values that cannot be drawn.
    #[error("invalid preset {name}: {reason}")]
    InvalidPreset { name: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for FractalError {
    fn from(e: serde_json::Error) -> Self {
        FractalError::Serialization(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FractalError>;
