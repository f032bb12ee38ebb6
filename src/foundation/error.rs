/// Crate-wide result alias.
pub type ScenecastResult<T> = Result<T, ScenecastError>;

/// Errors raised while compiling, scheduling or building timelines.
#[derive(thiserror::Error, Debug)]
pub enum ScenecastError {
    /// A script line matched no grammar rule (or a `say` line appeared outside a block).
    #[error("syntax error on line {line_no}: \"{line}\"")]
    Syntax {
        /// 1-based line number in the script.
        line_no: usize,
        /// Literal text of the offending line.
        line: String,
    },

    /// A well-formed timeline that cannot be built (bad name, duplicate, bad field values).
    #[error("semantic error: {0}")]
    Semantic(String),

    /// External synthesis or encoding failed, or the encoder is unavailable.
    #[error("asset error: {0}")]
    Asset(String),

    /// Invalid arguments to a scheduling or conversion API.
    #[error("validation error: {0}")]
    Validation(String),

    /// JSON encode/decode failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, usually I/O with attached context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScenecastError {
    /// Build a [`ScenecastError::Syntax`] for `line` at 1-based `line_no`.
    pub fn syntax(line_no: usize, line: impl Into<String>) -> Self {
        Self::Syntax {
            line_no,
            line: line.into(),
        }
    }

    /// Build a [`ScenecastError::Semantic`].
    pub fn semantic(msg: impl Into<String>) -> Self {
        Self::Semantic(msg.into())
    }

    /// Build a [`ScenecastError::Asset`].
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`ScenecastError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScenecastError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
