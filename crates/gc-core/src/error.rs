//! Error types for the glsl-cross translator

use thiserror::Error;

/// Main error type for glsl-cross
#[derive(Error, Debug)]
pub enum CrossError {
    #[error("Translation error: {0}")]
    Translate(#[from] TranslateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Cannot infer shader stage for {0}")]
    UnknownStage(String),

    #[error("Worker thread panicked while translating {0}")]
    WorkerPanicked(&'static str),
}

/// Errors detected while rewriting a single shader stage.
///
/// Any of these aborts the translation of that stage; no partially
/// rewritten source is ever returned alongside them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    #[error("line {line}: #version needs whitespace between the keyword and the number")]
    MalformedDirective { line: usize },

    #[error("line {line}: #version directive ends before a version number")]
    TruncatedDirective { line: usize },

    #[error("line {line}: unsupported construct `{construct}`")]
    UnsupportedConstruct { construct: String, line: usize },
}

impl TranslateError {
    /// Source line (1-based) the error was detected on
    pub fn line(&self) -> usize {
        match self {
            Self::MalformedDirective { line }
            | Self::TruncatedDirective { line }
            | Self::UnsupportedConstruct { line, .. } => *line,
        }
    }
}

impl From<toml::de::Error> for CrossError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for CrossError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for glsl-cross operations
pub type Result<T> = std::result::Result<T, CrossError>;
