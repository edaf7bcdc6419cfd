//! GLSL dialect translation
//!
//! Rewrites shader source between the legacy GLSL 1.20 dialect and the
//! GLSL 3.30 core profile by renaming a fixed set of keywords, built-in
//! variables and texture calls over a format-preserving token stream.
//! Everything the rules do not recognize is copied through verbatim.

pub mod assemble;
pub mod dialect;
pub mod directive;
pub mod program;
pub mod stage;
pub mod token;
pub mod translator;

pub use dialect::{DialectTarget, Rules};
pub use program::ProgramOutput;
pub use stage::ShaderStage;
pub use token::{tokenize, Token, TokenSequence};
pub use translator::{translate, TranslateOptions, Translator};
