//! Core support crate for the glsl-cross shader translator
//!
//! This crate provides the error taxonomy, configuration,
//! and logging infrastructure shared by the translator and its CLI.

pub mod config;
pub mod error;
pub mod logging;

pub use config::Config;
pub use error::{CrossError, Result, TranslateError};
