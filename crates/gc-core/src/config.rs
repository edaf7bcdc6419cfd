//! Configuration system for glsl-cross

use crate::error::{CrossError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the synthesized fragment output that replaces `gl_FragColor`
pub const DEFAULT_OUTPUT_VARIABLE: &str = "GEN_OUTPUT_FINAL_COLOR";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Config {
    pub translate: TranslateConfig,
    pub debug: DebugConfig,
}

/// Translation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateConfig {
    pub target: TargetDialect,
    /// Identifier substituted for `gl_FragColor` in core-profile fragment shaders
    pub output_variable: String,
    pub output_placement: OutputPlacement,
    /// Emit the dialect preamble (version pragma and feature define)
    pub emit_header: bool,
}

/// Output dialect
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TargetDialect {
    /// GLSL 1.20
    Legacy,
    /// GLSL 3.30 core profile
    #[default]
    Core,
}

/// Where the fragment output declaration is written
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputPlacement {
    /// Directly before the `main` signature, falling back to the preamble
    /// when `gl_FragColor` is written ahead of `main`
    #[default]
    BeforeMain,
    /// Always in the preamble
    Preamble,
}

/// Debug settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    pub log_level: LogLevel,
}

/// Logging level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Directive string understood by `tracing_subscriber::EnvFilter`
    pub fn as_filter(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = CrossError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            other => Err(CrossError::Config(format!("unknown log level: {}", other))),
        }
    }
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            target: TargetDialect::default(),
            output_variable: DEFAULT_OUTPUT_VARIABLE.to_string(),
            output_placement: OutputPlacement::default(),
            emit_header: true,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default path, or defaults if it doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("glsl-cross")
            .join("config.toml")
    }

    /// Reject settings that would produce an invalid shader
    pub fn validate(&self) -> Result<()> {
        let name = &self.translate.output_variable;
        let mut chars = name.chars();
        let valid = match chars.next() {
            Some(first) => {
                (first.is_ascii_alphabetic() || first == '_')
                    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            None => false,
        };
        if !valid {
            return Err(CrossError::Config(format!(
                "output_variable `{}` is not a valid identifier",
                name
            )));
        }
        if name.starts_with("gl_") {
            return Err(CrossError::Config(format!(
                "output_variable `{}` uses the reserved gl_ prefix",
                name
            )));
        }
        Ok(())
    }
}
