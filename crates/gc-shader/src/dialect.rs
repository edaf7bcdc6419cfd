//! Output dialects and the rule sets they run
//!
//! Both dialects share one rewrite pass; a dialect only decides which rules
//! are enabled, the version string written into `#version`, and the
//! preamble placed ahead of the body.

use bitflags::bitflags;
use gc_core::config::TargetDialect;
use gc_core::CrossError;
use std::fmt;
use std::str::FromStr;

use crate::stage::ShaderStage;

bitflags! {
    /// Token-level rewrite rules
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Rules: u8 {
        /// `#version N` -> `#version <target version>`
        const VERSION_DIRECTIVE = 0x01;
        /// `attribute` -> `in` (vertex stage)
        const ATTRIBUTE_TO_IN = 0x02;
        /// `varying` -> `out` (vertex) / `in` (fragment)
        const VARYING_DIRECTION = 0x04;
        /// `gl_FragColor` -> declared output variable (fragment stage)
        const FRAG_COLOR_OUTPUT = 0x08;
        /// `texture2D(`, `textureCube(`, ... -> `texture(`
        const UNIFIED_TEXTURE = 0x10;
    }
}

/// Dialect a shader is translated into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DialectTarget {
    /// GLSL 1.20
    Legacy,
    /// GLSL 3.30 core profile
    #[default]
    Core,
}

impl DialectTarget {
    /// Replacement text for the version number of a `#version` directive
    pub fn version(&self) -> &'static str {
        match self {
            Self::Legacy => "120",
            Self::Core => "330 core",
        }
    }

    /// Macro defined in the preamble so shared code can test the dialect
    pub fn define(&self) -> &'static str {
        match self {
            Self::Legacy => "GL21",
            Self::Core => "GL33",
        }
    }

    pub fn rules(&self) -> Rules {
        match self {
            Self::Legacy => Rules::VERSION_DIRECTIVE | Rules::VARYING_DIRECTION,
            Self::Core => Rules::all(),
        }
    }

    /// Whether `gl_FragColor` must be replaced by an explicitly declared output
    pub fn declares_outputs(&self, stage: ShaderStage) -> bool {
        stage == ShaderStage::Fragment && self.rules().contains(Rules::FRAG_COLOR_OUTPUT)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Core => "core",
        }
    }
}

impl From<TargetDialect> for DialectTarget {
    fn from(target: TargetDialect) -> Self {
        match target {
            TargetDialect::Legacy => Self::Legacy,
            TargetDialect::Core => Self::Core,
        }
    }
}

impl fmt::Display for DialectTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DialectTarget {
    type Err = CrossError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "legacy" | "gl21" | "120" => Ok(Self::Legacy),
            "core" | "gl33" | "330" => Ok(Self::Core),
            other => Err(CrossError::Config(format!("unknown dialect: {}", other))),
        }
    }
}

/// Declaration of the synthesized fragment output
pub fn output_declaration(name: &str) -> String {
    format!("out vec4 {};\n\n", name)
}

/// Pieces of the preamble for one translation
#[derive(Debug, Clone, Default)]
pub struct Preamble {
    /// `#version` line, only when the source has no directive of its own
    pub version: Option<String>,
    /// `#define` line for the dialect macro
    pub define: Option<String>,
    /// Fragment output declaration
    pub output: Option<String>,
}

impl Preamble {
    /// Full header for `target`, before any knowledge of the source
    pub fn for_target(target: DialectTarget) -> Self {
        Self {
            version: Some(format!("#version {}\n", target.version())),
            define: Some(format!("#define {}\n\n", target.define())),
            output: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.version.is_none() && self.define.is_none() && self.output.is_none()
    }

    pub fn render(&self) -> String {
        let mut text = String::new();
        for part in [&self.version, &self.define, &self.output].into_iter().flatten() {
            text.push_str(part);
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_sets() {
        let legacy = DialectTarget::Legacy.rules();
        assert!(legacy.contains(Rules::VARYING_DIRECTION));
        assert!(legacy.contains(Rules::VERSION_DIRECTIVE));
        assert!(!legacy.contains(Rules::ATTRIBUTE_TO_IN));
        assert!(!legacy.contains(Rules::UNIFIED_TEXTURE));

        let core = DialectTarget::Core.rules();
        assert!(core.contains(Rules::VARYING_DIRECTION | Rules::FRAG_COLOR_OUTPUT));
    }

    #[test]
    fn test_declares_outputs() {
        assert!(DialectTarget::Core.declares_outputs(ShaderStage::Fragment));
        assert!(!DialectTarget::Core.declares_outputs(ShaderStage::Vertex));
        assert!(!DialectTarget::Legacy.declares_outputs(ShaderStage::Fragment));
    }

    #[test]
    fn test_headers() {
        assert_eq!(
            Preamble::for_target(DialectTarget::Legacy).render(),
            "#version 120\n#define GL21\n\n"
        );

        let mut preamble = Preamble::for_target(DialectTarget::Core);
        preamble.output = Some(output_declaration("GEN_OUTPUT_FINAL_COLOR"));
        assert_eq!(
            preamble.render(),
            "#version 330 core\n#define GL33\n\nout vec4 GEN_OUTPUT_FINAL_COLOR;\n\n"
        );
    }

    #[test]
    fn test_parse_and_convert() {
        assert_eq!("CORE".parse::<DialectTarget>().unwrap(), DialectTarget::Core);
        assert_eq!("gl21".parse::<DialectTarget>().unwrap(), DialectTarget::Legacy);
        assert!("es3".parse::<DialectTarget>().is_err());
        assert_eq!(DialectTarget::from(TargetDialect::Legacy), DialectTarget::Legacy);
    }
}
