//! Shader pipeline stages

use gc_core::CrossError;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Pipeline role of a shader; selects the direction of stage-dependent renames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Runs once per vertex
    Vertex,
    /// Runs once per pixel
    Fragment,
}

impl ShaderStage {
    /// Qualifier that replaces `varying`: outputs of the vertex stage, inputs
    /// of the fragment stage
    pub fn varying_qualifier(&self) -> &'static str {
        match self {
            Self::Vertex => "out",
            Self::Fragment => "in",
        }
    }

    /// Infer the stage from a conventional file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "vert" | "vs" | "vsh" => Some(Self::Vertex),
            "frag" | "fs" | "fsh" => Some(Self::Fragment),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShaderStage {
    type Err = CrossError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vertex" | "vert" | "vs" => Ok(Self::Vertex),
            "fragment" | "frag" | "fs" | "pixel" => Ok(Self::Fragment),
            _ => Err(CrossError::UnknownStage(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_varying_direction() {
        assert_eq!(ShaderStage::Vertex.varying_qualifier(), "out");
        assert_eq!(ShaderStage::Fragment.varying_qualifier(), "in");
    }

    #[test]
    fn test_from_path() {
        assert_eq!(ShaderStage::from_path(Path::new("a/b.vert")), Some(ShaderStage::Vertex));
        assert_eq!(ShaderStage::from_path(Path::new("x.FS")), Some(ShaderStage::Fragment));
        assert_eq!(ShaderStage::from_path(Path::new("x.glsl")), None);
        assert_eq!(ShaderStage::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Vertex".parse::<ShaderStage>().unwrap(), ShaderStage::Vertex);
        assert_eq!("frag".parse::<ShaderStage>().unwrap(), ShaderStage::Fragment);
        assert!("geometry".parse::<ShaderStage>().is_err());
    }
}
