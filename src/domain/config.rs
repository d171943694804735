//! Conversion configuration.
//!
//! Everything here has a default, so a missing or partial `ava2jest.toml`
//! still yields a complete configuration.

use crate::error::{ConvertError, ConvertResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file picked up from the working directory.
pub const CONFIG_FILE_NAME: &str = "ava2jest.toml";

/// Conventional identifiers the passes match against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conventions {
    /// Module specifier of the origin framework.
    pub origin_package: String,
    /// Variable used to register tests (`test(...)`, `test.before(...)`).
    pub test_ident: String,
    /// Parameter injected into test callbacks (`t.is(...)`).
    pub assertion_ident: String,
    /// Name of the synthesized type alias for the shared context.
    pub context_type_name: String,
    /// Name of the synthesized shared context variable.
    pub context_var_name: String,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            origin_package: "ava".to_string(),
            test_ident: "test".to_string(),
            assertion_ident: "t".to_string(),
            context_type_name: "Context".to_string(),
            context_var_name: "sharedContext".to_string(),
        }
    }
}

/// Printer style applied to the converted tree.
///
/// Long lines are never wrapped: the output keeps the code generator's
/// layout, so run a formatter such as Prettier afterwards if line width
/// matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintStyle {
    /// Print every string literal with single quotes.
    pub single_quote: bool,
    /// Keep statement-terminating semicolons.
    pub semicolons: bool,
}

impl Default for PrintStyle {
    fn default() -> Self {
        Self {
            single_quote: true,
            semicolons: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub conventions: Conventions,
    pub style: PrintStyle,
}

impl Config {
    /// Parse a TOML document. Unknown tables are ignored.
    pub fn from_toml(text: &str) -> ConvertResult<Self> {
        toml::from_str(text).map_err(|e| ConvertError::Config(e.to_string()))
    }

    /// Load configuration from an explicit file.
    pub fn load(path: &Path) -> ConvertResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConvertError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Load `ava2jest.toml` from `dir` when present, defaults otherwise.
    pub fn discover(dir: &Path) -> ConvertResult<Self> {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}
