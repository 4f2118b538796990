//! Conversion settings
//!
//! All knobs of a conversion live in one [`ConvertConfig`] value that is handed
//! to the graph builder and the edge emitter. The same structure is read from
//! YAML config files; every field is optional there and falls back to the
//! defaults below.

use crate::error::{ConvertError, ConvertResult};
use crate::graph::RelationKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Weight emitted for each relationship kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub exact_match: f64,
    pub related: f64,
    pub broader: f64,
    pub narrower: f64,
    pub member: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            exact_match: 1.0,
            related: 0.5,
            broader: 2.0,
            narrower: 2.0,
            member: 2.0,
        }
    }
}

impl Weights {
    /// Weight configured for a relationship kind
    pub fn weight(&self, kind: RelationKind) -> f64 {
        match kind {
            RelationKind::ExactMatch => self.exact_match,
            RelationKind::Related => self.related,
            RelationKind::Broader => self.broader,
            RelationKind::Narrower => self.narrower,
        }
    }

    fn validate(&self) -> ConvertResult<()> {
        let named = [
            ("exact_match", self.exact_match),
            ("related", self.related),
            ("broader", self.broader),
            ("narrower", self.narrower),
            ("member", self.member),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(ConvertError::Config(format!(
                    "{} weight must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Row terminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineEnding {
    #[default]
    #[serde(rename = "n")]
    Lf,
    #[serde(rename = "r")]
    Cr,
    #[serde(rename = "rn")]
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Cr => "\r",
            LineEnding::CrLf => "\r\n",
        }
    }
}

impl FromStr for LineEnding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "n" => Ok(LineEnding::Lf),
            "r" => Ok(LineEnding::Cr),
            "rn" => Ok(LineEnding::CrLf),
            other => Err(format!("expected one of n, r, rn; got '{}'", other)),
        }
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LineEnding::Lf => "n",
            LineEnding::Cr => "r",
            LineEnding::CrLf => "rn",
        };
        write!(f, "{}", name)
    }
}

/// How rows are laid out and how identifiers are shortened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputFormat {
    /// Field separator; written verbatim, never escaped inside labels
    pub delimiter: String,
    pub line_ending: LineEnding,
    /// Emit identifiers under the base namespace unshortened
    pub output_full_about_ns: bool,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self {
            delimiter: ";".to_string(),
            line_ending: LineEnding::Lf,
            output_full_about_ns: false,
        }
    }
}

/// Character encodings for input and output, as WHATWG labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingConfig {
    /// `None` means detect from BOM or XML declaration
    pub input: Option<String>,
    pub output: String,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            input: None,
            output: "utf-8".to_string(),
        }
    }
}

/// Complete configuration for one conversion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    pub weights: Weights,
    pub format: OutputFormat,
    pub encoding: EncodingConfig,
}

impl ConvertConfig {
    /// Parse a YAML config document
    pub fn from_yaml_str(yaml: &str) -> ConvertResult<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load a YAML config file
    pub fn load(path: &Path) -> ConvertResult<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Reject settings that cannot produce meaningful rows
    pub fn validate(&self) -> ConvertResult<()> {
        self.weights.validate()?;
        if self.format.delimiter.is_empty() {
            return Err(ConvertError::Config("delimiter must not be empty".into()));
        }
        Ok(())
    }
}
