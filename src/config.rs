//! YAML configuration file support.
//!
//! Loads the settings for every cohorting stage (text SimHash, vectorizer,
//! projection SimHash) from a single versioned YAML file.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "newsroom cohorts"
//!
//! text:
//!   n_bits: 64
//!   bits_to_keep: 16
//!   use_parallel: false
//!   tokenizer:
//!     kind: space
//!
//! vectorizer:
//!   binary: true
//!   lowercase: true
//!   tokenizer:
//!     kind: normalizing
//!     lowercase: true
//!
//! projection:
//!   n_bits: 16
//!   seed: 42
//!   use_parallel: true
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{BuiltinTokenizer, ProjectionConfig, TextSimHashConfig, VectorizerConfig};

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct CohortConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    /// Token-majority SimHash settings
    #[serde(default)]
    pub text: TextYamlConfig,

    /// Term vectorizer settings
    #[serde(default)]
    pub vectorizer: VectorizerYamlConfig,

    /// Random-projection SimHash settings
    #[serde(default)]
    pub projection: ProjectionYamlConfig,
}

impl CohortConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: CohortConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize back to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.text.validate()?;
        self.projection.validate()?;
        Ok(())
    }
}

impl Default for CohortConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            text: TextYamlConfig::default(),
            vectorizer: VectorizerYamlConfig::default(),
            projection: ProjectionYamlConfig::default(),
        }
    }
}

/// Text SimHash YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextYamlConfig {
    #[serde(default = "default_text_bits")]
    pub n_bits: u32,

    #[serde(default)]
    pub bits_to_keep: Option<u32>,

    #[serde(default)]
    pub use_parallel: bool,

    #[serde(default)]
    pub tokenizer: BuiltinTokenizer,
}

impl TextYamlConfig {
    pub fn to_text_config(&self) -> TextSimHashConfig {
        TextSimHashConfig {
            n_bits: self.n_bits,
            bits_to_keep: self.bits_to_keep,
            use_parallel: self.use_parallel,
        }
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        self.to_text_config()
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("text: {err}")))
    }
}

impl Default for TextYamlConfig {
    fn default() -> Self {
        Self {
            n_bits: default_text_bits(),
            bits_to_keep: None,
            use_parallel: false,
            tokenizer: BuiltinTokenizer::Space,
        }
    }
}

/// Vectorizer YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VectorizerYamlConfig {
    #[serde(default = "true_value")]
    pub binary: bool,

    #[serde(default = "true_value")]
    pub lowercase: bool,

    #[serde(default = "default_vectorizer_tokenizer")]
    pub tokenizer: BuiltinTokenizer,
}

impl VectorizerYamlConfig {
    pub fn to_vectorizer_config(&self) -> VectorizerConfig {
        VectorizerConfig {
            binary: self.binary,
            lowercase: self.lowercase,
        }
    }
}

impl Default for VectorizerYamlConfig {
    fn default() -> Self {
        Self {
            binary: true,
            lowercase: true,
            tokenizer: default_vectorizer_tokenizer(),
        }
    }
}

/// Projection SimHash YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectionYamlConfig {
    #[serde(default = "default_projection_bits")]
    pub n_bits: u32,

    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub use_parallel: bool,
}

impl ProjectionYamlConfig {
    pub fn to_projection_config(&self) -> ProjectionConfig {
        ProjectionConfig {
            n_bits: self.n_bits,
            seed: self.seed,
            use_parallel: self.use_parallel,
        }
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        self.to_projection_config()
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("projection: {err}")))
    }
}

impl Default for ProjectionYamlConfig {
    fn default() -> Self {
        Self {
            n_bits: default_projection_bits(),
            seed: None,
            use_parallel: false,
        }
    }
}

fn default_text_bits() -> u32 {
    64
}
fn default_projection_bits() -> u32 {
    16
}
fn default_vectorizer_tokenizer() -> BuiltinTokenizer {
    BuiltinTokenizer::Whitespace
}
fn true_value() -> bool {
    true
}
