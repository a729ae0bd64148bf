//! Configuration system for quill.

use serde::{Deserialize, Serialize};

use crate::error::{QuillError, QuillResult};

/// Default upload cap: 5 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
/// Default maximum topic length in characters.
pub const DEFAULT_MAX_TOPIC_CHARS: usize = 200;
/// Owner id used while the system is single-tenant.
pub const DEFAULT_OWNER_ID: u64 = 1;
/// Characters of raw text shown in sample previews.
pub const DEFAULT_PREVIEW_CHARS: usize = 200;

/// Limits applied by the outline synthesizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Maximum topic length in characters (after trimming).
    pub max_topic_chars: usize,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            max_topic_chars: DEFAULT_MAX_TOPIC_CHARS,
        }
    }
}

/// Main quill configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuillConfig {
    /// Largest accepted upload in bytes, checked before extraction.
    pub max_upload_bytes: usize,
    /// Synthesis limits.
    pub synthesis: SynthesisConfig,
    /// Owner assigned to records when the caller does not supply one.
    pub default_owner_id: u64,
    /// Length of sample previews returned after upload.
    pub preview_chars: usize,
}

impl Default for QuillConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            synthesis: SynthesisConfig::default(),
            default_owner_id: DEFAULT_OWNER_ID,
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }
}

impl QuillConfig {
    /// Load configuration from a file (TOML, JSON, or YAML).
    pub fn from_file(path: impl AsRef<std::path::Path>) -> QuillResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let ext = path.as_ref().extension().and_then(|e| e.to_str());

        match ext {
            Some("toml") => {
                toml::from_str(&content).map_err(|e| QuillError::Configuration(e.to_string()))
            }
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| QuillError::Configuration(e.to_string())),
            Some("yaml" | "yml") => serde_yaml::from_str(&content)
                .map_err(|e| QuillError::Configuration(e.to_string())),
            _ => Err(QuillError::Configuration(
                "Unsupported config file format. Use .toml, .json, or .yaml".to_string(),
            )),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Reads:
    /// - `QUILL_MAX_UPLOAD_BYTES` (default: 5 MiB)
    /// - `QUILL_MAX_TOPIC_CHARS` (default: 200)
    /// - `QUILL_DEFAULT_OWNER_ID` (default: 1)
    /// - `QUILL_PREVIEW_CHARS` (default: 200)
    ///
    /// Unparseable values keep the default.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(bytes) = env_parse("QUILL_MAX_UPLOAD_BYTES") {
            config.max_upload_bytes = bytes;
        }
        if let Some(chars) = env_parse("QUILL_MAX_TOPIC_CHARS") {
            config.synthesis.max_topic_chars = chars;
        }
        if let Some(owner) = env_parse("QUILL_DEFAULT_OWNER_ID") {
            config.default_owner_id = owner;
        }
        if let Some(chars) = env_parse("QUILL_PREVIEW_CHARS") {
            config.preview_chars = chars;
        }

        config
    }

    /// Check limits that would make the service unusable.
    pub fn validate(&self) -> QuillResult<()> {
        if self.max_upload_bytes == 0 {
            return Err(QuillError::Configuration(
                "max_upload_bytes must be greater than zero".to_string(),
            ));
        }
        if self.synthesis.max_topic_chars == 0 {
            return Err(QuillError::Configuration(
                "synthesis.max_topic_chars must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Build configuration using builder pattern.
    pub fn builder() -> QuillConfigBuilder {
        QuillConfigBuilder::default()
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Builder for QuillConfig.
#[derive(Default)]
pub struct QuillConfigBuilder {
    config: QuillConfig,
}

impl QuillConfigBuilder {
    /// Set the upload cap.
    pub fn max_upload_bytes(mut self, bytes: usize) -> Self {
        self.config.max_upload_bytes = bytes;
        self
    }

    /// Set the maximum topic length.
    pub fn max_topic_chars(mut self, chars: usize) -> Self {
        self.config.synthesis.max_topic_chars = chars;
        self
    }

    /// Set the default owner id.
    pub fn default_owner_id(mut self, owner_id: u64) -> Self {
        self.config.default_owner_id = owner_id;
        self
    }

    /// Set the preview length.
    pub fn preview_chars(mut self, chars: usize) -> Self {
        self.config.preview_chars = chars;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> QuillConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = QuillConfig::default();
        assert_eq!(config.max_upload_bytes, 5 * 1024 * 1024);
        assert_eq!(config.synthesis.max_topic_chars, 200);
        assert_eq!(config.default_owner_id, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_file_with_partial_fields() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "max_upload_bytes = 1024\n\n[synthesis]\nmax_topic_chars = 80").unwrap();

        let config = QuillConfig::from_file(file.path()).unwrap();
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(config.synthesis.max_topic_chars, 80);
        assert_eq!(config.preview_chars, DEFAULT_PREVIEW_CHARS);
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "default_owner_id: 9").unwrap();

        let config = QuillConfig::from_file(file.path()).unwrap();
        assert_eq!(config.default_owner_id, 9);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        let result = QuillConfig::from_file(file.path());
        assert!(matches!(result, Err(QuillError::Configuration(_))));
    }

    #[test]
    fn test_builder_and_validation() {
        let config = QuillConfig::builder().max_upload_bytes(0).build();
        assert!(config.validate().is_err());

        let config = QuillConfig::builder()
            .max_topic_chars(50)
            .preview_chars(10)
            .build();
        assert_eq!(config.synthesis.max_topic_chars, 50);
        assert_eq!(config.preview_chars, 10);
    }
}
