//! Analyzer configuration
//!
//! ```rust,ignore
//! let config = AnalyzerConfig::preset(Preset::Full).build()?;
//! let config = AnalyzerConfig::builder().snippet_max_lines(5).build()?;
//! let config = AnalyzerConfig::from_yaml("analyzer.yaml")?;
//! ```

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;

/// Upper bound for `snippet_max_lines`
pub const MAX_SNIPPET_LINES: usize = 10_000;

const SUPPORTED_VERSIONS: [u32; 1] = [1];

/// Options of one analysis run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Attach documentation, snippets and complexity to graph nodes
    pub enrich_nodes: bool,
    /// Maximum snippet length in lines; 0 disables snippets
    pub snippet_max_lines: usize,
}

impl AnalyzerConfig {
    /// Start a builder from a preset
    pub fn preset(preset: Preset) -> AnalyzerConfigBuilder {
        let base = match preset {
            Preset::Minimal => Self {
                enrich_nodes: false,
                snippet_max_lines: 0,
            },
            Preset::Standard => Self {
                enrich_nodes: true,
                snippet_max_lines: 20,
            },
            Preset::Full => Self {
                enrich_nodes: true,
                snippet_max_lines: MAX_SNIPPET_LINES,
            },
        };
        AnalyzerConfigBuilder { config: base }
    }

    /// Builder over the default preset
    pub fn builder() -> AnalyzerConfigBuilder {
        Self::preset(Preset::default())
    }

    /// Range checks
    pub fn validate(&self) -> ConfigResult<()> {
        if self.snippet_max_lines > MAX_SNIPPET_LINES {
            return Err(ConfigError::range_with_hint(
                "snippet_max_lines",
                self.snippet_max_lines,
                0,
                MAX_SNIPPET_LINES,
                "Use 0 to disable snippets",
            ));
        }
        Ok(())
    }

    /// Load a YAML configuration file
    pub fn from_yaml(path: &str) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse a YAML configuration document
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: ConfigFileV1 = serde_yaml::from_str(content)?;

        let version = export.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let preset = Preset::from_str(&export.preset)
            .map_err(|_| ConfigError::UnknownPreset(export.preset.clone()))?;

        let mut builder = Self::preset(preset);
        if let Some(overrides) = export.overrides {
            if let Some(enrich) = overrides.enrich_nodes {
                builder = builder.enrich_nodes(enrich);
            }
            if let Some(lines) = overrides.snippet_max_lines {
                builder = builder.snippet_max_lines(lines);
            }
        }
        builder.build()
    }

    /// Serialize as a version 1 YAML document
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigFileV1 {
            version: Some(1),
            preset: Preset::Standard.as_str().to_string(),
            overrides: Some(ConfigOverrides {
                enrich_nodes: Some(self.enrich_nodes),
                snippet_max_lines: Some(self.snippet_max_lines),
            }),
        };
        Ok(serde_yaml::to_string(&export)?)
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self::preset(Preset::default()).config
    }
}

/// Builder with preset defaults and field overrides
#[derive(Debug, Clone)]
pub struct AnalyzerConfigBuilder {
    config: AnalyzerConfig,
}

impl AnalyzerConfigBuilder {
    pub fn enrich_nodes(mut self, enabled: bool) -> Self {
        self.config.enrich_nodes = enabled;
        self
    }

    pub fn snippet_max_lines(mut self, lines: usize) -> Self {
        self.config.snippet_max_lines = lines;
        self
    }

    /// Validate and return the configuration
    pub fn build(self) -> ConfigResult<AnalyzerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// YAML schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1)
    #[serde(default)]
    pub version: Option<u32>,

    /// Base preset
    pub preset: String,

    /// Field overrides applied on top of the preset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<ConfigOverrides>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrich_nodes: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet_max_lines: Option<usize>,
}
