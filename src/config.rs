use crate::fs::{FileSystem, default_fs};
use secrecy::SecretString;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = ".svcgraph.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub thresholds: Thresholds,
    pub layout: LayoutConfig,
    pub insights: InsightsConfig,
}

/// Hotspot factors are multiples of the average degree; comparisons are strict.
#[derive(Debug, Clone, PartialEq)]
pub struct Thresholds {
    pub hotspot_medium_factor: f64,
    pub hotspot_high_factor: f64,
    pub max_cycles: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub radius: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone)]
pub struct InsightsConfig {
    pub api_base: String,
    pub model: String,
    pub timeout_secs: u64,
    pub api_key: Option<SecretString>,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    thresholds: Option<RawThresholds>,
    layout: Option<RawLayout>,
    insights: Option<RawInsights>,
}

#[derive(Debug, Deserialize)]
struct RawThresholds {
    hotspot_medium_factor: Option<f64>,
    hotspot_high_factor: Option<f64>,
    max_cycles: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawLayout {
    radius: Option<f64>,
    center_x: Option<f64>,
    center_y: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawInsights {
    api_base: Option<String>,
    model: Option<String>,
    timeout_secs: Option<u64>,
    api_key: Option<String>,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            hotspot_medium_factor: 2.0,
            hotspot_high_factor: 3.0,
            max_cycles: 5,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            radius: 200.0,
            center_x: 400.0,
            center_y: 300.0,
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 60,
            api_key: None,
        }
    }
}

impl Config {
    pub fn load(project_path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_fs(project_path, default_fs())
    }

    /// Read `.svcgraph.toml` from `project_path`; a missing file means defaults.
    pub fn load_with_fs(project_path: &Path, fs: &dyn FileSystem) -> Result<Self, ConfigError> {
        let config_path = project_path.join(CONFIG_FILE_NAME);

        if !fs.exists(&config_path) {
            return Ok(Self::default());
        }

        let content = fs.read_to_string(&config_path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;

        let thresholds = match raw.thresholds {
            Some(t) => {
                let defaults = Thresholds::default();
                Thresholds {
                    hotspot_medium_factor: t
                        .hotspot_medium_factor
                        .unwrap_or(defaults.hotspot_medium_factor),
                    hotspot_high_factor: t
                        .hotspot_high_factor
                        .unwrap_or(defaults.hotspot_high_factor),
                    max_cycles: t.max_cycles.unwrap_or(defaults.max_cycles),
                }
            }
            None => Thresholds::default(),
        };

        if thresholds.hotspot_high_factor < thresholds.hotspot_medium_factor {
            return Err(ConfigError::Invalid(format!(
                "hotspot_high_factor ({}) must not be below hotspot_medium_factor ({})",
                thresholds.hotspot_high_factor, thresholds.hotspot_medium_factor
            )));
        }

        let layout = match raw.layout {
            Some(l) => {
                let defaults = LayoutConfig::default();
                LayoutConfig {
                    radius: l.radius.unwrap_or(defaults.radius),
                    center_x: l.center_x.unwrap_or(defaults.center_x),
                    center_y: l.center_y.unwrap_or(defaults.center_y),
                    width: l.width.unwrap_or(defaults.width),
                    height: l.height.unwrap_or(defaults.height),
                }
            }
            None => LayoutConfig::default(),
        };

        let insights = match raw.insights {
            Some(i) => {
                let defaults = InsightsConfig::default();
                InsightsConfig {
                    api_base: i.api_base.unwrap_or(defaults.api_base),
                    model: i.model.unwrap_or(defaults.model),
                    timeout_secs: i.timeout_secs.unwrap_or(defaults.timeout_secs),
                    api_key: i.api_key.map(SecretString::from),
                }
            }
            None => InsightsConfig::default(),
        };

        Ok(Self {
            thresholds,
            layout,
            insights,
        })
    }
}

pub fn generate_config_template() -> String {
    r#"# svcgraph configuration

[thresholds]
# A service is a hotspot when its degree is strictly greater than
# hotspot_medium_factor x average degree; "high" risk above hotspot_high_factor.
hotspot_medium_factor = 2.0
hotspot_high_factor = 3.0
# Maximum number of dependency cycles reported per analysis
max_cycles = 5

[layout]
radius = 200.0
center_x = 400.0
center_y = 300.0
width = 800.0
height = 600.0

[insights]
# Any OpenAI-compatible chat completions endpoint
api_base = "https://api.openai.com/v1"
model = "gpt-4o-mini"
timeout_secs = 60
# api_key is read from SVCGRAPH_API_KEY or OPENAI_API_KEY when unset
"#
    .to_string()
}
