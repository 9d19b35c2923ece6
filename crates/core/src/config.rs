use crate::error::OutreachResult;
use crate::types::CampaignTone;
use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `OUTREACH_EXPRESS__` and an optional TOML config file.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_node_id")]
    pub node_id: String,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
    #[serde(default)]
    pub campaign: CampaignDefaults,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_enabled")]
    pub enabled: bool,
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

/// Outbound submission settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchConfig {
    /// Upper bound for a single directory submission, connect through body read.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Raw (non-JSON) response bodies are cut to this many characters.
    #[serde(default = "default_response_sample_max_chars")]
    pub response_sample_max_chars: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Values the request boundary falls back to when a caller omits them.
#[derive(Debug, Clone, Deserialize)]
pub struct CampaignDefaults {
    #[serde(default = "default_keyword")]
    pub default_keyword: String,
    #[serde(default)]
    pub default_tone: CampaignTone,
}

// Default functions
fn default_node_id() -> String {
    "node-01".to_string()
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_http_port() -> u16 {
    8080
}
fn default_metrics_enabled() -> bool {
    true
}
fn default_metrics_port() -> u16 {
    9091
}
fn default_timeout_ms() -> u64 {
    15_000
}
fn default_response_sample_max_chars() -> usize {
    2000
}
fn default_user_agent() -> String {
    format!("outreach-express/{}", env!("CARGO_PKG_VERSION"))
}
fn default_keyword() -> String {
    "backlink automation".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_metrics_enabled(),
            port: default_metrics_port(),
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            response_sample_max_chars: default_response_sample_max_chars(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for CampaignDefaults {
    fn default() -> Self {
        Self {
            default_keyword: default_keyword(),
            default_tone: CampaignTone::default(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            node_id: default_node_id(),
            api: ApiConfig::default(),
            metrics: MetricsConfig::default(),
            dispatch: DispatchConfig::default(),
            campaign: CampaignDefaults::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from an optional config file, then environment
    /// variables. Environment values win over the file.
    pub fn load(file: Option<&str>) -> OutreachResult<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::with_name(path));
        }
        builder = builder.add_source(
            config::Environment::with_prefix("OUTREACH_EXPRESS")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }
}
