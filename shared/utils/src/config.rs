use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;

/// OData service root appended to `sap.base_url`.
pub const DEFAULT_SERVICE_PATH: &str = "/sap/opu/odata/SAP/ZMM_VENDOR_ODATA_PORTAL_SRV";

/// Environment variable names understood for compatibility with older
/// deployments, mapped to the config key they override.
pub const LEGACY_ENV_VARS: [(&str, &str); 4] = [
    ("SAP_BASE_URL", "sap.base_url"),
    ("AUTH_USER", "sap.username"),
    ("AUTH_PASS", "sap.password"),
    ("PORT", "server.port"),
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub sap: SapConfig,
    pub access: AccessConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_request_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SapConfig {
    pub base_url: String,
    pub service_path: String,
    pub username: String,
    pub password: String,
    /// Skip TLS certificate verification for self-signed SAP hosts.
    pub accept_invalid_certs: bool,
    /// Unset leaves the transport default in place.
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// When set, goods receipts are only served for this vendor.
    pub goods_receipt_vendor: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file_path: Option<String>,
}

impl SapConfig {
    /// `base_url` + `service_path`, without a trailing slash.
    pub fn service_root(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.service_path.trim_end_matches('/')
        )
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let mut builder = Config::builder()
            // Start with default values
            .add_source(File::with_name("config/default").required(false))
            // Add environment-specific config
            .add_source(
                File::with_name(&format!(
                    "config/{}",
                    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // Add local config (gitignored)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables with PORTAL prefix
            .add_source(Environment::with_prefix("PORTAL").separator("__"));

        for (key, value) in legacy_overrides(|name| env::var(name).ok()) {
            builder = builder.set_override(key, value)?;
        }

        builder.build()?.try_deserialize()
    }
}

/// Config overrides taken from the legacy variable names. Empty values are
/// ignored.
pub fn legacy_overrides<F>(lookup: F) -> Vec<(&'static str, String)>
where
    F: Fn(&str) -> Option<String>,
{
    LEGACY_ENV_VARS
        .iter()
        .filter_map(|(name, key)| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .map(|value| (*key, value))
        })
        .collect()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            max_request_size: 1024 * 1024, // 1MB
        }
    }
}

impl Default for SapConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            service_path: DEFAULT_SERVICE_PATH.to_string(),
            username: String::new(),
            password: String::new(),
            accept_invalid_certs: false,
            timeout_seconds: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "json".to_string(),
            file_path: None,
        }
    }
}
