//! Connection configuration (layered: environment > config file > defaults).

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{BridgeError, Result};

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 3080;
const DEFAULT_SCHEME: &str = "http";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// GNS3 server connection configuration.
///
/// Produced once at startup and immutable afterward; the backend client
/// copies what it needs at construction, so no synchronization is required
/// across concurrent tool calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    pub host: String,
    pub port: u16,
    pub scheme: String,
    pub verify_ssl: bool,
    pub timeout_secs: u64,
    pub auth_required: bool,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            scheme: DEFAULT_SCHEME.to_string(),
            verify_ssl: true,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            auth_required: false,
            username: None,
            password: None,
        }
    }
}

impl BridgeConfig {
    /// Base URL for the GNS3 API v2.
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}/v2", self.scheme, self.host, self.port)
    }

    /// Reject configurations that cannot produce a working client.
    pub fn validate(&self) -> Result<()> {
        if self.auth_required && (self.username.is_none() || self.password.is_none()) {
            return Err(BridgeError::Configuration(
                "auth_required is set but GNS3_USERNAME/GNS3_PASSWORD are not provided".into(),
            ));
        }
        Ok(())
    }
}

/// The `"gns3"` object of the settings file.
#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    host: Option<String>,
    port: Option<u16>,
    protocol: Option<String>,
    verify_ssl: Option<bool>,
    timeout: Option<u64>,
    auth_required: Option<bool>,
    username: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    gns3: FileSettings,
}

/// Environment variables the resolver recognizes.
const ENV_KEYS: &[&str] = &[
    "GNS3_HOST",
    "GNS3_PORT",
    "GNS3_PROTOCOL",
    "GNS3_VERIFY_SSL",
    "GNS3_TIMEOUT",
    "GNS3_AUTH_REQUIRED",
    "GNS3_USERNAME",
    "GNS3_PASSWORD",
];

/// Load configuration from the process environment and the settings file.
///
/// Precedence is per-field, not per-layer: a setting present only in the
/// file still overrides the default even when other settings come from the
/// environment. Fails fast when the resolved configuration is unusable.
pub fn load() -> Result<BridgeConfig> {
    let _ = dotenvy::dotenv(); // load .env if present, ignore absence

    let config_path =
        std::env::var("GNS3_CONFIG_PATH").unwrap_or_else(|_| "gns3_config.json".to_string());
    let file = read_settings_file(Path::new(&config_path))?;

    let mut env = HashMap::new();
    for key in ENV_KEYS {
        if let Ok(value) = std::env::var(key) {
            env.insert(key.to_string(), value);
        }
    }

    resolve(&env, file)
}

fn read_settings_file(path: &Path) -> Result<FileSettings> {
    if !path.exists() {
        return Ok(FileSettings::default());
    }
    let raw = std::fs::read_to_string(path).map_err(|e| {
        BridgeError::Configuration(format!("cannot read {}: {e}", path.display()))
    })?;
    let parsed: SettingsFile = serde_json::from_str(&raw).map_err(|e| {
        BridgeError::Configuration(format!("cannot parse {}: {e}", path.display()))
    })?;
    Ok(parsed.gns3)
}

/// Field-by-field merge of an environment snapshot over file settings over
/// defaults. Pure so precedence is testable without touching process state.
fn resolve(env: &HashMap<String, String>, file: FileSettings) -> Result<BridgeConfig> {
    let defaults = BridgeConfig::default();

    let config = BridgeConfig {
        host: env
            .get("GNS3_HOST")
            .cloned()
            .or(file.host)
            .unwrap_or(defaults.host),
        port: match env.get("GNS3_PORT") {
            Some(raw) => parse_number(raw, "GNS3_PORT")?,
            None => file.port.unwrap_or(defaults.port),
        },
        scheme: env
            .get("GNS3_PROTOCOL")
            .cloned()
            .or(file.protocol)
            .unwrap_or(defaults.scheme),
        verify_ssl: match env.get("GNS3_VERIFY_SSL") {
            Some(raw) => parse_bool(raw, "GNS3_VERIFY_SSL")?,
            None => file.verify_ssl.unwrap_or(defaults.verify_ssl),
        },
        timeout_secs: match env.get("GNS3_TIMEOUT") {
            Some(raw) => parse_number(raw, "GNS3_TIMEOUT")?,
            None => file.timeout.unwrap_or(defaults.timeout_secs),
        },
        auth_required: match env.get("GNS3_AUTH_REQUIRED") {
            Some(raw) => parse_bool(raw, "GNS3_AUTH_REQUIRED")?,
            None => file.auth_required.unwrap_or(defaults.auth_required),
        },
        username: env.get("GNS3_USERNAME").cloned().or(file.username),
        password: env.get("GNS3_PASSWORD").cloned().or(file.password),
    };

    config.validate()?;
    Ok(config)
}

fn parse_bool(raw: &str, key: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(BridgeError::Configuration(format!(
            "{key} must be \"true\" or \"false\", got \"{other}\""
        ))),
    }
}

fn parse_number<T: std::str::FromStr>(raw: &str, key: &str) -> Result<T> {
    raw.parse().map_err(|_| {
        BridgeError::Configuration(format!("{key} must be numeric, got \"{raw}\""))
    })
}
