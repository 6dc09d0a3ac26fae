use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "config/client";
pub const ENV_PREFIX: &str = "EQUIPVIZ";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub downloads: DownloadSettings,
    #[serde(default)]
    pub auth: AuthSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DownloadSettings {
    #[serde(default = "default_download_dir")]
    pub directory: PathBuf,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            directory: default_download_dir(),
        }
    }
}

/// Operator credentials for non-interactive use. Empty means "not signed in".
#[derive(Deserialize, Clone, Default)]
pub struct AuthSettings {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000/api/".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_download_dir() -> PathBuf {
    PathBuf::from(".")
}

pub fn load_client_config() -> anyhow::Result<ClientConfig> {
    load_client_config_from(DEFAULT_CONFIG_FILE)
}

/// Optional config file (any format the `config` crate detects) overlaid by
/// `EQUIPVIZ__SECTION__KEY` environment variables.
pub fn load_client_config_from(file: &str) -> anyhow::Result<ClientConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(file).required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Join an API path onto the configured base URL
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
