use parley_core::{ParleyError, ParleyResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "parley.toml";

#[derive(Debug, Deserialize, Default)]
pub struct ParleyConfig {
    /// Intent definition file. `None` means the bundled catalog.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub security: SecurityConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SecurityConfig {
    #[serde(default = "default_max_msg_len")]
    pub max_message_length: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_message_length: default_max_msg_len(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8000
}
fn default_max_msg_len() -> usize {
    100_000
}

impl ParleyConfig {
    /// Parse TOML, resolving a relative `catalog` path against `base_dir`.
    pub fn from_toml(text: &str, base_dir: &Path) -> ParleyResult<Self> {
        let mut config: ParleyConfig =
            toml::from_str(text).map_err(|e| ParleyError::Config(e.to_string()))?;
        if let Some(catalog) = config.catalog.take() {
            config.catalog = Some(if catalog.is_relative() {
                base_dir.join(catalog)
            } else {
                catalog
            });
        }
        Ok(config)
    }

    /// Load the config file.
    ///
    /// With `explicit` set the file must exist. Otherwise a missing
    /// `parley.toml` just means defaults.
    pub async fn load(explicit: Option<&Path>) -> ParleyResult<Self> {
        let path = explicit.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        let text = match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(e) if explicit.is_none() && e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ParleyError::Config(format!(
                    "Failed to read config file '{}': {}",
                    path.display(),
                    e
                )));
            }
        };
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_toml(&text, base_dir)
    }
}
