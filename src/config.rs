// SPDX-FileCopyrightText: 2026 reviewdeck contributors
//
// SPDX-License-Identifier: AGPL-3.0-only

use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::error::{Error, Result};

pub const PROVIDER_NAME: &str = "huggingface";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Model name on the inference endpoint
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the OpenAI-compatible inference endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token for the inference endpoint. Required; absence is fatal
    /// at startup.
    #[serde(default)]
    pub api_token: Option<String>,

    /// Address the dashboard server binds to
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Outbound request timeout in seconds (default 120)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// LLM temperature (0.0-2.0, default 0.3)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate (default 500, enough for a three-section
    /// review)
    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: u32,

    /// Maximum accepted submission size in characters
    #[serde(default = "default_max_code_chars")]
    pub max_code_chars: usize,
}

fn default_model() -> String {
    "HuggingFaceH4/zephyr-7b-beta".into()
}
fn default_base_url() -> String {
    "https://router.huggingface.co/v1".into()
}
fn default_listen_addr() -> String {
    "127.0.0.1:8787".into()
}
fn default_timeout_secs() -> u64 {
    120
}
fn default_temperature() -> f32 {
    0.3
}
fn default_max_new_tokens() -> u32 {
    500
}
fn default_max_code_chars() -> usize {
    100_000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            api_token: None,
            listen_addr: default_listen_addr(),
            timeout_secs: default_timeout_secs(),
            temperature: default_temperature(),
            max_new_tokens: default_max_new_tokens(),
            max_code_chars: default_max_code_chars(),
        }
    }
}

impl Config {
    /// Load with priority: CLI > ENV > user config > project config > defaults
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Project-level config (.reviewdeck.toml in working directory)
        if let Ok(cwd) = std::env::current_dir() {
            let project_config = cwd.join(".reviewdeck.toml");
            if project_config.exists() {
                figment = figment.merge(Toml::file(&project_config));
            }
        }

        // User-level config
        if let Some(path) = Self::config_path() {
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
            }
        }

        // Environment variables (REVIEWDECK_MODEL, REVIEWDECK_API_TOKEN, etc.)
        figment = figment.merge(Env::prefixed("REVIEWDECK_").split("__"));

        let mut config: Config = figment
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;

        // Provider-conventional token fallback (HuggingFace hub clients)
        if config.api_token.is_none() {
            config.api_token = std::env::var("HF_TOKEN")
                .or_else(|_| std::env::var("HUGGINGFACEHUB_API_TOKEN"))
                .ok()
                .filter(|t| !t.trim().is_empty());
        }

        // Keyring fallback (if still no token and secure-storage is enabled)
        #[cfg(feature = "secure-storage")]
        if config.api_token.is_none() {
            if let Ok(entry) = keyring::Entry::new("reviewdeck", PROVIDER_NAME) {
                if let Ok(token) = entry.get_password() {
                    config.api_token = Some(token);
                }
            }
        }

        // CLI overrides (highest priority)
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "reviewdeck").map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(ref addr) = cli.listen {
            self.listen_addr = addr.clone();
        }
        if let Some(ref m) = cli.model {
            self.model = m.clone();
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self.api_token {
            Some(ref token) if !token.trim().is_empty() => {}
            _ => return Err(Error::MissingToken),
        }

        if self.model.trim().is_empty() {
            return Err(Error::Config("model cannot be empty".into()));
        }

        let url = url::Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("base_url is not a valid URL: {e}")))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(Error::Config(format!(
                "base_url must be http:// or https://, got '{}'",
                self.base_url
            )));
        }

        if self.listen_addr.parse::<SocketAddr>().is_err() {
            return Err(Error::Config(format!(
                "listen_addr must be host:port, got '{}'",
                self.listen_addr
            )));
        }

        if !(1..=3600).contains(&self.timeout_secs) {
            return Err(Error::Config(format!(
                "timeout_secs must be 1–3600, got {}",
                self.timeout_secs
            )));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(Error::Config(format!(
                "temperature must be 0.0–2.0, got {}",
                self.temperature
            )));
        }

        if self.max_new_tokens == 0 {
            return Err(Error::Config("max_new_tokens must be at least 1".into()));
        }

        if !(1_000..=1_000_000).contains(&self.max_code_chars) {
            return Err(Error::Config(format!(
                "max_code_chars must be 1000–1000000, got {}",
                self.max_code_chars
            )));
        }

        Ok(())
    }

    /// Create default config file with secure permissions
    pub fn create_default() -> Result<PathBuf> {
        let Some(dir) = Self::config_dir() else {
            return Err(Error::Config("Cannot determine config directory".into()));
        };

        fs::create_dir_all(&dir)?;

        let path = dir.join("config.toml");
        let content = r#"# reviewdeck configuration

# Model name on the inference endpoint
model = "HuggingFaceH4/zephyr-7b-beta"

# Base URL of the OpenAI-compatible inference endpoint
base_url = "https://router.huggingface.co/v1"

# Bearer token for the endpoint. Prefer REVIEWDECK_API_TOKEN / HF_TOKEN
# environment variables (or `reviewdeck set-key`) over storing it here.
# api_token = "hf_..."

# Address the dashboard listens on
listen_addr = "127.0.0.1:8787"

# Outbound request timeout in seconds
timeout_secs = 120

# LLM temperature
temperature = 0.3

# Maximum tokens to generate per review
max_new_tokens = 500

# Maximum accepted submission size in characters
max_code_chars = 100000
"#;

        fs::write(&path, content)?;

        // Set secure permissions (0600)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&path, perms)?;
        }

        Ok(path)
    }
}
