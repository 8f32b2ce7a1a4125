//! Configuration types and loading.
//!
//! Config is loaded from a JSON file (e.g. `~/.babble/config.json`) and environment.
//! Secrets (public key, application id, bot token) can come from env; env wins over file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level application config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Interaction endpoint bind settings.
    #[serde(default)]
    pub endpoint: EndpointConfig,

    /// Discord credentials and reply mode.
    #[serde(default)]
    pub discord: DiscordConfig,

    /// Corpus file location.
    #[serde(default)]
    pub corpus: CorpusConfig,

    /// Generation acceptance-loop settings.
    #[serde(default)]
    pub generation: GenerationConfig,
}

/// Endpoint bind, port, and landing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointConfig {
    /// Port for the interaction webhook (default 8787).
    #[serde(default = "default_endpoint_port")]
    pub port: u16,

    /// Bind address (default "127.0.0.1").
    #[serde(default = "default_endpoint_bind")]
    pub bind: String,

    /// Where browser requests get redirected (default "/", the health page).
    #[serde(default = "default_landing_url")]
    pub landing_url: String,
}

fn default_endpoint_port() -> u16 {
    8787
}

fn default_endpoint_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_landing_url() -> String {
    "/".to_string()
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            port: default_endpoint_port(),
            bind: default_endpoint_bind(),
            landing_url: default_landing_url(),
        }
    }
}

/// Discord credentials. The public key authenticates inbound requests; the
/// application id and bot token are needed only for the deferred follow-up path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscordConfig {
    /// Hex-encoded Ed25519 public key from the application portal. Overridden by DISCORD_PUBLIC_KEY env.
    pub public_key: Option<String>,

    /// Application id used in follow-up webhook URLs. Overridden by DISCORD_APPLICATION_ID env.
    pub application_id: Option<String>,

    /// Bot token for the follow-up Authorization header. Overridden by DISCORD_BOT_TOKEN env.
    pub bot_token: Option<String>,

    /// When true (and credentials are set), commands are acknowledged with a
    /// deferred response and the content is delivered via follow-up PATCH.
    #[serde(default)]
    pub defer_replies: bool,
}

/// Corpus file config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusConfig {
    /// Path to the corpus JSON (array of sentences). Relative paths are resolved
    /// against the config file's parent. Default: `corpus.json` beside the config.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Acceptance-loop config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Maximum oracle attempts before settling for the last output (default 10).
    /// Always finite; values below 1 are treated as 1.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_max_attempts() -> u32 {
    10
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
        }
    }
}

impl GenerationConfig {
    /// Effective attempt bound: configured value clamped to at least 1.
    pub fn attempt_bound(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

fn env_or(var: &str, fallback: Option<&String>) -> Option<String> {
    std::env::var(var)
        .ok()
        .and_then(|s| {
            let t = s.trim();
            if t.is_empty() {
                None
            } else {
                Some(t.to_string())
            }
        })
        .or_else(|| {
            fallback
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        })
}

/// Resolve the platform public key: env DISCORD_PUBLIC_KEY overrides config.
pub fn resolve_public_key(config: &Config) -> Option<String> {
    env_or("DISCORD_PUBLIC_KEY", config.discord.public_key.as_ref())
}

/// Resolve the application id: env DISCORD_APPLICATION_ID overrides config.
pub fn resolve_application_id(config: &Config) -> Option<String> {
    env_or(
        "DISCORD_APPLICATION_ID",
        config.discord.application_id.as_ref(),
    )
}

/// Resolve the bot token: env DISCORD_BOT_TOKEN overrides config.
pub fn resolve_bot_token(config: &Config) -> Option<String> {
    env_or("DISCORD_BOT_TOKEN", config.discord.bot_token.as_ref())
}

/// Resolve config path from env or default (~/.babble/config.json).
pub fn default_config_path() -> PathBuf {
    std::env::var("BABBLE_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .map(|h| h.join(".babble").join("config.json"))
                .unwrap_or_else(|| PathBuf::from("config.json"))
        })
}

/// Resolve the corpus path: `corpus.path` if set (relative paths resolved against
/// the config file's parent), otherwise `corpus.json` beside the config file.
pub fn resolve_corpus_path(config: &Config, config_path: &Path) -> PathBuf {
    let config_parent = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    match &config.corpus.path {
        Some(p) if !p.as_os_str().is_empty() => {
            if p.is_absolute() {
                p.clone()
            } else {
                config_parent.join(p)
            }
        }
        _ => config_parent.join("corpus.json"),
    }
}

/// Load config from the default path (or BABBLE_CONFIG_PATH). Missing file => default config.
/// Returns the config and the path that was used (for resolving the corpus path).
pub fn load_config(path: Option<PathBuf>) -> Result<(Config, PathBuf)> {
    let path = path.unwrap_or_else(default_config_path);
    let config = if !path.exists() {
        log::debug!("config file not found, using defaults: {}", path.display());
        Config::default()
    } else {
        let s = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        serde_json::from_str(&s)
            .with_context(|| format!("parsing config from {}", path.display()))?
    };
    Ok((config, path))
}
