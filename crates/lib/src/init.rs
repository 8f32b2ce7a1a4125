//! Initialize the configuration directory: create ~/.babble, default config,
//! and a starter corpus so the endpoint can generate before a real corpus is built.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config;

static STARTER_CORPUS: &str = include_str!("../config/corpus.json");

/// Ensure the configuration directory has been initialized (config file and
/// corpus file exist). Uses the corpus path from config (or default).
pub fn require_initialized(config_path: &Path, config: &config::Config) -> Result<()> {
    if !config_path.exists() {
        anyhow::bail!(
            "configuration not initialized; run `babble init` first (config file not found: {})",
            config_path.display()
        );
    }
    let corpus_path = config::resolve_corpus_path(config, config_path);
    if !corpus_path.exists() {
        anyhow::bail!(
            "configuration not initialized; run `babble init` first (corpus file not found: {})",
            corpus_path.display()
        );
    }
    Ok(())
}

/// Create the config directory and default files if they do not exist.
/// - Creates the config directory (parent of config file path).
/// - Writes `config.json` with `{}` if missing.
/// - Seeds `corpus.json` from the bundled starter corpus if missing.
pub fn init_config_dir(config_path: &Path) -> Result<PathBuf> {
    let config_dir = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(config_dir)
        .with_context(|| format!("creating config directory {}", config_dir.display()))?;

    if !config_path.exists() {
        let default_config = b"{}";
        std::fs::write(config_path, default_config)
            .with_context(|| format!("writing default config to {}", config_path.display()))?;
        log::info!("created default config at {}", config_path.display());
    }

    let corpus_path = config_dir.join("corpus.json");
    if !corpus_path.exists() {
        std::fs::write(&corpus_path, STARTER_CORPUS)
            .with_context(|| format!("writing starter corpus to {}", corpus_path.display()))?;
        log::info!("wrote starter corpus to {}", corpus_path.display());
    } else {
        log::debug!(
            "corpus already exists at {}, skipping",
            corpus_path.display()
        );
    }

    Ok(config_dir.to_path_buf())
}
