//! Configuration loading from TOML files.
//!
//! Lookup order:
//! 1. `$VAULTKEEP_CONFIG` environment variable
//! 2. `~/.config/vaultkeep/config.toml`
//! 3. Built-in defaults (everything is optional)

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use vaultkeep_store::{WalkRules, DEFAULT_REFERENCES_DIR};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub vault: VaultConfig,
    pub walk: WalkConfig,
}

/// Vault location.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    /// Vault root. A leading `~` is expanded to the home directory.
    pub path: Option<String>,
    /// Reference notes directory, relative to the root.
    pub references_dir: String,
}

/// Which files the vault walker picks up.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    pub extension: String,
    pub exclude_dirs: Vec<String>,
    pub exclude_suffixes: Vec<String>,
}

// --- Defaults ---

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            path: None,
            references_dir: DEFAULT_REFERENCES_DIR.into(),
        }
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        let rules = WalkRules::default();
        Self {
            extension: rules.extension,
            exclude_dirs: rules.exclude_dirs,
            exclude_suffixes: rules.exclude_suffixes,
        }
    }
}

impl WalkConfig {
    pub fn rules(&self) -> WalkRules {
        WalkRules {
            extension: self.extension.trim_start_matches('.').to_string(),
            exclude_dirs: self.exclude_dirs.clone(),
            exclude_suffixes: self.exclude_suffixes.clone(),
        }
    }
}

/// Load config from disk. Returns defaults if no config file exists.
pub fn load_config() -> Result<Config> {
    let path = config_path();

    if let Some(p) = &path {
        if p.exists() {
            let content =
                std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?;
            let config: Config =
                toml::from_str(&content).with_context(|| format!("parsing {}", p.display()))?;
            return Ok(config);
        }
    }

    Ok(Config::default())
}

/// Resolve the config file path.
fn config_path() -> Option<PathBuf> {
    // 1. Environment variable
    if let Ok(p) = std::env::var("VAULTKEEP_CONFIG") {
        return Some(PathBuf::from(p));
    }

    // 2. ~/.config/vaultkeep/config.toml
    home_dir().map(|home| home.join(".config").join("vaultkeep").join("config.toml"))
}

fn home_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Show the active config path (for `vaultkeep config`).
pub fn show_config_path() -> String {
    match config_path() {
        Some(p) if p.exists() => format!("{} (loaded)", p.display()),
        Some(p) => format!("{} (not found, using defaults)", p.display()),
        None => "no config path resolved (using defaults)".into(),
    }
}

/// Expand a leading `~` against `home`.
fn expand_tilde(path: &str, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home.to_path_buf(),
        (Some(rest), Some(home)) if rest.starts_with('/') || rest.starts_with('\\') => {
            home.join(&rest[1..])
        }
        _ => PathBuf::from(path),
    }
}

/// Pick the vault root: the `--vault` flag wins over `vault.path`.
pub fn resolve_vault_root(flag: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    if let Some(root) = flag {
        return Ok(root);
    }
    match config.vault.path.as_deref() {
        Some(p) => Ok(expand_tilde(p, home_dir().as_deref())),
        None => bail!(
            "no vault configured: pass --vault <PATH> or set vault.path in {}",
            show_config_path()
        ),
    }
}
