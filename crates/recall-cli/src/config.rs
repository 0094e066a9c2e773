//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use recall_core::points::CoefficientTable;
use recall_core::pools::LanguagePool;

/// Top-level recall configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecallConfig {
    /// JSON snapshot of memos, recalls and corrections.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    /// TOML file with word and story pools.
    #[serde(default)]
    pub pools_path: Option<PathBuf>,
    /// `discipline -> "memo_time,recall_time" -> k`.
    #[serde(default)]
    pub coefficients: CoefficientTable,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("./recall-store.json")
}

impl Default for RecallConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            pools_path: None,
            coefficients: CoefficientTable::default(),
        }
    }
}

impl RecallConfig {
    /// The configured word and story pools, or an empty pool.
    pub fn load_pool(&self) -> Result<LanguagePool> {
        match &self.pools_path {
            Some(path) => LanguagePool::load(path),
            None => Ok(LanguagePool::new()),
        }
    }
}

/// Expand `${VAR}` references from the environment; unset variables expand
/// to nothing. Expanded values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start + 2..].find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let name = &rest[start + 2..start + 2 + len];
        out.push_str(&std::env::var(name).unwrap_or_default());
        rest = &rest[start + 2 + len + 1..];
    }
    out.push_str(rest);
    out
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `recall.toml` in the current directory
/// 2. `~/.config/recall/config.toml`
///
/// `RECALL_STORE` overrides `store_path`.
pub fn load_config_from(path: Option<&Path>) -> Result<RecallConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("recall.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<RecallConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), coefficients = config.coefficients.len(), "loaded config");
            config
        }
        None => RecallConfig::default(),
    };

    if let Ok(store) = std::env::var("RECALL_STORE") {
        config.store_path = PathBuf::from(store);
    }

    config.store_path = resolve_path(&config.store_path);
    config.pools_path = config.pools_path.as_deref().map(resolve_path);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("recall"))
}
