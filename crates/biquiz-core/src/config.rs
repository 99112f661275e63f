//! biquiz configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::policy::ResultPolicy;

/// Top-level biquiz configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiquizConfig {
    /// Question bank used when none is given on the command line.
    /// The built-in Business Intelligence bank is used when unset.
    #[serde(default)]
    pub default_bank: Option<PathBuf>,
    /// Result policy for banks that do not carry their own.
    #[serde(default)]
    pub policy: ResultPolicy,
}

/// Environment variable naming the default question bank.
pub const ENV_BANK: &str = "BIQUIZ_BANK";
/// Environment variable replacing the wrong-answer marker.
pub const ENV_INCORRECT_PREFIX: &str = "BIQUIZ_INCORRECT_PREFIX";

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `biquiz.toml` in the current directory
/// 2. `~/.config/biquiz/config.toml`
///
/// Environment variable overrides: `BIQUIZ_BANK`, `BIQUIZ_INCORRECT_PREFIX`.
pub fn load_config() -> Result<BiquizConfig> {
    load_config_from(None)
}

/// Load configuration from an explicit path, falling back to the search order.
pub fn load_config_from(explicit: Option<&Path>) -> Result<BiquizConfig> {
    let config_path = if let Some(path) = explicit {
        Some(path.to_path_buf())
    } else {
        let local = PathBuf::from("biquiz.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => BiquizConfig::default(),
    };

    let config = apply_env_overrides(config, |key| std::env::var(key).ok());
    config.policy.validate()?;
    Ok(config)
}

/// Parse a config file body.
pub fn parse_config_str(content: &str) -> Result<BiquizConfig> {
    Ok(toml::from_str::<BiquizConfig>(content)?)
}

/// Apply `BIQUIZ_*` overrides, reading variables through `lookup`.
pub fn apply_env_overrides(
    mut config: BiquizConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> BiquizConfig {
    if let Some(bank) = lookup(ENV_BANK).filter(|b| !b.is_empty()) {
        config.default_bank = Some(PathBuf::from(bank));
    }
    config.policy = apply_policy_overrides(config.policy, lookup);
    config
}

/// Apply `BIQUIZ_INCORRECT_PREFIX` to a policy, reading variables through `lookup`.
///
/// Also used on a bank's own policy, so the override reaches banks that
/// carry a `[policy]` table.
pub fn apply_policy_overrides(
    mut policy: ResultPolicy,
    lookup: impl Fn(&str) -> Option<String>,
) -> ResultPolicy {
    if let Some(prefix) = lookup(ENV_INCORRECT_PREFIX) {
        policy.incorrect_prefix = prefix;
    }
    policy
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("biquiz"))
}
