use super::error::PlayerError;
use std::{path::PathBuf, str::FromStr};

pub const CATALOG_ENV: &str = "PODCASTR_CATALOG";
pub const SHUFFLE_SEED_ENV: &str = "PODCASTR_SHUFFLE_SEED";
pub const TICK_MS_ENV: &str = "PODCASTR_TICK_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    pub catalog_path: Option<PathBuf>,
    /// Fixed seed for shuffle picks; `None` seeds from the OS.
    pub shuffle_seed: Option<u64>,
    pub tick_rate_ms: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            shuffle_seed: None,
            tick_rate_ms: 250,
        }
    }
}

impl PlayerConfig {
    pub fn from_env() -> Result<Self, PlayerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, PlayerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(CATALOG_ENV).filter(|p| !p.trim().is_empty()) {
            config.catalog_path = Some(PathBuf::from(path));
        }
        if let Some(seed) = lookup(SHUFFLE_SEED_ENV) {
            config.shuffle_seed = Some(parse(SHUFFLE_SEED_ENV, seed)?);
        }
        if let Some(tick) = lookup(TICK_MS_ENV) {
            config.tick_rate_ms = parse(TICK_MS_ENV, tick)?;
        }
        if config.tick_rate_ms == 0 {
            return Err(PlayerError::InvalidConfig {
                key: TICK_MS_ENV,
                value: "0".into(),
            });
        }

        Ok(config)
    }

    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }
}

fn parse<T: FromStr>(key: &'static str, value: String) -> Result<T, PlayerError> {
    value
        .trim()
        .parse()
        .map_err(|_| PlayerError::InvalidConfig { key, value })
}
