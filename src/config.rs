//! Editor configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use crate::consts::{DEFAULT_CHAT_LATENCY_MS, DEFAULT_SECTION_LATENCY_MS};
use crate::navigator::PreviewPage;
use crate::theme;

pub const ENV_CHAT_LATENCY_MS: &str = "LEADMAGNET_CHAT_LATENCY_MS";
pub const ENV_SECTION_LATENCY_MS: &str = "LEADMAGNET_SECTION_LATENCY_MS";
pub const ENV_PALETTE: &str = "LEADMAGNET_PALETTE";
pub const ENV_PAGE: &str = "LEADMAGNET_PAGE";

/// Errors produced while building an [`EditorConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A numeric variable did not parse.
    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    /// The palette id is not in the catalog.
    #[error("unknown palette id: {0}")]
    UnknownPalette(String),

    /// The page slug is not a funnel page.
    #[error("unknown preview page: {0}")]
    UnknownPage(String),
}

impl ConfigError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidNumber { .. } => "E_CONFIG_NUMBER",
            Self::UnknownPalette(_) => "E_CONFIG_PALETTE",
            Self::UnknownPage(_) => "E_CONFIG_PAGE",
        }
    }
}

/// Session-wide editor settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    pub chat_latency_ms: u64,
    pub section_latency_ms: u64,
    pub palette_id: String,
    pub initial_page: PreviewPage,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            chat_latency_ms: DEFAULT_CHAT_LATENCY_MS,
            section_latency_ms: DEFAULT_SECTION_LATENCY_MS,
            palette_id: "original".into(),
            initial_page: PreviewPage::DataCapture,
        }
    }
}

impl EditorConfig {
    /// Build config from process environment variables.
    ///
    /// Optional:
    /// - `LEADMAGNET_CHAT_LATENCY_MS`: default 2500
    /// - `LEADMAGNET_SECTION_LATENCY_MS`: default 2500
    /// - `LEADMAGNET_PALETTE`: default `original`
    /// - `LEADMAGNET_PAGE`: default `dataCapture`
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a value is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).map_err(drop))
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a value is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, ()>,
    {
        let defaults = Self::default();

        let chat_latency_ms = parse_ms(&lookup, ENV_CHAT_LATENCY_MS, defaults.chat_latency_ms)?;
        let section_latency_ms = parse_ms(&lookup, ENV_SECTION_LATENCY_MS, defaults.section_latency_ms)?;

        let palette_id = match lookup(ENV_PALETTE) {
            Ok(raw) => {
                let raw = raw.trim().to_string();
                if theme::palette(&raw).is_none() {
                    return Err(ConfigError::UnknownPalette(raw));
                }
                raw
            }
            Err(()) => defaults.palette_id,
        };

        let initial_page = match lookup(ENV_PAGE) {
            Ok(raw) => PreviewPage::from_slug(raw.trim()).ok_or(ConfigError::UnknownPage(raw))?,
            Err(()) => defaults.initial_page,
        };

        Ok(Self { chat_latency_ms, section_latency_ms, palette_id, initial_page })
    }

    #[must_use]
    pub fn chat_latency(&self) -> Duration {
        Duration::from_millis(self.chat_latency_ms)
    }

    #[must_use]
    pub fn section_latency(&self) -> Duration {
        Duration::from_millis(self.section_latency_ms)
    }
}

fn parse_ms<F>(lookup: &F, var: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Result<String, ()>,
{
    match lookup(var) {
        Ok(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidNumber { var, value: raw }),
        Err(()) => Ok(default),
    }
}
