//! Platform settings for the CLI, loaded through the `config` crate.
//!
//! Sources, later ones overriding earlier ones:
//! 1. built-in defaults (unit prices and share, operator `server`)
//! 2. an optional settings file (`--config`, any format `config` detects
//!    from the extension)
//! 3. `YEM_`-prefixed environment variables, e.g. `YEM_SERVER_SHARE=1/2`
//!
//! Amounts are strings parsed as exact rationals (`"3"`, `"3/2"`, `"0.25"`).

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use yem_brain::PlatformConfig;
use yem_core::amount::parse_money;
use yem_core::constants::{
    DEFAULT_SERVER_ID, DEFAULT_SERVER_SHARE, DEFAULT_UPVOTE_PRICE, DEFAULT_VIEW_PRICE,
};
use yem_core::types::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CliSettings {
    /// Operator identity.
    pub server: String,
    pub upvote_price: String,
    pub view_price: String,
    pub server_share: String,
}

impl Default for CliSettings {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER_ID.to_string(),
            upvote_price: DEFAULT_UPVOTE_PRICE.to_string(),
            view_price: DEFAULT_VIEW_PRICE.to_string(),
            server_share: DEFAULT_SERVER_SHARE.to_string(),
        }
    }
}

impl CliSettings {
    /// Load settings from the optional file and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let settings = builder
            .add_source(config::Environment::with_prefix("YEM"))
            .build()
            .context("failed to load settings")?;
        settings
            .try_deserialize()
            .context("invalid settings")
    }

    /// Parse the amounts and validate them as a [`PlatformConfig`].
    pub fn platform_config(&self) -> Result<PlatformConfig<UserId>> {
        let config = PlatformConfig::new(
            UserId::new(self.server.clone()),
            parse_money(&self.upvote_price).context("upvote_price")?,
            parse_money(&self.view_price).context("view_price")?,
            parse_money(&self.server_share).context("server_share")?,
        )?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use yem_core::amount::{money, whole};

    #[test]
    fn defaults_parse_to_unit_config() {
        let cfg = CliSettings::default().platform_config().unwrap();
        assert_eq!(cfg.server, UserId::new("server"));
        assert_eq!(cfg.upvote_price, whole(1));
        assert_eq!(cfg.view_price, whole(1));
        assert_eq!(cfg.server_share, whole(1));
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "server = \"operator\"\nserver_share = \"1/2\"").unwrap();
        let settings = CliSettings::load(Some(file.path())).unwrap();
        assert_eq!(settings.server, "operator");
        assert_eq!(settings.upvote_price, "1");
        let cfg = settings.platform_config().unwrap();
        assert_eq!(cfg.server_share, money(1, 2).unwrap());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(CliSettings::load(Some(&path)).is_err());
    }

    #[test]
    fn zero_share_is_rejected() {
        let settings = CliSettings {
            server_share: "0".to_string(),
            ..CliSettings::default()
        };
        let err = settings.platform_config().unwrap_err();
        assert!(err.to_string().contains("server share must be positive"));
    }

    #[test]
    fn malformed_amount_names_the_field() {
        let settings = CliSettings {
            view_price: "cheap".to_string(),
            ..CliSettings::default()
        };
        let err = settings.platform_config().unwrap_err();
        assert_eq!(err.to_string(), "view_price");
    }
}
