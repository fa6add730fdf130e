use config::{Config, File};
use dotenv::dotenv;
use eyre::Result;
use serde::{de::DeserializeOwned, Deserialize};

use crate::db;
use crate::target::{self, TargetError, WatchTarget};

/// Default MongoDB connection string, matching a local deployment.
pub const DEFAULT_DB_URL: &str = "mongodb://127.0.0.1:27017";

fn config_from_env() -> Result<AppConfig> {
    dotenv().ok();

    let settings = Config::builder()
        .add_source(File::with_name("config.yaml").required(false))
        .add_source(config::Environment::default().separator("__"))
        .build()?;

    settings.try_deserialize().map_err(eyre::Error::from)
}

pub trait LoadFromEnv: Sized + DeserializeOwned {
    fn load() -> Result<Self>;
}

/// Full tool configuration. Every field has a compiled-in default equal to
/// the watcher's canonical seed values, so running with no configuration at
/// all provisions the local development setup.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub target: TargetConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub name: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DB_URL.to_owned(),
            name: db::DEFAULT_DB_NAME.to_owned(),
        }
    }
}

/// Watch target as configured, still unvalidated raw strings.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct TargetConfig {
    pub chain_endpoint: String,
    pub contract_address: String,
    pub event_type: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            chain_endpoint: target::defaults::CHAIN_ENDPOINT.to_owned(),
            contract_address: target::defaults::CONTRACT_ADDRESS.to_owned(),
            event_type: target::defaults::EVENT_TYPE.to_owned(),
        }
    }
}

impl TargetConfig {
    /// Raw configuration strings stop here; everything past this point works
    /// with the validated model.
    pub fn to_watch_target(&self) -> Result<WatchTarget, TargetError> {
        WatchTarget::parse(
            &self.chain_endpoint,
            &self.contract_address,
            &self.event_type,
        )
    }
}

impl LoadFromEnv for AppConfig {
    fn load() -> Result<Self> {
        config_from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn defaults_are_the_canonical_seed_values() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.database.url, DEFAULT_DB_URL);
        assert_eq!(cfg.database.name, db::DEFAULT_DB_NAME);
        assert_eq!(cfg.target.chain_endpoint, target::defaults::CHAIN_ENDPOINT);
        assert_eq!(cfg.target.contract_address, target::defaults::CONTRACT_ADDRESS);
        assert_eq!(cfg.target.event_type, target::defaults::EVENT_TYPE);
    }

    #[test]
    fn default_target_passes_validation() {
        assert!(AppConfig::default().target.to_watch_target().is_ok());
    }

    #[test]
    fn empty_sources_deserialize_to_defaults() {
        let cfg: AppConfig = Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(cfg.database.name, db::DEFAULT_DB_NAME);
        assert_eq!(cfg.target.event_type, target::defaults::EVENT_TYPE);
    }

    #[test]
    fn yaml_overrides_defaults_per_field() {
        let yaml = r#"
database:
  name: watcher_ci
target:
  contract_address: "0x00000000000000000000000000000000000000aa"
"#;
        let cfg: AppConfig = Config::builder()
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(cfg.database.name, "watcher_ci");
        assert_eq!(cfg.database.url, DEFAULT_DB_URL);
        assert_eq!(cfg.target.contract_address, "0x00000000000000000000000000000000000000aa");
        assert_eq!(cfg.target.chain_endpoint, target::defaults::CHAIN_ENDPOINT);
    }

    #[test]
    fn malformed_configured_target_is_rejected_at_validation() {
        let cfg = TargetConfig {
            contract_address: "not-an-address".to_owned(),
            ..Default::default()
        };
        assert!(cfg.to_watch_target().is_err());
    }
}
