use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, bail, Error};
use serde::Deserialize;

use crate::api::connector::RetryPolicy;
use crate::api::query::Pacing;
use crate::config::network::{NetworkProfile, NetworkTable};
use crate::globals::DEFAULT_LEDGER_DIR;

/// Everything a session needs, loaded once at start and passed down by reference.
#[derive(Debug, Clone)]
pub struct Config {
    pub general: GeneralConfig,
    pub query: QueryConfig,
    pub networks: NetworkTable,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub ledger_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub max_connect_attempts: u32,
    pub connect_cooldown_secs: f64,
    pub request_timeout_secs: f64,
    pub pacing_min_secs: f64,
    pub pacing_max_secs: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    general: GeneralConfig,
    query: QueryConfig,
    networks: BTreeMap<String, NetworkProfile>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            ledger_dir: PathBuf::from(DEFAULT_LEDGER_DIR),
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        QueryConfig {
            max_connect_attempts: 3,
            connect_cooldown_secs: 2.0,
            request_timeout_secs: 10.0,
            pacing_min_secs: 1.0,
            pacing_max_secs: 3.0,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            general: GeneralConfig::default(),
            query: QueryConfig::default(),
            networks: NetworkTable::builtin(),
        }
    }
}

impl Config {
    /// Built-in defaults when `path` does not exist, the parsed file otherwise.
    pub fn load_or_default(path: &Path) -> Result<Config, Error> {
        if !path.exists() {
            return Ok(Config::default());
        }
        Config::from_file(path)
    }

    fn from_file(path: &Path) -> Result<Config, Error> {
        let contents = fs::read_to_string(path)?;
        Config::from_toml(&contents)
            .map_err(|err| anyhow!("Invalid config file {}: {err}", path.display()))
    }

    fn from_toml(contents: &str) -> Result<Config, Error> {
        let file: ConfigFile = toml::from_str(contents)?;
        file.query.validate()?;

        let mut networks = NetworkTable::builtin();
        networks.merge(file.networks);

        Ok(Config {
            general: file.general,
            query: file.query,
            networks,
        })
    }
}

impl QueryConfig {
    fn validate(&self) -> Result<(), Error> {
        if self.max_connect_attempts == 0 {
            bail!("query.max_connect_attempts must be at least 1");
        }
        if self.retry_policy()?.request_timeout.is_zero() {
            bail!("query.request_timeout_secs must be positive");
        }
        self.pacing()?;
        if self.pacing_min_secs > self.pacing_max_secs {
            bail!("query.pacing_min_secs must not exceed query.pacing_max_secs");
        }
        Ok(())
    }

    pub fn retry_policy(&self) -> Result<RetryPolicy, Error> {
        Ok(RetryPolicy {
            max_attempts: self.max_connect_attempts,
            cooldown: seconds("query.connect_cooldown_secs", self.connect_cooldown_secs)?,
            request_timeout: seconds("query.request_timeout_secs", self.request_timeout_secs)?,
        })
    }

    pub fn pacing(&self) -> Result<Pacing, Error> {
        Ok(Pacing::new(
            seconds("query.pacing_min_secs", self.pacing_min_secs)?,
            seconds("query.pacing_max_secs", self.pacing_max_secs)?,
        ))
    }
}

fn seconds(field: &str, value: f64) -> Result<Duration, Error> {
    Duration::try_from_secs_f64(value).map_err(|err| anyhow!("{field} = {value}: {err}"))
}
