use std::{
    env,
    net::{AddrParseError, IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
    time::Duration,
};

use api::AppSettings;
use market_core::SimConfig;

const DEFAULT_LISTEN_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8080);
const DEFAULT_HISTORY_OUTPUT_PATH: &str = "artifacts/event-history.csv";
const DEFAULT_LOG_FILTER: &str = "info";

const ADDR_KEY: &str = "CLASSROOM_SERVER_ADDR";
const BALANCE_KEY: &str = "CLASSROOM_INITIAL_BALANCE";
const INTERVAL_KEY: &str = "CLASSROOM_EVENT_INTERVAL_SECS";
const WINDOW_KEY: &str = "CLASSROOM_EVENT_WINDOW_SECS";
const NEGATIVE_PCT_KEY: &str = "CLASSROOM_NEGATIVE_EVENT_PCT";
const DURATION_KEY: &str = "CLASSROOM_MARKET_DURATION_SECS";
const SEED_KEY: &str = "CLASSROOM_RNG_SEED";
const HISTORY_KEY: &str = "CLASSROOM_HISTORY_OUTPUT";
const LOG_KEY: &str = "CLASSROOM_LOG";

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub sim: SimConfig,
    pub rng_seed: Option<u64>,
    pub history_output_path: String,
    pub log_filter: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("CLASSROOM_SERVER_ADDR is not a valid socket address: {0}")]
    InvalidListenAddr(#[source] AddrParseError),
    #[error("{key} must be {expected}")]
    Invalid {
        key: &'static str,
        expected: &'static str,
    },
    #[error("CLASSROOM_HISTORY_OUTPUT must not be empty or whitespace")]
    InvalidHistoryOutputPath,
    #[error("{key} contains non-unicode data")]
    NonUnicode { key: &'static str },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let listen_addr = match read_env(ADDR_KEY)? {
            Some(value) => value.parse().map_err(ConfigError::InvalidListenAddr)?,
            None => DEFAULT_LISTEN_ADDR,
        };

        let defaults = SimConfig::default();
        let initial_balance = match read_env(BALANCE_KEY)? {
            Some(value) => value
                .parse::<f64>()
                .ok()
                .filter(|balance| balance.is_finite() && *balance > 0.0)
                .ok_or(ConfigError::Invalid {
                    key: BALANCE_KEY,
                    expected: "a finite amount greater than 0",
                })?,
            None => defaults.initial_balance,
        };
        let event_interval_secs =
            parse_positive_secs_env(INTERVAL_KEY)?.unwrap_or(defaults.event_interval_secs);
        let event_window_secs =
            parse_positive_secs_env(WINDOW_KEY)?.unwrap_or(defaults.event_window_secs);
        let market_duration_secs = parse_positive_secs_env(DURATION_KEY)?;

        let negative_event_probability = match read_env(NEGATIVE_PCT_KEY)? {
            Some(value) => {
                parse_percentage(&value).ok_or(ConfigError::Invalid {
                    key: NEGATIVE_PCT_KEY,
                    expected: "a finite percentage between 0 and 100",
                })? / 100.0
            }
            None => defaults.negative_event_probability,
        };

        let rng_seed = match read_env(SEED_KEY)? {
            Some(value) => Some(value.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                key: SEED_KEY,
                expected: "an unsigned 64-bit integer",
            })?),
            None => None,
        };

        let history_output_path = match read_env(HISTORY_KEY)? {
            Some(value) if value.trim().is_empty() => {
                return Err(ConfigError::InvalidHistoryOutputPath)
            }
            Some(value) => value,
            None => DEFAULT_HISTORY_OUTPUT_PATH.to_owned(),
        };

        let log_filter = read_env(LOG_KEY)?.unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned());

        Ok(Self {
            listen_addr,
            sim: SimConfig {
                initial_balance,
                event_interval_secs,
                event_window_secs,
                negative_event_probability,
                market_duration_secs,
                ..defaults
            },
            rng_seed,
            history_output_path,
            log_filter,
        })
    }

    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            sim: self.sim,
            rng_seed: self.rng_seed,
            history_output: Some(PathBuf::from(&self.history_output_path)),
            tick_period: Duration::from_secs(1),
        }
    }
}

fn read_env(key: &'static str) -> Result<Option<String>, ConfigError> {
    match env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NonUnicode { key }),
    }
}

fn parse_positive_secs_env(key: &'static str) -> Result<Option<u32>, ConfigError> {
    let Some(value) = read_env(key)? else {
        return Ok(None);
    };

    match value.trim().parse::<u32>() {
        Ok(secs) if secs > 0 => Ok(Some(secs)),
        _ => Err(ConfigError::Invalid {
            key,
            expected: "a whole number of seconds greater than 0",
        }),
    }
}

fn parse_percentage(value: &str) -> Option<f64> {
    let parsed = value.trim().parse::<f64>().ok()?;
    (parsed.is_finite() && (0.0..=100.0).contains(&parsed)).then_some(parsed)
}
