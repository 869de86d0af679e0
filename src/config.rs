//! Runtime configuration.
//!
//! Defaults are overridden by environment variables, which are in turn
//! overridden by command-line flags.

use anyhow::{Context, bail};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://groupietrackers.herokuapp.com/api";
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub geocoder_url: String,
    pub coordinates_file: PathBuf,
    pub bind: SocketAddr,
    pub fetch_timeout: Duration,
    pub fetch_attempts: usize,
    pub geocode_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            coordinates_file: PathBuf::from("coordinates.json"),
            bind: SocketAddr::from(([127, 0, 0, 1], 8080)),
            fetch_timeout: Duration::from_secs(10),
            fetch_attempts: 3,
            geocode_interval: Duration::from_secs(1),
        }
    }
}

impl Config {
    /// Environment first, then `args` (including the program name at index 0).
    pub fn load(args: &[String]) -> anyhow::Result<Self> {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        config.apply_args(args)?;
        Ok(config)
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        for key in ENV_KEYS {
            if let Some(value) = lookup(key) {
                self.set(key, &value)?;
            }
        }
        Ok(())
    }

    pub fn apply_args(&mut self, args: &[String]) -> anyhow::Result<()> {
        let mut i = 1;
        while i < args.len() {
            let Some(key) = flag_key(&args[i]) else {
                bail!("unknown argument '{}'", args[i]);
            };
            let Some(value) = args.get(i + 1) else {
                bail!("{} requires a value", args[i]);
            };
            self.set(key, value)?;
            i += 2;
        }
        Ok(())
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "CATALOG_API_URL" => self.api_url = value.to_string(),
            "GEOCODER_URL" => self.geocoder_url = value.to_string(),
            "COORDINATES_FILE" => self.coordinates_file = PathBuf::from(value),
            "CATALOG_BIND" => {
                self.bind = value
                    .parse()
                    .with_context(|| format!("invalid bind address '{}'", value))?;
            }
            "FETCH_TIMEOUT_MS" => {
                self.fetch_timeout = Duration::from_millis(parse_number(key, value)?)
            }
            "FETCH_ATTEMPTS" => {
                let attempts = parse_number(key, value)? as usize;
                if attempts == 0 {
                    bail!("{} must be at least 1", key);
                }
                self.fetch_attempts = attempts;
            }
            "GEOCODE_INTERVAL_MS" => {
                self.geocode_interval = Duration::from_millis(parse_number(key, value)?)
            }
            _ => bail!("unknown setting {}", key),
        }
        Ok(())
    }
}

const ENV_KEYS: [&str; 7] = [
    "CATALOG_API_URL",
    "GEOCODER_URL",
    "COORDINATES_FILE",
    "CATALOG_BIND",
    "FETCH_TIMEOUT_MS",
    "FETCH_ATTEMPTS",
    "GEOCODE_INTERVAL_MS",
];

fn flag_key(flag: &str) -> Option<&'static str> {
    match flag {
        "--api" => Some("CATALOG_API_URL"),
        "--geocoder" => Some("GEOCODER_URL"),
        "--coords" => Some("COORDINATES_FILE"),
        "--bind" => Some("CATALOG_BIND"),
        "--timeout-ms" => Some("FETCH_TIMEOUT_MS"),
        "--attempts" => Some("FETCH_ATTEMPTS"),
        "--geocode-interval-ms" => Some("GEOCODE_INTERVAL_MS"),
        _ => None,
    }
}

fn parse_number(key: &str, value: &str) -> anyhow::Result<u64> {
    value
        .trim()
        .parse()
        .with_context(|| format!("{} expects a number, got '{}'", key, value))
}
