//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::domain::Geocoordinate;
use crate::locator::{InvalidSearchConfig, SearchConfig};
use crate::maps::MapsConfig;

/// Kikar HaMedina, Tel Aviv: where the map opens before a position is known.
pub const DEFAULT_CENTER: (f64, f64) = (32.0868, 34.7897);

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_STATIC_DIR: &str = "static";

pub const API_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";
pub const BIND_ADDR_VAR: &str = "SHELTER_BIND_ADDR";
pub const STATIC_DIR_VAR: &str = "SHELTER_STATIC_DIR";
pub const DEFAULT_CENTER_VAR: &str = "SHELTER_DEFAULT_CENTER";
pub const MAPS_BASE_URL_VAR: &str = "SHELTER_MAPS_BASE_URL";
pub const HTTP_TIMEOUT_VAR: &str = "SHELTER_HTTP_TIMEOUT_SECS";
pub const SEARCH_START_VAR: &str = "SHELTER_SEARCH_START_DEG";
pub const SEARCH_STEP_VAR: &str = "SHELTER_SEARCH_STEP_DEG";
pub const SEARCH_MAX_VAR: &str = "SHELTER_SEARCH_MAX_DEG";
pub const SEARCH_LANGUAGE_VAR: &str = "SHELTER_SEARCH_LANGUAGE";

/// Errors from loading the server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid {var}={value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("invalid search configuration: {0}")]
    Search(#[from] InvalidSearchConfig),
}

/// Everything the binary needs to start serving.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub static_dir: PathBuf,
    pub default_center: Geocoordinate,
    pub maps: MapsConfig,
    pub search: SearchConfig,
}

impl ServerConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load using `lookup` to resolve variable names.
    ///
    /// Unset and blank variables fall back to their defaults; only the API
    /// key is required.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let api_key = get(API_KEY_VAR).ok_or(ConfigError::Missing(API_KEY_VAR))?;

        let bind_addr: SocketAddr = parse_value(
            BIND_ADDR_VAR,
            get(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        )?;

        let static_dir = get(STATIC_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        let default_center = match parse_var(DEFAULT_CENTER_VAR, get(DEFAULT_CENTER_VAR))? {
            Some(center) => center,
            None => Geocoordinate::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1).map_err(|e| {
                ConfigError::Invalid {
                    var: DEFAULT_CENTER_VAR,
                    value: format!("{},{}", DEFAULT_CENTER.0, DEFAULT_CENTER.1),
                    reason: e.to_string(),
                }
            })?,
        };

        let mut maps = MapsConfig::new(api_key);
        if let Some(url) = get(MAPS_BASE_URL_VAR) {
            maps = maps.with_base_url(url);
        }
        if let Some(secs) = parse_var::<u64>(HTTP_TIMEOUT_VAR, get(HTTP_TIMEOUT_VAR))? {
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    var: HTTP_TIMEOUT_VAR,
                    value: secs.to_string(),
                    reason: "must be at least one second".into(),
                });
            }
            maps = maps.with_timeout(secs);
        }

        let defaults = SearchConfig::default();
        let mut search = SearchConfig::new(
            parse_var(SEARCH_START_VAR, get(SEARCH_START_VAR))?
                .unwrap_or(defaults.start_radius_degrees),
            parse_var(SEARCH_STEP_VAR, get(SEARCH_STEP_VAR))?.unwrap_or(defaults.step_degrees),
            parse_var(SEARCH_MAX_VAR, get(SEARCH_MAX_VAR))?.unwrap_or(defaults.max_radius_degrees),
        );
        if let Some(language) = get(SEARCH_LANGUAGE_VAR) {
            search = search.with_language(language);
        }
        search.validate()?;

        Ok(Self {
            bind_addr,
            static_dir,
            default_center,
            maps,
            search,
        })
    }
}

fn parse_var<T>(var: &'static str, value: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.map(|value| parse_value(var, value)).transpose()
}

fn parse_value<T>(var: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let parsed = value.trim().parse::<T>();
    match parsed {
        Ok(parsed) => Ok(parsed),
        Err(e) => Err(ConfigError::Invalid {
            var,
            value,
            reason: e.to_string(),
        }),
    }
}
