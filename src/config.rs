//! Process-wide settings, read once from the environment (and `.env`).
//!
//! Secrets are optional here; whichever call needs a missing one fails there.

use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{IP_LOOKUP_URL, OPENWEATHER_API_BASE, TWILIO_API_BASE};
use crate::notify::TwilioSettings;

#[derive(Debug, Clone)]
pub struct Config {
    pub weather_api_key: Option<String>,
    pub weather_base_url: String,
    pub twilio: TwilioSettings,
    pub ip_lookup_url: String,
    pub visit_log_path: PathBuf,
    pub cities_csv_path: PathBuf,
    pub map_country: String,
    pub demo_overrides: bool,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weather_api_key: None,
            weather_base_url: OPENWEATHER_API_BASE.to_string(),
            twilio: TwilioSettings::default(),
            ip_lookup_url: IP_LOOKUP_URL.to_string(),
            visit_log_path: PathBuf::from("user_log.csv"),
            cities_csv_path: PathBuf::from("cities.csv"),
            map_country: "India".to_string(),
            demo_overrides: true,
            http_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup so tests need not touch the process env
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let demo_overrides = match get("FLOOD_DEMO_OVERRIDES") {
            Some(v) => parse_bool(&v)
                .ok_or_else(|| anyhow::anyhow!("FLOOD_DEMO_OVERRIDES must be true or false, got {:?}", v))?,
            None => defaults.demo_overrides,
        };

        let http_timeout = match get("FLOOD_HTTP_TIMEOUT_SECS") {
            Some(v) => {
                let secs: u64 = v.trim().parse().map_err(|e| {
                    anyhow::anyhow!("FLOOD_HTTP_TIMEOUT_SECS must be whole seconds, got {:?}: {}", v, e)
                })?;
                if secs == 0 {
                    anyhow::bail!("FLOOD_HTTP_TIMEOUT_SECS must be at least 1");
                }
                Duration::from_secs(secs)
            }
            None => defaults.http_timeout,
        };

        Ok(Self {
            weather_api_key: get("OPENWEATHER_API"),
            weather_base_url: get("OPENWEATHER_BASE_URL").unwrap_or(defaults.weather_base_url),
            twilio: TwilioSettings {
                account_sid: get("TWILIO_SID"),
                auth_token: get("TWILIO_AUTH_TOKEN"),
                from_number: get("TWILIO_NUMBER"),
                to_number: get("TO_NUMBER"),
                base_url: Some(get("TWILIO_BASE_URL").unwrap_or_else(|| TWILIO_API_BASE.to_string())),
            },
            ip_lookup_url: get("IP_LOOKUP_URL").unwrap_or(defaults.ip_lookup_url),
            visit_log_path: get("FLOOD_VISIT_LOG").map(PathBuf::from).unwrap_or(defaults.visit_log_path),
            cities_csv_path: get("FLOOD_CITIES_CSV").map(PathBuf::from).unwrap_or(defaults.cities_csv_path),
            map_country: get("FLOOD_MAP_COUNTRY").unwrap_or(defaults.map_country),
            demo_overrides,
            http_timeout,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
