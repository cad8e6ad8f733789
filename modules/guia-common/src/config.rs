use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};
use guia_zones::{is_valid_radius, ZoneProfile};
use tracing::warn;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database_url: String,

    // Web server
    pub api_host: String,
    pub api_port: u16,

    // Local language model
    pub ollama_url: String,
    pub ollama_model: String,

    // Places import
    pub google_places_api_key: Option<String>,

    // Zones
    pub zone_profile: ZoneProfile,
    pub zone_radius_km: f64,

    // Chat
    pub chat_history_limit: usize,

    // CORS
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: env::var("API_PORT")
                .unwrap_or_else(|_| "5001".to_string())
                .parse()
                .context("API_PORT must be a number")?,
            ollama_url: env::var("OLLAMA_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            ollama_model: env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3.2:3b".to_string()),
            google_places_api_key: env::var("GOOGLE_PLACES_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            zone_profile: env::var("ZONE_PROFILE")
                .ok()
                .map(|p| p.parse::<ZoneProfile>())
                .transpose()?
                .unwrap_or(ZoneProfile::HuelvaCapital),
            zone_radius_km: tunable_where("ZONE_RADIUS_KM", 2.0, |km| is_valid_radius(*km)),
            chat_history_limit: tunable("CHAT_HISTORY_LIMIT", 20),
            allowed_origins: parse_origins(&env::var("ALLOWED_ORIGINS").unwrap_or_default()),
        })
    }
}

/// Read an optional setting, falling back to `default` when unset or unparseable.
fn tunable<T: FromStr + Copy + std::fmt::Display>(name: &str, default: T) -> T {
    tunable_where(name, default, |_| true)
}

/// Like [`tunable`], but values failing `accept` also fall back to `default`.
fn tunable_where<T, F>(name: &str, default: T, accept: F) -> T
where
    T: FromStr + Copy + std::fmt::Display,
    F: Fn(&T) -> bool,
{
    env::var(name).map_or(default, |raw| parse_tunable(name, &raw, default, accept))
}

fn parse_tunable<T, F>(name: &str, raw: &str, default: T, accept: F) -> T
where
    T: FromStr + Copy + std::fmt::Display,
    F: Fn(&T) -> bool,
{
    match raw.trim().parse::<T>() {
        Ok(value) if accept(&value) => value,
        _ => {
            warn!(name, value = %raw, %default, "Invalid setting, using default");
            default
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
