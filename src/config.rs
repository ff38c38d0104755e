use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_BASE_URL;

// ---------------------------------------------------------------------------
// Config file (~/.config/chirptui/config.toml)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_tick_rate")]
    pub tick_rate_fps: f64,
    #[serde(default)]
    pub default_view: DefaultView,
    /// Response caching + request throttling for the API client.
    /// Off by default; the backend dataset is tiny and append-only.
    #[serde(default)]
    pub cache_enabled: bool,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_request_interval_ms")]
    pub request_interval_ms: u64,
    /// Identity shown on the profile view. A stand-in for real session
    /// wiring; configurable rather than baked into the controllers.
    #[serde(default)]
    pub profile: ProfileIdentity,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultView {
    #[default]
    Home,
    Tweets,
    Profile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileIdentity {
    #[serde(default = "default_profile_id")]
    pub id: String,
    #[serde(default = "default_profile_name")]
    pub name: String,
    #[serde(default = "default_profile_username")]
    pub username: String,
}

fn default_tick_rate() -> f64 {
    30.0
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_request_interval_ms() -> u64 {
    1000
}

fn default_profile_id() -> String {
    "2244994945".to_owned()
}

fn default_profile_name() -> String {
    "X Developers".to_owned()
}

fn default_profile_username() -> String {
    "XDevelopers".to_owned()
}

impl Default for ProfileIdentity {
    fn default() -> Self {
        Self {
            id: default_profile_id(),
            name: default_profile_name(),
            username: default_profile_username(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_rate_fps: default_tick_rate(),
            default_view: DefaultView::default(),
            cache_enabled: false,
            cache_ttl_secs: default_cache_ttl_secs(),
            request_interval_ms: default_request_interval_ms(),
            profile: ProfileIdentity::default(),
        }
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config/chirptui/config.toml"))
}

pub fn load_config() -> AppConfig {
    let Some(path) = config_path() else {
        return AppConfig::default();
    };

    let Ok(contents) = fs::read_to_string(&path) else {
        return AppConfig::default();
    };

    toml::from_str(&contents).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// API settings (environment / .env)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub api_key: Option<String>,
}

/// Candidate .env paths in priority order.
fn env_file_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".config/chirptui/.env"));
    }
    paths.push(PathBuf::from(".env"));
    paths
}

/// Load API settings from the environment, trying .env files first.
///
/// Earlier files have higher priority because dotenvy does not overwrite
/// variables that are already set. A missing CHIRP_API_KEY is a valid
/// unauthenticated configuration.
pub fn load_api_settings() -> ApiSettings {
    for path in env_file_paths() {
        if path.exists() {
            let _ = dotenvy::from_path(&path);
        }
    }

    let get = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

    ApiSettings {
        base_url: get("CHIRP_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
        api_key: get("CHIRP_API_KEY"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!(!config.cache_enabled);
        assert_eq!(config.cache_ttl_secs, 300);
        assert_eq!(config.request_interval_ms, 1000);
        assert_eq!(config.profile.id, "2244994945");
        assert_eq!(config.profile.name, "X Developers");
    }

    #[test]
    fn partial_profile_fills_remaining_fields() {
        let config: AppConfig = toml::from_str("[profile]\nid = \"42\"").unwrap();
        assert_eq!(config.profile.id, "42");
        assert_eq!(config.profile.username, "XDevelopers");
    }

    #[test]
    fn cache_settings_parse() {
        let config: AppConfig =
            toml::from_str("cache_enabled = true\ncache_ttl_secs = 60").unwrap();
        assert!(config.cache_enabled);
        assert_eq!(config.cache_ttl_secs, 60);
    }
}
