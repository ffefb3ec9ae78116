//! Platform configuration resolved from the environment.
//!
//! Every knob has a default so the tool works against the public platform
//! without any setup beyond credentials.

use std::path::Path;

/// Default API endpoint
pub const DEFAULT_API_URL: &str = "https://api.heroku.com";

/// Default host matched in Git remote URLs
pub const DEFAULT_GIT_HOST: &str = "heroku.com";

/// Configuration for talking to the platform
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// API base URL
    pub api_url: String,

    /// API key (bearer token for the platform API, basic-auth password for the legacy API)
    pub api_key: Option<String>,

    /// Host that identifies platform Git remotes
    pub git_host: String,

    /// HTTP request timeout in seconds
    pub timeout_secs: u64,

    /// Force the legacy API client
    pub force_legacy: bool,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            git_host: DEFAULT_GIT_HOST.to_string(),
            timeout_secs: 30,
            force_legacy: false,
        }
    }
}

impl PlatformConfig {
    /// Parse timeout from environment variable with clamping to maximum
    fn parse_timeout_env(var_name: &str, default: u64, max: u64) -> u64 {
        std::env::var(var_name)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(|v| v.clamp(1, max))
            .unwrap_or(default)
    }

    fn parse_flag_env(var_name: &str) -> bool {
        std::env::var(var_name)
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false)
    }

    /// Create config from environment variables with fallback to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let api_url = std::env::var("PLATFORM_API_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.api_url);

        let api_key = std::env::var("PLATFORM_API_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| {
                let host = api_host(&api_url)?;
                let netrc = dirs::home_dir()?.join(".netrc");
                netrc_password(&netrc, &host)
            });

        Self {
            api_url,
            api_key,
            git_host: std::env::var("PLATFORM_GIT_HOST")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.git_host),
            timeout_secs: Self::parse_timeout_env("PLATFORM_API_TIMEOUT", defaults.timeout_secs, 300),
            force_legacy: Self::parse_flag_env("PLATFORM_LEGACY_API"),
        }
    }

    /// Host part of the API URL, used for netrc lookups and error messages
    pub fn api_host(&self) -> String {
        api_host(&self.api_url).unwrap_or_else(|| self.api_url.clone())
    }
}

fn api_host(api_url: &str) -> Option<String> {
    url::Url::parse(api_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
}

fn netrc_password(path: &Path, host: &str) -> Option<String> {
    let contents = std::fs::read_to_string(path).ok()?;
    let password = parse_netrc_password(&contents, host);
    if password.is_some() {
        log::debug!("Using API key for {} from {}", host, path.display());
    }
    password
}

/// Find the password of the `machine` entry matching `host` in netrc text
pub(crate) fn parse_netrc_password(contents: &str, host: &str) -> Option<String> {
    let mut tokens = contents.split_whitespace();
    let mut in_machine = false;

    while let Some(token) = tokens.next() {
        match token {
            "machine" => in_machine = tokens.next() == Some(host),
            "default" => in_machine = false,
            "password" => {
                let value = tokens.next()?;
                if in_machine {
                    return Some(value.to_string());
                }
            }
            "login" | "account" | "macdef" => {
                tokens.next();
            }
            _ => {}
        }
    }

    None
}
