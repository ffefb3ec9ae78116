//! Platform API backends.
//!
//! Two clients speak to the platform: the legacy REST API, whose releases carry
//! their commit directly, and the platform API, whose releases point at a slug
//! that has to be looked up separately. Both are hidden behind [`ReleaseApi`],
//! and [`ApiBackend`] picks one of them once per invocation.

mod legacy;
mod platform;

pub use legacy::{LegacyClient, LegacyRelease};
pub use platform::{PlatformClient, PlatformRelease, SlugInfo, SlugRef};

use crate::config::PlatformConfig;
use crate::error::{ApiError, Result};
use std::future::Future;
use std::time::Duration;

const USER_AGENT: &str = concat!("kodegen_platform_remote/", env!("CARGO_PKG_VERSION"));

/// The capability every backend provides
pub trait ReleaseApi {
    /// Commit of the named release, or of the latest release when `release` is `None`
    fn release_commit(
        &self,
        app: &str,
        release: Option<&str>,
    ) -> impl Future<Output = Result<String>>;

    /// Git repository URL of the app
    fn git_url(&self, app: &str) -> impl Future<Output = Result<String>>;
}

/// Backend chosen for this invocation
#[derive(Debug, Clone)]
pub enum ApiBackend {
    /// Legacy REST API (direct commit field)
    Legacy(LegacyClient),
    /// Platform API (slug indirection)
    Platform(PlatformClient),
}

impl ApiBackend {
    /// Select the backend for this invocation
    ///
    /// The platform client is preferred. Any failure to bring it up falls back
    /// to the legacy client without surfacing an error.
    pub fn select(config: &PlatformConfig) -> Result<Self> {
        if config.force_legacy {
            log::debug!("PLATFORM_LEGACY_API set, using legacy API client");
            return Ok(Self::Legacy(LegacyClient::new(config)?));
        }

        match PlatformClient::new(config) {
            Ok(client) => {
                log::debug!("Using platform API client at {}", config.api_url);
                Ok(Self::Platform(client))
            }
            Err(e) => {
                log::debug!("Platform API client unavailable ({}), using legacy API client", e);
                Ok(Self::Legacy(LegacyClient::new(config)?))
            }
        }
    }

    /// Short backend name for diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            Self::Legacy(_) => "legacy",
            Self::Platform(_) => "platform",
        }
    }
}

impl ReleaseApi for ApiBackend {
    async fn release_commit(&self, app: &str, release: Option<&str>) -> Result<String> {
        match self {
            Self::Legacy(client) => client.release_commit(app, release).await,
            Self::Platform(client) => client.release_commit(app, release).await,
        }
    }

    async fn git_url(&self, app: &str) -> Result<String> {
        match self {
            Self::Legacy(client) => client.git_url(app).await,
            Self::Platform(client) => client.git_url(app).await,
        }
    }
}

/// Validate the configured API URL and strip any trailing slash
fn base_url(config: &PlatformConfig) -> Result<String> {
    url::Url::parse(&config.api_url).map_err(|e| ApiError::ClientInit {
        reason: format!("invalid API URL '{}': {}", config.api_url, e),
    })?;
    Ok(config.api_url.trim_end_matches('/').to_string())
}

/// Build the HTTP client shared by both backends
fn http_client(
    config: &PlatformConfig,
    headers: reqwest::header::HeaderMap,
) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| {
            ApiError::ClientInit {
                reason: e.to_string(),
            }
            .into()
        })
}

/// Send a request and map failure statuses onto [`ApiError`]
///
/// `not_found` builds the error for a 404 so each call site can name what was missing.
async fn send(
    request: reqwest::RequestBuilder,
    url: &str,
    host: &str,
    not_found: impl FnOnce() -> ApiError,
) -> Result<reqwest::Response> {
    log::debug!("GET {url}");
    let response = request.send().await?;
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    log::debug!("{} from {}: {}", status, url, body.trim());

    let err = match status {
        reqwest::StatusCode::NOT_FOUND => not_found(),
        reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
            ApiError::Unauthorized {
                host: host.to_string(),
            }
        }
        _ => ApiError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_string(),
        },
    };
    Err(err.into())
}
