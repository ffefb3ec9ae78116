//! Platform API client.
//!
//! Releases from this API reference a slug; the commit lives on the slug and
//! needs a second request. Release lists are paginated through the `Range` /
//! `Next-Range` headers.

use super::{ReleaseApi, base_url, http_client, send};
use crate::config::PlatformConfig;
use crate::error::{ApiError, Result};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, RANGE};
use serde::Deserialize;

const ACCEPT_V3: &str = "application/vnd.heroku+json; version=3";
const FIRST_PAGE: &str = "version ..; order=asc";
/// Upper bound on followed pages, guards against a server that never stops paginating
const MAX_PAGES: usize = 1000;

/// Release as returned by the platform API
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformRelease {
    /// Release version number (`v42` is version 42)
    pub version: u64,
    /// Slug this release runs, absent for releases without a build
    #[serde(default)]
    pub slug: Option<SlugRef>,
}

/// Reference to a slug from a release
#[derive(Debug, Clone, Deserialize)]
pub struct SlugRef {
    /// Slug identifier
    pub id: String,
}

/// Slug details
#[derive(Debug, Clone, Deserialize)]
pub struct SlugInfo {
    /// Commit the slug was built from
    #[serde(default)]
    pub commit: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlatformApp {
    git_url: String,
}

/// Client for the platform API
#[derive(Debug, Clone)]
pub struct PlatformClient {
    http: reqwest::Client,
    base_url: String,
    host: String,
}

impl PlatformClient {
    /// Create a client from configuration
    ///
    /// Fails without an API key: the platform API rejects anonymous requests.
    pub fn new(config: &PlatformConfig) -> Result<Self> {
        let key = config.api_key.as_deref().ok_or_else(|| ApiError::ClientInit {
            reason: "no API key configured".to_string(),
        })?;
        let base_url = base_url(config)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_V3));
        let mut auth = HeaderValue::from_str(&format!("Bearer {key}")).map_err(|e| {
            ApiError::ClientInit {
                reason: format!("invalid API key: {e}"),
            }
        })?;
        auth.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth);

        Ok(Self {
            http: http_client(config, headers)?,
            base_url,
            host: config.api_host(),
        })
    }

    /// List all releases of an app, oldest first, following pagination
    pub async fn get_releases(&self, app: &str) -> Result<Vec<PlatformRelease>> {
        let url = format!("{}/apps/{}/releases", self.base_url, app);
        let mut releases = Vec::new();
        let mut range = FIRST_PAGE.to_string();

        for _ in 0..MAX_PAGES {
            let request = self.http.get(&url).header(RANGE, range.as_str());
            let response = send(request, &url, &self.host, || ApiError::AppNotFound {
                app: app.to_string(),
            })
            .await?;

            let next = response
                .headers()
                .get("Next-Range")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let partial = response.status() == reqwest::StatusCode::PARTIAL_CONTENT;

            let mut page: Vec<PlatformRelease> = response.json().await?;
            releases.append(&mut page);

            match next {
                Some(next) if partial => range = next,
                _ => return Ok(releases),
            }
        }

        log::warn!("Stopped following release pages for {} after {} pages", app, MAX_PAGES);
        Ok(releases)
    }

    /// Fetch one release by name (`v42`) or bare version (`42`)
    pub async fn get_release(&self, app: &str, release: &str) -> Result<PlatformRelease> {
        let version = release.strip_prefix('v').unwrap_or(release);
        let url = format!("{}/apps/{}/releases/{}", self.base_url, app, version);
        let response = send(self.http.get(&url), &url, &self.host, || {
            ApiError::ReleaseNotFound {
                app: app.to_string(),
                release: release.to_string(),
            }
        })
        .await?;
        Ok(response.json().await?)
    }

    /// Fetch slug details
    pub async fn get_slug(&self, app: &str, slug_id: &str) -> Result<SlugInfo> {
        let url = format!("{}/apps/{}/slugs/{}", self.base_url, app, slug_id);
        let response = send(self.http.get(&url), &url, &self.host, || ApiError::SlugNotFound {
            app: app.to_string(),
            slug: slug_id.to_string(),
        })
        .await?;
        Ok(response.json().await?)
    }
}

impl ReleaseApi for PlatformClient {
    async fn release_commit(&self, app: &str, release: Option<&str>) -> Result<String> {
        let record = match release {
            Some(name) => self.get_release(app, name).await?,
            None => self
                .get_releases(app)
                .await?
                .pop()
                .ok_or_else(|| ApiError::NoReleases {
                    app: app.to_string(),
                })?,
        };

        let missing = || ApiError::MissingCommit {
            app: app.to_string(),
            release: format!("v{}", record.version),
        };

        let slug = record.slug.as_ref().ok_or_else(missing)?;
        let info = self.get_slug(app, &slug.id).await?;
        log::debug!("Release v{} of {} is slug {} at {:?}", record.version, app, slug.id, info.commit);

        match info.commit {
            Some(commit) if !commit.is_empty() => Ok(commit),
            _ => Err(missing().into()),
        }
    }

    async fn git_url(&self, app: &str) -> Result<String> {
        let url = format!("{}/apps/{}", self.base_url, app);
        let response = send(self.http.get(&url), &url, &self.host, || ApiError::AppNotFound {
            app: app.to_string(),
        })
        .await?;
        let info: PlatformApp = response.json().await?;
        Ok(info.git_url)
    }
}
