//! Legacy REST API client.
//!
//! Release records from this API carry the deployed commit directly.

use super::{ReleaseApi, base_url, http_client, send};
use crate::config::PlatformConfig;
use crate::error::{ApiError, Result};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Deserialize;

/// Release as returned by the legacy API
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyRelease {
    /// Release name, e.g. `v42`
    pub name: String,
    /// Short commit SHA
    #[serde(default)]
    pub commit: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LegacyApp {
    git_url: String,
}

/// Client for the legacy REST API
#[derive(Debug, Clone)]
pub struct LegacyClient {
    http: reqwest::Client,
    base_url: String,
    host: String,
    api_key: Option<String>,
}

impl LegacyClient {
    /// Create a client from configuration
    pub fn new(config: &PlatformConfig) -> Result<Self> {
        let base_url = base_url(config)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Ok(Self {
            http: http_client(config, headers)?,
            base_url,
            host: config.api_host(),
            api_key: config.api_key.clone(),
        })
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.http.get(url);
        match &self.api_key {
            Some(key) => request.basic_auth("", Some(key)),
            None => request,
        }
    }

    /// List all releases of an app, oldest first
    pub async fn get_releases(&self, app: &str) -> Result<Vec<LegacyRelease>> {
        let url = format!("{}/apps/{}/releases", self.base_url, app);
        let response = send(self.get(&url), &url, &self.host, || ApiError::AppNotFound {
            app: app.to_string(),
        })
        .await?;
        Ok(response.json().await?)
    }

    /// Fetch one release by name
    pub async fn get_release(&self, app: &str, release: &str) -> Result<LegacyRelease> {
        let url = format!("{}/apps/{}/releases/{}", self.base_url, app, release);
        let response = send(self.get(&url), &url, &self.host, || ApiError::ReleaseNotFound {
            app: app.to_string(),
            release: release.to_string(),
        })
        .await?;
        Ok(response.json().await?)
    }
}

impl ReleaseApi for LegacyClient {
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

        log::debug!("Release {} of {} is at {:?}", record.name, app, record.commit);
        record
            .commit
            .filter(|c| !c.is_empty())
            .ok_or_else(|| {
                ApiError::MissingCommit {
                    app: app.to_string(),
                    release: record.name,
                }
                .into()
            })
    }

    async fn git_url(&self, app: &str) -> Result<String> {
        let url = format!("{}/apps/{}", self.base_url, app);
        let response = send(self.get(&url), &url, &self.host, || ApiError::AppNotFound {
            app: app.to_string(),
        })
        .await?;
        let info: LegacyApp = response.json().await?;
        Ok(info.git_url)
    }
}
