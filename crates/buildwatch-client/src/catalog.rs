//! Build catalog HTTP client
//!
//! Lists builds from a catalog service over HTTP and exposes them as a
//! [`BuildSource`]. Paginated responses are followed to the end so callers
//! always see the complete, ascending list.

use async_trait::async_trait;
use buildwatch_core::{BuildLookup, BuildSource, RemoteBuild, SourceError};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ClientError;
use crate::Result;

/// Environment variable holding the catalog base URL.
pub const API_URL_ENV: &str = "BUILDWATCH_API_URL";
/// Environment variable holding the bearer token.
pub const API_TOKEN_ENV: &str = "BUILDWATCH_API_TOKEN";

/// Upper bound on followed `next` links for one lookup.
pub const MAX_PAGES: usize = 200;

/// Catalog client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Catalog base URL, e.g. `https://builds.example.com/v1`
    pub base_url: String,
    /// Bearer token (optional for public catalogs)
    pub token: Option<String>,
}

impl ClientConfig {
    /// Create config for a specific server
    pub fn new(base_url: &str) -> Self {
        ClientConfig {
            base_url: base_url.to_string(),
            token: None,
        }
    }

    /// Create a config from `BUILDWATCH_API_URL` / `BUILDWATCH_API_TOKEN`.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(API_URL_ENV)
            .map_err(|_| ClientError::InvalidUrl(format!("{API_URL_ENV} is not set")))?;
        Ok(ClientConfig {
            base_url,
            token: std::env::var(API_TOKEN_ENV).ok(),
        })
    }

    /// Set authentication token
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }
}

/// One page of the catalog's build listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildPage {
    pub data: Vec<RemoteBuild>,
    /// Absolute URL of the next page, if any.
    #[serde(default)]
    pub next: Option<String>,
}

/// HTTP client for the build catalog
pub struct BuildCatalogClient {
    base_url: Url,
    token: Option<String>,
    http_client: reqwest::Client,
}

impl BuildCatalogClient {
    /// Create a new catalog client
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(config.base_url));
        }

        let http_client = reqwest::Client::builder()
            .user_agent(concat!("buildwatch-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(BuildCatalogClient {
            base_url,
            token: config.token,
            http_client,
        })
    }

    /// Create client from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// URL of the first listing page for `lookup`.
    ///
    /// `GET {base}/apps/{app_id}/builds?version=..&build_number=..&platform=..&sort=uploadedDate`
    pub fn builds_url(&self, lookup: &BuildLookup) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["apps", lookup.app_id.as_str(), "builds"]);

        {
            let mut query = url.query_pairs_mut();
            if let Some(version) = &lookup.version {
                query.append_pair("version", version.as_str());
            }
            if let Some(build_number) = &lookup.build_number {
                query.append_pair("build_number", build_number.as_str());
            }
            if let Some(platform) = lookup.platform {
                query.append_pair("platform", platform.as_str());
            }
            // Oldest first: the matcher treats the last build as the newest.
            query.append_pair("sort", "uploadedDate");
        }

        Ok(url)
    }

    /// Fetch every page for `lookup` and concatenate the builds.
    pub async fn list_all(&self, lookup: &BuildLookup) -> Result<Vec<RemoteBuild>> {
        let mut builds = Vec::new();
        let mut next = Some(self.builds_url(lookup)?);
        let mut pages = 0;

        while let Some(url) = next.take() {
            if pages == MAX_PAGES {
                return Err(ClientError::TooManyPages(MAX_PAGES));
            }
            pages += 1;

            let page = self.fetch_page(url).await?;
            builds.extend(page.data);
            next = page
                .next
                .map(|n| self.next_page_url(&n))
                .transpose()?;
        }

        info!(
            app_id = %lookup.app_id,
            pages = pages,
            builds = builds.len(),
            "Listed builds from catalog"
        );
        Ok(builds)
    }

    /// Resolve a `next` link against the base URL.
    ///
    /// The bearer token is sent with every page, so links leaving the
    /// catalog's origin are refused.
    pub fn next_page_url(&self, next: &str) -> Result<Url> {
        let url = self
            .base_url
            .join(next)
            .map_err(|e| ClientError::InvalidUrl(format!("{next}: {e}")))?;
        if url.origin() != self.base_url.origin() {
            return Err(ClientError::InvalidUrl(format!(
                "next page {url} is outside {}",
                self.base_url.origin().ascii_serialization()
            )));
        }
        Ok(url)
    }

    async fn fetch_page(&self, url: Url) -> Result<BuildPage> {
        debug!(url = %url, "Fetching build page");

        let mut request = self.http_client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::Status {
                code: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl BuildSource for BuildCatalogClient {
    async fn list_builds(
        &self,
        lookup: &BuildLookup,
    ) -> std::result::Result<Vec<RemoteBuild>, SourceError> {
        Ok(self.list_all(lookup).await?)
    }
}
