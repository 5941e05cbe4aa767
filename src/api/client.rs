//! Microsoft Graph / AAD Graph HTTP client

use crate::error::ApiError;
use crate::models::ODataResponse;
use reqwest::{Certificate, Client, Response};
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::time::Duration;

/// Transport settings passed to every client at construction
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout: Duration,
    pub user_agent: String,
    /// Extra PEM root certificate, for TLS-intercepting proxies
    pub ca_certificate: Option<PathBuf>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(50),
            user_agent: format!("mfa-report/{}", env!("CARGO_PKG_VERSION")),
            ca_certificate: None,
        }
    }
}

/// Authenticated client bound to one API root
pub struct GraphClient {
    http_client: Client,
    base_url: String,
    token: String,
}

impl GraphClient {
    /// Create a client for `base_url` (e.g. `https://graph.microsoft.com`)
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        config: &HttpConfig,
    ) -> Result<Self, ApiError> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout);

        if let Some(path) = &config.ca_certificate {
            let pem = std::fs::read(path)
                .map_err(|e| ApiError::Certificate(format!("{}: {}", path.display(), e)))?;
            let certificate = Certificate::from_pem(&pem)
                .map_err(|e| ApiError::Certificate(format!("{}: {}", path.display(), e)))?;
            tracing::info!("Using custom CA certificate {}", path.display());
            builder = builder.add_root_certificate(certificate);
        }

        Ok(Self {
            http_client: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http") {
            endpoint.to_string()
        } else {
            format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
        }
    }

    /// Make an authenticated GET request
    pub async fn get(&self, endpoint: &str) -> Result<Response, ApiError> {
        let url = self.url_for(endpoint);
        tracing::debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, url, body });
        }

        Ok(response)
    }

    /// Make an authenticated GET request and deserialize JSON response
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let response = self.get(endpoint).await?;
        Ok(response.json::<T>().await?)
    }

    /// GET a collection, following next links until the last page
    pub async fn get_paged<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Vec<T>, ApiError> {
        let mut items = Vec::new();
        let mut next = Some(endpoint.to_string());

        while let Some(current) = next.take() {
            let page: ODataResponse<T> = self.get_json(&current).await?;
            items.extend(page.value);

            let Some(link) = page.next_link else {
                break;
            };
            let resolved = self.resolve_next_link(endpoint, &link);
            if self.url_for(&resolved) == self.url_for(&current) {
                tracing::warn!("Next link {} repeats the current page, stopping", resolved);
                break;
            }
            next = Some(resolved);
        }

        Ok(items)
    }

    /// AAD Graph returns next links relative to the tenant root and without `api-version`
    fn resolve_next_link(&self, endpoint: &str, link: &str) -> String {
        if link.starts_with("http") {
            return link.to_string();
        }

        let (path, query) = endpoint.split_once('?').unwrap_or((endpoint, ""));
        let root = path.trim_start_matches('/').split('/').next().unwrap_or_default();
        let mut url = format!("{}/{}/{}", self.base_url, root, link.trim_start_matches('/'));

        if !url.contains("api-version=") {
            if let Some(version) = query.split('&').find(|p| p.starts_with("api-version=")) {
                url.push(if url.contains('?') { '&' } else { '?' });
                url.push_str(version);
            }
        }

        url
    }
}
