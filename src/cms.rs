//! HTTP client for the headless CMS content API.
//!
//! Every call is a `GET {api_root}/{endpoint}[/{content_id}]` carrying the
//! `X-MICROCMS-API-KEY` header, with caller query parameters forwarded
//! verbatim. Bodies are returned as raw JSON; typed decoding happens in
//! [`crate::content`].

use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::config::CmsConfig;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-MICROCMS-API-KEY";

#[derive(Debug, Error)]
pub enum CmsError {
    #[error("CMS credentials missing: set cms.service_domain (or cms.base_url) and cms.api_key")]
    MissingCredentials,

    #[error("invalid endpoint: {0:?}")]
    InvalidEndpoint(String),

    #[error("invalid content id: {0:?}")]
    InvalidContentId(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid response format")]
    InvalidFormat,
}

/// Whether `endpoint` is a single safe path segment.
///
/// Only ASCII letters, digits, `_` and `-` are accepted, which rules out
/// empty names, `/`, and `..`.
pub fn is_valid_endpoint(endpoint: &str) -> bool {
    !endpoint.is_empty()
        && endpoint
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

#[derive(Debug, Clone)]
pub struct CmsClient {
    http: reqwest::Client,
    api_root: String,
    api_key: String,
}

impl CmsClient {
    /// Builds a client from config. Fails when the API root or key is not
    /// configured.
    pub fn from_config(config: &CmsConfig) -> Result<Self, CmsError> {
        let api_root = config.api_root().ok_or(CmsError::MissingCredentials)?;
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(CmsError::MissingCredentials)?
            .to_string();

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(CmsError::Client)?;

        Ok(Self {
            http,
            api_root,
            api_key,
        })
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    fn url(&self, endpoint: &str, content_id: Option<&str>) -> Result<String, CmsError> {
        if !is_valid_endpoint(endpoint) {
            return Err(CmsError::InvalidEndpoint(endpoint.to_string()));
        }
        match content_id {
            Some(id) if !is_valid_endpoint(id) => Err(CmsError::InvalidContentId(id.to_string())),
            Some(id) => Ok(format!("{}/{}/{}", self.api_root, endpoint, id)),
            None => Ok(format!("{}/{}", self.api_root, endpoint)),
        }
    }

    /// Fetches a list (`content_id = None`) or a single record.
    pub async fn fetch(
        &self,
        endpoint: &str,
        content_id: Option<&str>,
        queries: &[(String, String)],
    ) -> Result<Value, CmsError> {
        let url = self.url(endpoint, content_id)?;
        tracing::debug!(%url, params = queries.len(), "CMS request");

        let response = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(queries)
            .send()
            .await
            .map_err(|source| CmsError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CmsError::Status { url, status });
        }

        response
            .json::<Value>()
            .await
            .map_err(|source| CmsError::Decode { url, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> CmsConfig {
        CmsConfig {
            base_url: Some(base_url.to_string()),
            api_key: Some("key".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_is_valid_endpoint() {
        for ok in ["cases", "ai-capabilities", "news_2024", "A1"] {
            assert!(is_valid_endpoint(ok), "{ok}");
        }
        for bad in ["", "a/b", "..", "../etc", "cases?x=1", "ケース", "a b"] {
            assert!(!is_valid_endpoint(bad), "{bad}");
        }
    }

    #[test]
    fn test_missing_credentials() {
        let err = CmsClient::from_config(&CmsConfig::default()).unwrap_err();
        assert!(matches!(err, CmsError::MissingCredentials));

        let mut cfg = config("http://localhost");
        cfg.api_key = Some(" ".into());
        assert!(matches!(
            CmsClient::from_config(&cfg),
            Err(CmsError::MissingCredentials)
        ));
    }

    #[test]
    fn test_url_building() {
        let client = CmsClient::from_config(&config("http://localhost:9/api/v1/")).unwrap();
        assert_eq!(client.api_root(), "http://localhost:9/api/v1");
        assert_eq!(client.url("cases", None).unwrap(), "http://localhost:9/api/v1/cases");
        assert_eq!(
            client.url("cases", Some("abc-1")).unwrap(),
            "http://localhost:9/api/v1/cases/abc-1"
        );
        assert!(matches!(
            client.url("..", None),
            Err(CmsError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            client.url("cases", Some("../x")),
            Err(CmsError::InvalidContentId(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_sends_key_and_queries() {
        use httpmock::prelude::*;

        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/v1/cases")
                    .header("x-microcms-api-key", "key")
                    .query_param("limit", "3");
                then.status(200)
                    .json_body(serde_json::json!({ "contents": [], "totalCount": 0 }));
            })
            .await;

        let client = CmsClient::from_config(&config(&server.url("/api/v1"))).unwrap();
        let body = client
            .fetch("cases", None, &[("limit".into(), "3".into())])
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(body["totalCount"], 0);
    }

    #[tokio::test]
    async fn test_fetch_maps_status_errors() {
        use httpmock::prelude::*;

        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/cases/missing");
                then.status(404);
            })
            .await;

        let client = CmsClient::from_config(&config(&server.url("/api/v1"))).unwrap();
        let err = client.fetch("cases", Some("missing"), &[]).await.unwrap_err();
        match err {
            CmsError::Status { status, .. } => assert_eq!(status, StatusCode::NOT_FOUND),
            other => panic!("unexpected error: {other}"),
        }
    }
}
