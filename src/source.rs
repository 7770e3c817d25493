//! Content sources.
//!
//! A [`ContentSource`] answers list and single-record requests for a CMS
//! endpoint with raw JSON. Implementations:
//!
//! | Source | Used when |
//! |--------|-----------|
//! | [`CmsSource`] | normal operation, talks HTTP to the CMS |
//! | [`DummySource`] | safe mode, generic placeholders, no network |
//! | [`MockSource`] | mock mode, built-in fixtures for `cases`/`capabilities` |
//! | [`FallbackSource`] | wraps another source, serving fixtures when it fails |
//!
//! The HTTP proxy uses [`build_proxy_source`], which never serves fixtures.
//! Everything else goes through [`build_source`].

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use showcase_core::mock;
use std::sync::Arc;

use crate::cms::{CmsClient, CmsError};
use crate::config::Config;

/// Query parameters, in request order.
pub type Queries = [(String, String)];

#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &str;

    /// Lists records of `endpoint`.
    async fn list(&self, endpoint: &str, queries: &Queries) -> Result<Value, CmsError>;

    /// Fetches record `id` of `endpoint`.
    async fn get(&self, endpoint: &str, id: &str, queries: &Queries) -> Result<Value, CmsError>;
}

pub struct CmsSource {
    client: CmsClient,
}

impl CmsSource {
    pub fn new(client: CmsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContentSource for CmsSource {
    fn name(&self) -> &str {
        "cms"
    }

    async fn list(&self, endpoint: &str, queries: &Queries) -> Result<Value, CmsError> {
        self.client.fetch(endpoint, None, queries).await
    }

    async fn get(&self, endpoint: &str, id: &str, queries: &Queries) -> Result<Value, CmsError> {
        self.client.fetch(endpoint, Some(id), queries).await
    }
}

/// Safe-mode source: placeholder records for any endpoint.
pub struct DummySource;

#[async_trait]
impl ContentSource for DummySource {
    fn name(&self) -> &str {
        "dummy"
    }

    async fn list(&self, endpoint: &str, _queries: &Queries) -> Result<Value, CmsError> {
        tracing::debug!(endpoint, "serving dummy list");
        Ok(mock::dummy_list(endpoint, Utc::now()))
    }

    async fn get(&self, endpoint: &str, id: &str, _queries: &Queries) -> Result<Value, CmsError> {
        tracing::debug!(endpoint, id, "serving dummy item");
        Ok(mock::dummy_item(endpoint, id, Utc::now()))
    }
}

/// Stands in for the CMS when no credentials are configured.
struct UnconfiguredSource;

#[async_trait]
impl ContentSource for UnconfiguredSource {
    fn name(&self) -> &str {
        "unconfigured"
    }

    async fn list(&self, _endpoint: &str, _queries: &Queries) -> Result<Value, CmsError> {
        Err(CmsError::MissingCredentials)
    }

    async fn get(&self, _endpoint: &str, _id: &str, _queries: &Queries) -> Result<Value, CmsError> {
        Err(CmsError::MissingCredentials)
    }
}

/// Mock-mode source.
///
/// `cases` and `capabilities` are answered from fixtures (an unknown id
/// yields the first fixture). Other endpoints go to `inner`.
pub struct MockSource {
    inner: Arc<dyn ContentSource>,
}

impl MockSource {
    pub fn new(inner: Arc<dyn ContentSource>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ContentSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn list(&self, endpoint: &str, queries: &Queries) -> Result<Value, CmsError> {
        match mock::mock_list(endpoint) {
            Some(value) => {
                tracing::debug!(endpoint, "serving mock list");
                Ok(value)
            }
            None => self.inner.list(endpoint, queries).await,
        }
    }

    async fn get(&self, endpoint: &str, id: &str, queries: &Queries) -> Result<Value, CmsError> {
        match mock::mock_item(endpoint, id) {
            Some(value) => Ok(value),
            None => self.inner.get(endpoint, id, queries).await,
        }
    }
}

/// Serves fixtures when the wrapped source fails.
///
/// Lists of `cases`/`capabilities` fall back to the fixture list. A single
/// record falls back only when a fixture with that exact id exists. All
/// other failures propagate.
pub struct FallbackSource {
    inner: Arc<dyn ContentSource>,
}

impl FallbackSource {
    pub fn new(inner: Arc<dyn ContentSource>) -> Self {
        Self { inner }
    }
}

fn exact_fixture(endpoint: &str, id: &str) -> Option<Value> {
    mock::mock_item(endpoint, id).filter(|v| v.get("id").and_then(Value::as_str) == Some(id))
}

#[async_trait]
impl ContentSource for FallbackSource {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn list(&self, endpoint: &str, queries: &Queries) -> Result<Value, CmsError> {
        match self.inner.list(endpoint, queries).await {
            Ok(value) => Ok(value),
            Err(err) => match mock::mock_list(endpoint) {
                Some(value) => {
                    tracing::warn!(endpoint, error = %err, "using fallback data");
                    Ok(value)
                }
                None => Err(err),
            },
        }
    }

    async fn get(&self, endpoint: &str, id: &str, queries: &Queries) -> Result<Value, CmsError> {
        match self.inner.get(endpoint, id, queries).await {
            Ok(value) => Ok(value),
            Err(err) => match exact_fixture(endpoint, id) {
                Some(value) => {
                    tracing::warn!(endpoint, id, error = %err, "using fallback data");
                    Ok(value)
                }
                None => Err(err),
            },
        }
    }
}

fn cms_source(config: &Config) -> Result<Arc<dyn ContentSource>, CmsError> {
    let client = CmsClient::from_config(&config.cms)?;
    tracing::debug!(api_root = client.api_root(), "CMS client ready");
    Ok(Arc::new(CmsSource::new(client)))
}

/// Source for application reads: safe mode, then mock mode, then the CMS
/// (wrapped in [`FallbackSource`] when `content.fallback` is set).
pub fn build_source(config: &Config) -> Result<Arc<dyn ContentSource>> {
    if config.content.safe_mode {
        return Ok(Arc::new(DummySource));
    }

    if config.content.use_mock_data {
        let inner: Arc<dyn ContentSource> = if config.cms.has_credentials() {
            cms_source(config)?
        } else {
            Arc::new(UnconfiguredSource)
        };
        return Ok(Arc::new(MockSource::new(inner)));
    }

    if !config.cms.has_credentials() {
        bail!(CmsError::MissingCredentials);
    }
    let source = cms_source(config)?;
    if config.content.fallback {
        Ok(Arc::new(FallbackSource::new(source)))
    } else {
        Ok(source)
    }
}

/// Source for the HTTP proxy: placeholders in safe mode, otherwise the CMS
/// with no fixture fallback. Missing credentials are a startup error,
/// except in mock mode where each proxy request fails instead.
pub fn build_proxy_source(config: &Config) -> Result<Arc<dyn ContentSource>> {
    if config.content.safe_mode {
        return Ok(Arc::new(DummySource));
    }
    if config.cms.has_credentials() {
        return Ok(cms_source(config)?);
    }
    if config.content.use_mock_data {
        tracing::warn!("CMS credentials missing; proxy endpoints will return errors");
        return Ok(Arc::new(UnconfiguredSource));
    }
    bail!(CmsError::MissingCredentials)
}
