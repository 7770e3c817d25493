//! Typed reads of CMS content.
//!
//! [`ContentService`] sits on top of a [`ContentSource`] and adds the
//! field projections the site uses, then decodes the JSON into
//! [`showcase_core::models`] types.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use showcase_core::models::{AiCapability, Case, ListResponse};
use std::sync::Arc;

use crate::cms::CmsError;
use crate::source::{ContentSource, Queries};

/// Fields requested for case cards.
pub const CASE_LIST_FIELDS: &[&str] = &[
    "id",
    "title",
    "description",
    "thumbnail",
    "caseType",
    "frameworks",
    "purposeTags",
    "roles",
    "demoType",
];

/// Fields requested for a case detail page.
pub const CASE_DETAIL_FIELDS: &[&str] = &[
    "id",
    "title",
    "description",
    "thumbnail",
    "caseType",
    "coreTechnologies",
    "frameworks",
    "purposeTags",
    "industry",
    "roles",
    "problems",
    "effects",
    "implementationSteps",
    "demoType",
    "demoUrl",
    "videoUrl",
    "body",
    "gallery",
    "relatedArticles.id",
    "relatedArticles.title",
    "relatedArticles.thumbnail",
];

/// Prepends `defaults` to `params`, dropping any default whose key the
/// caller already supplied.
fn with_defaults(defaults: &[(&str, String)], params: &Queries) -> Vec<(String, String)> {
    let mut merged: Vec<(String, String)> = defaults
        .iter()
        .filter(|(key, _)| !params.iter().any(|(k, _)| k == key))
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect();
    merged.extend(params.iter().cloned());
    merged
}

/// Decodes a list body: either the `{contents: [...]}` envelope or a bare
/// JSON array.
pub fn decode_list<T: DeserializeOwned>(value: Value) -> Result<ListResponse<T>> {
    if value.is_array() {
        let contents: Vec<T> =
            serde_json::from_value(value).context("Failed to decode content list")?;
        return Ok(ListResponse::from_contents(contents));
    }
    if !value.get("contents").is_some_and(Value::is_array) {
        return Err(CmsError::InvalidFormat.into());
    }
    serde_json::from_value(value).context("Failed to decode content list")
}

/// Decodes a single-record body.
pub fn decode_item<T: DeserializeOwned>(value: Value) -> Result<T> {
    if !value.is_object() {
        return Err(CmsError::InvalidFormat.into());
    }
    serde_json::from_value(value).context("Failed to decode content record")
}

#[derive(Clone)]
pub struct ContentService {
    source: Arc<dyn ContentSource>,
}

impl ContentService {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self { source }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Case cards. `fields` defaults to [`CASE_LIST_FIELDS`].
    pub async fn get_cases(&self, params: &Queries) -> Result<ListResponse<Case>> {
        let queries = with_defaults(&[("fields", CASE_LIST_FIELDS.join(","))], params);
        let value = self
            .source
            .list("cases", &queries)
            .await
            .context("Failed to fetch cases")?;
        decode_list(value)
    }

    /// One case with every detail field.
    pub async fn get_case_by_id(&self, id: &str) -> Result<Case> {
        let queries = [("fields".to_string(), CASE_DETAIL_FIELDS.join(","))];
        let value = self
            .source
            .get("cases", id, &queries)
            .await
            .with_context(|| format!("Failed to fetch case {}", id))?;
        decode_item(value)
    }

    pub async fn get_capabilities(&self, params: &Queries) -> Result<ListResponse<AiCapability>> {
        let value = self
            .source
            .list("capabilities", params)
            .await
            .context("Failed to fetch capabilities")?;
        decode_list(value)
    }

    /// Every capability, paging through the CMS `limit` cap of 100.
    pub async fn get_all_capabilities(&self) -> Result<Vec<AiCapability>> {
        const PAGE: usize = 100;
        let mut all: Vec<AiCapability> = Vec::new();

        loop {
            let params = [
                ("limit".to_string(), PAGE.to_string()),
                ("offset".to_string(), all.len().to_string()),
            ];
            let page = self.get_capabilities(&params).await?;
            let fetched = page.contents.len();
            all.extend(page.contents);

            if fetched == 0 || fetched < PAGE || all.len() >= page.total_count {
                break;
            }
        }

        tracing::debug!(count = all.len(), "loaded capabilities");
        Ok(all)
    }

    pub async fn get_capability_by_id(&self, id: &str) -> Result<AiCapability> {
        let value = self
            .source
            .get("capabilities", id, &[])
            .await
            .with_context(|| format!("Failed to fetch capability {}", id))?;
        decode_item(value)
    }

    /// Raw list of any endpoint.
    pub async fn get_content(&self, endpoint: &str, params: &Queries) -> Result<Value> {
        self.source
            .list(endpoint, params)
            .await
            .with_context(|| format!("Failed to fetch {}", endpoint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{DummySource, MockSource};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records requests and replies with a fixed body.
    struct Recording {
        body: Value,
        seen: Mutex<Vec<(String, Option<String>, Vec<(String, String)>)>>,
    }

    impl Recording {
        fn new(body: Value) -> Arc<Self> {
            Arc::new(Self {
                body,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ContentSource for Recording {
        fn name(&self) -> &str {
            "recording"
        }
        async fn list(&self, endpoint: &str, queries: &Queries) -> Result<Value, CmsError> {
            self.seen
                .lock()
                .unwrap()
                .push((endpoint.to_string(), None, queries.to_vec()));
            Ok(self.body.clone())
        }
        async fn get(&self, endpoint: &str, id: &str, queries: &Queries) -> Result<Value, CmsError> {
            self.seen.lock().unwrap().push((
                endpoint.to_string(),
                Some(id.to_string()),
                queries.to_vec(),
            ));
            Ok(self.body.clone())
        }
    }

    #[tokio::test]
    async fn test_get_cases_adds_default_fields() {
        let source = Recording::new(json!({ "contents": [{ "id": "a", "title": "A" }], "totalCount": 1 }));
        let service = ContentService::new(source.clone());

        let list = service.get_cases(&[("limit".into(), "2".into())]).await.unwrap();
        assert_eq!(list.contents[0].title, "A");

        let seen = source.seen.lock().unwrap();
        let (endpoint, id, queries) = &seen[0];
        assert_eq!(endpoint, "cases");
        assert!(id.is_none());
        assert_eq!(queries[0].0, "fields");
        assert!(queries[0].1.starts_with("id,title,description,thumbnail,caseType"));
        assert_eq!(queries[1], ("limit".to_string(), "2".to_string()));
    }

    #[tokio::test]
    async fn test_caller_fields_override_default() {
        let source = Recording::new(json!([]));
        let service = ContentService::new(source.clone());

        service
            .get_cases(&[("fields".into(), "id".into())])
            .await
            .unwrap();

        let seen = source.seen.lock().unwrap();
        assert_eq!(seen[0].2, vec![("fields".to_string(), "id".to_string())]);
    }

    #[tokio::test]
    async fn test_get_case_by_id_requests_detail_fields() {
        let source = Recording::new(json!({ "id": "c1", "title": "T", "body": "<p>x</p>" }));
        let service = ContentService::new(source.clone());

        let case = service.get_case_by_id("c1").await.unwrap();
        assert_eq!(case.body, "<p>x</p>");

        let seen = source.seen.lock().unwrap();
        assert_eq!(seen[0].1.as_deref(), Some("c1"));
        assert!(seen[0].2[0].1.ends_with("relatedArticles.thumbnail"));
    }

    #[test]
    fn test_decode_list_shapes() {
        let bare: ListResponse<AiCapability> = decode_list(json!([{ "id": "x" }])).unwrap();
        assert_eq!(bare.total_count, 1);

        let wrapped: ListResponse<AiCapability> =
            decode_list(json!({ "contents": [], "totalCount": 0, "offset": 0, "limit": 10 })).unwrap();
        assert!(wrapped.contents.is_empty());

        let err = decode_list::<AiCapability>(json!({ "message": "nope" })).unwrap_err();
        assert_eq!(err.to_string(), "invalid response format");

        assert!(decode_item::<Case>(json!("text")).is_err());
    }

    #[tokio::test]
    async fn test_mock_mode_returns_first_for_unknown_id() {
        let service = ContentService::new(Arc::new(MockSource::new(Arc::new(DummySource))));

        let cap = service.get_capability_by_id("capability4").await.unwrap();
        assert_eq!(cap.title, "AIデータ分析");

        let case = service.get_case_by_id("missing").await.unwrap();
        assert_eq!(case.id, "case1");

        let all = service.get_all_capabilities().await.unwrap();
        assert_eq!(all.len(), 5);
    }
}
