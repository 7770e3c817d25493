use httpmock::prelude::*;
use serde_json::{json, Value};
use showcase::config::Config;
use showcase::server::{serve, AppState};

/// Config pointing the CMS at `upstream`.
fn config_for(upstream: &MockServer) -> Config {
    let mut config = Config::default();
    config.cms.base_url = Some(upstream.url("/api/v1"));
    config.cms.api_key = Some("test-key".into());
    config.cms.timeout_secs = 5;
    config
}

/// Starts the server on an ephemeral port and returns its base URL.
async fn spawn_server(config: &Config) -> String {
    let state = AppState::from_config(config).unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        serve(listener, state).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_health() {
    let upstream = MockServer::start_async().await;
    let base = spawn_server(&config_for(&upstream)).await;

    let body: Value = reqwest::get(format!("{}/health", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_cases_list_forwards_queries_and_key() {
    let upstream = MockServer::start_async().await;
    let mock = upstream
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/cases")
                .header("x-microcms-api-key", "test-key")
                .query_param("limit", "2")
                .query_param("orders", "-publishedAt");
            then.status(200)
                .json_body(json!({ "contents": [{ "id": "c1" }], "totalCount": 1, "offset": 0, "limit": 2 }));
        })
        .await;
    let base = spawn_server(&config_for(&upstream)).await;

    let resp = reqwest::get(format!("{}/api/cases?limit=2&orders=-publishedAt", base))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();

    mock.assert_async().await;
    assert_eq!(body["contents"][0]["id"], "c1");
    assert_eq!(body["limit"], 2);
}

#[tokio::test]
async fn test_single_id_fetches_content() {
    let upstream = MockServer::start_async().await;
    let mock = upstream
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/capabilities/cap-9");
            then.status(200).json_body(json!({ "id": "cap-9", "title": "要約" }));
        })
        .await;
    let base = spawn_server(&config_for(&upstream)).await;

    let body: Value = reqwest::get(format!("{}/api/capabilities?id=cap-9", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(body["title"], "要約");
}

#[tokio::test]
async fn test_generic_endpoint_lists_records() {
    let upstream = MockServer::start_async().await;
    let mock = upstream
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/news")
                .query_param("limit", "3");
            then.status(200).json_body(json!({ "contents": [] }));
        })
        .await;
    let base = spawn_server(&config_for(&upstream)).await;

    let resp = reqwest::get(format!("{}/api/news?endpoint=news&limit=3", base))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_invalid_endpoint_is_400() {
    let upstream = MockServer::start_async().await;
    let base = spawn_server(&config_for(&upstream)).await;

    for path in ["/api/bad%20name", "/api/a%2Fb", "/api/"] {
        let resp = reqwest::get(format!("{}{}", base, path)).await.unwrap();
        assert_eq!(resp.status(), 400, "{}", path);
        let body: Value = resp.json().await.unwrap();
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn test_upstream_failure_is_500_without_fallback() {
    let upstream = MockServer::start_async().await;
    upstream
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/cases");
            then.status(503).body("maintenance");
        })
        .await;
    let base = spawn_server(&config_for(&upstream)).await;

    let resp = reqwest::get(format!("{}/api/cases", base)).await.unwrap();
    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Internal Server Error" }));
}

#[tokio::test]
async fn test_cors_headers_and_options() {
    let upstream = MockServer::start_async().await;
    let base = spawn_server(&config_for(&upstream)).await;
    let client = reqwest::Client::new();

    let resp = client
        .request(reqwest::Method::OPTIONS, format!("{}/api/cases", base))
        .header("Origin", "https://example.com")
        .header("Access-Control-Request-Method", "GET")
        .header("Access-Control-Request-Headers", "x-api-version")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let headers = resp.headers();
    assert_eq!(headers["access-control-allow-origin"], "https://example.com");
    assert_eq!(headers["access-control-allow-credentials"], "true");
    let methods = headers["access-control-allow-methods"].to_str().unwrap();
    assert!(methods.contains("PATCH"));
    let allowed = headers["access-control-allow-headers"].to_str().unwrap();
    assert!(allowed.contains("x-api-version"));

    // Plain OPTIONS without preflight headers.
    let resp = client
        .request(reqwest::Method::OPTIONS, format!("{}/api/news", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_cors_headers_on_simple_requests() {
    let upstream = MockServer::start_async().await;
    let base = spawn_server(&config_for(&upstream)).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{}/health", base))
        .header("Origin", "https://example.com")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let headers = resp.headers();
    assert_eq!(headers["access-control-allow-origin"], "https://example.com");
    assert_eq!(headers["access-control-allow-credentials"], "true");
    assert!(headers["access-control-allow-methods"].to_str().unwrap().contains("DELETE"));
    assert!(headers["access-control-allow-headers"].to_str().unwrap().contains("x-csrf-token"));

    // No Origin: nothing to echo, the rest is still present.
    let resp = client.get(format!("{}/health", base)).send().await.unwrap();
    let headers = resp.headers();
    assert!(headers.get("access-control-allow-origin").is_none());
    assert_eq!(headers["access-control-allow-credentials"], "true");
    assert!(headers.contains_key("access-control-allow-methods"));

    // Error responses carry them too.
    let resp = client
        .get(format!("{}/api/", base))
        .header("Origin", "https://example.com")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(resp.headers()["access-control-allow-origin"], "https://example.com");
    assert_eq!(resp.headers()["access-control-allow-credentials"], "true");
}

#[tokio::test]
async fn test_capability_outline() {
    let upstream = MockServer::start_async().await;
    let mock = upstream
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/capabilities/cap-1");
            then.status(200).json_body(json!({
                "id": "cap-1",
                "title": "議事録AI",
                "detail": "<h2>概要</h2><p>録音から作成</p><h3>手順</h3><p>アップロード</p>",
                "detail01": "★★★★☆"
            }));
        })
        .await;
    let base = spawn_server(&config_for(&upstream)).await;

    let resp = reqwest::get(format!("{}/api/capabilities/cap-1/outline", base))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();

    mock.assert_async().await;
    assert_eq!(body["title"], "議事録AI");
    assert_eq!(body["difficulty"], 4);
    assert_eq!(body["contents"][0]["text"], "概要");
    assert_eq!(body["contents"][0]["content"], "<p>録音から作成</p>");
    assert_eq!(body["contents"][1]["level"], 3);

    let resp = reqwest::get(format!("{}/api/capabilities/bad%20id/outline", base))
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_capability_groups_fall_back_to_mock_data() {
    let upstream = MockServer::start_async().await;
    upstream
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/capabilities");
            then.status(500);
        })
        .await;
    let base = spawn_server(&config_for(&upstream)).await;

    let body: Value = reqwest::get(format!("{}/api/capability-groups?q=翻訳", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["query"], "翻訳");
    assert_eq!(body["filtering"], true);
    assert_eq!(body["groups"][0]["id"], "business_translation");
    assert_eq!(body["popularTags"].as_array().unwrap().len(), 15);
    assert_eq!(body["popularTags"][0]["label"], "文章作成");
    assert_eq!(body["purposeGroups"][0]["title"], "コンテンツを作る");
}

#[tokio::test]
async fn test_category_view() {
    let upstream = MockServer::start_async().await;
    upstream
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/capabilities");
            then.status(200).json_body(json!({
                "contents": [
                    { "id": "a", "title": "A", "category": ["document_creation（文書作成・管理）"] },
                    { "id": "b", "title": "B", "category": ["text_creation"] },
                    { "id": "c", "title": "C", "category": ["video_editing"] }
                ],
                "totalCount": 3
            }));
        })
        .await;
    let base = spawn_server(&config_for(&upstream)).await;

    let body: Value = reqwest::get(format!("{}/api/categories/document_creation", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["display_name"], "文書作成・管理");
    assert_eq!(body["primary"][0]["id"], "a");
    assert_eq!(body["secondary"][0]["id"], "b");
    assert_eq!(body["secondary"].as_array().unwrap().len(), 1);

    let body: Value = reqwest::get(format!("{}/api/categories/文書作成・管理", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["category"], "document_creation");
    assert_eq!(body["primary"][0]["id"], "a");

    let resp = reqwest::get(format!("{}/api/categories/nope", base)).await.unwrap();
    assert_eq!(resp.status(), 404);
}
