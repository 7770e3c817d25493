//! HTTP server: CMS proxy endpoints plus catalog views.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/api/cases` | `?id=` fetches one case, otherwise lists cases |
//! | `GET`  | `/api/capabilities` | same, for capabilities |
//! | `GET`  | `/api/capabilities/{id}/outline` | headings and difficulty of one capability |
//! | `GET`  | `/api/{endpoint}` | lists any endpoint, forwarding query params |
//! | `GET`  | `/api/capability-groups` | capabilities sorted into purpose groups, `?q=` filters |
//! | `GET`  | `/api/categories/{id}` | one category (by id or display name) with related-category extras |
//! | `GET`  | `/health` | health check (returns version) |
//!
//! `OPTIONS` on any of these returns 200 with an empty body.
//!
//! Every response carries `Access-Control-Allow-Credentials`,
//! `-Allow-Methods` and `-Allow-Headers`. `Access-Control-Allow-Origin`
//! echoes the request's `Origin` and is absent when there is none.
//!
//! # Error Contract
//!
//! ```json
//! { "error": "Internal Server Error" }
//! ```
//!
//! Upstream failures are logged and reported as 500 with the body above;
//! their details never reach the client. An invalid endpoint name is 400.
//!
//! The proxy endpoints pass CMS responses through untouched and never
//! substitute fixtures. The catalog views read through the content service,
//! which may.

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use showcase_core::categories::{self, CategoryContents, PurposeGroup, PURPOSE_GROUPS};
use showcase_core::groups::{PopularTag, POPULAR_TAGS};
use showcase_core::models::AiCapability;
use showcase_core::search::{SearchHistory, SearchOutcome};
use showcase_core::views::CapabilityOutline;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::catalog::Catalog;
use crate::cms::is_valid_endpoint;
use crate::config::Config;
use crate::content::ContentService;
use crate::source::{build_proxy_source, build_source, ContentSource};

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Raw CMS access for the proxy endpoints.
    pub proxy: Arc<dyn ContentSource>,
    /// Typed reads for the catalog views.
    pub content: ContentService,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            proxy: build_proxy_source(config)?,
            content: ContentService::new(build_source(config)?),
        })
    }
}

const ALLOWED_METHODS: &str = "GET,OPTIONS,PATCH,DELETE,POST,PUT";

const ALLOWED_HEADERS: &str = "x-csrf-token, x-requested-with, accept, accept-version, \
content-length, content-md5, content-type, date, x-api-version";

/// Credentialed CORS. The request origin is mirrored back, since browsers
/// reject `*` together with credentials.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_credentials(true)
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([
            Method::GET,
            Method::OPTIONS,
            Method::PATCH,
            Method::DELETE,
            Method::POST,
            Method::PUT,
        ])
        .allow_headers(
            ALLOWED_HEADERS
                .split(", ")
                .map(HeaderName::from_static)
                .collect::<Vec<_>>(),
        )
}

/// `CorsLayer` only answers browsers. These fill in the same headers on
/// every other response.
fn cors_defaults() -> [SetResponseHeaderLayer<HeaderValue>; 3] {
    [
        SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        ),
        SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ),
        SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ),
    ]
}

pub fn router(state: AppState) -> Router {
    let [credentials, methods, headers] = cors_defaults();
    Router::new()
        .route("/api/cases", get(handle_cases).options(handle_options))
        .route(
            "/api/capabilities",
            get(handle_capabilities).options(handle_options),
        )
        .route(
            "/api/capabilities/{id}/outline",
            get(handle_capability_outline).options(handle_options),
        )
        .route(
            "/api/capability-groups",
            get(handle_capability_groups).options(handle_options),
        )
        .route(
            "/api/categories/{id}",
            get(handle_category).options(handle_options),
        )
        .route("/api/", get(handle_missing_endpoint).options(handle_options))
        .route(
            "/api/{endpoint}",
            get(handle_endpoint).options(handle_options),
        )
        .route("/health", get(handle_health))
        .layer(cors_layer())
        .layer(credentials)
        .layer(methods)
        .layer(headers)
        .with_state(state)
}

/// Serves on an already-bound listener until the process exits.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Binds `[server].bind` and serves.
pub async fn run_server(config: &Config) -> Result<()> {
    let state = AppState::from_config(config)?;
    let listener = TcpListener::bind(&config.server.bind).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        content = state.content.source_name(),
        proxy = state.proxy.name(),
        "server listening"
    );
    serve(listener, state).await
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

struct AppError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        message: message.into(),
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        message: message.into(),
    }
}

/// Logs `err` and hides it behind a generic 500.
fn internal(err: impl std::fmt::Display) -> AppError {
    tracing::error!(error = %format!("{:#}", err), "API Error");
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Internal Server Error".to_string(),
    }
}

const INVALID_ENDPOINT: &str = "エンドポイントが指定されていないか、無効です";

// ============ OPTIONS / health ============

async fn handle_options() -> StatusCode {
    StatusCode::OK
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ Proxy ============

/// Returns the `id` param if it occurs exactly once and is non-empty.
fn single_id(params: &[(String, String)]) -> Option<&str> {
    let mut ids = params.iter().filter(|(k, _)| k == "id");
    match (ids.next(), ids.next()) {
        (Some((_, id)), None) if !id.is_empty() => Some(id.as_str()),
        _ => None,
    }
}

async fn proxy_collection(
    state: &AppState,
    endpoint: &str,
    params: Vec<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let result = match single_id(&params) {
        Some(id) => state.proxy.get(endpoint, id, &[]).await,
        None => state.proxy.list(endpoint, &params).await,
    };
    result.map(Json).map_err(internal)
}

async fn handle_cases(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Value>, AppError> {
    proxy_collection(&state, "cases", params).await
}

async fn handle_capabilities(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Value>, AppError> {
    proxy_collection(&state, "capabilities", params).await
}

async fn handle_endpoint(
    State(state): State<AppState>,
    Path(endpoint): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Value>, AppError> {
    if !is_valid_endpoint(&endpoint) {
        return Err(bad_request(INVALID_ENDPOINT));
    }

    let queries: Vec<(String, String)> =
        params.into_iter().filter(|(k, _)| k != "endpoint").collect();

    state
        .proxy
        .list(&endpoint, &queries)
        .await
        .map(Json)
        .map_err(internal)
}

async fn handle_missing_endpoint() -> AppError {
    bad_request(INVALID_ENDPOINT)
}

// ============ Catalog views ============

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GroupsResponse<'a> {
    #[serde(flatten)]
    outcome: SearchOutcome<'a>,
    unmatched: Vec<&'a AiCapability>,
    popular_tags: &'static [PopularTag],
    purpose_groups: &'static [PurposeGroup],
}

#[derive(serde::Deserialize)]
struct GroupsQuery {
    #[serde(default)]
    q: String,
}

async fn handle_capability_groups(
    State(state): State<AppState>,
    Query(query): Query<GroupsQuery>,
) -> Result<Response, AppError> {
    let catalog = Catalog::load(&state.content).await.map_err(internal)?;

    // History is kept by the client; a scratch one is enough here.
    let mut history = SearchHistory::new();
    let body = GroupsResponse {
        outcome: catalog.search(&query.q, &mut history),
        unmatched: catalog.unmatched(),
        popular_tags: POPULAR_TAGS,
        purpose_groups: PURPOSE_GROUPS,
    };
    Ok(Json(body).into_response())
}

/// `id` may be a category id or its Japanese display name.
async fn handle_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let Some(category) = categories::lookup(&id) else {
        return Err(not_found(format!("unknown category: {}", id)));
    };

    let catalog = Catalog::load(&state.content).await.map_err(internal)?;
    let page: CategoryContents<'_> = catalog.category(category.id);
    Ok(Json(page).into_response())
}

async fn handle_capability_outline(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CapabilityOutline>, AppError> {
    if !is_valid_endpoint(&id) {
        return Err(bad_request(format!("invalid content id: {}", id)));
    }

    let capability = state
        .content
        .get_capability_by_id(&id)
        .await
        .map_err(internal)?;
    Ok(Json(CapabilityOutline::from(&capability)))
}
