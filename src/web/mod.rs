//! Web API module for Tradeforge.
//!
//! This module provides a REST API over the trade catalog, the theme
//! renderers and the brand analysis pipeline.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/trades` - List trades
//! - `POST /api/trades` - Create a trade
//! - `GET /api/trades/{slug}` - Trade with content, blueprints and identity
//! - `POST /api/trades/analyze` - Analyze an external site
//! - `POST /api/trades/generate` - Generate a trade from an analysis
//! - `GET /api/trades/{slug}/preview/{theme}` - Rendered page (`?viewport=`, `?format=json`)
//! - `GET /api/trades/{slug}/export` - Zip of the rendered site
//! - `GET /api/themes` - List themes
//! - `GET /api/brands/{slug}/style` - Resolved style record and CSS variables

use std::net::SocketAddr;
use std::sync::{Arc, RwLock};

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::analysis::{AnalysisError, Analyzer, BLOCKED_MESSAGE};
use crate::config::Config;
use crate::constants::VERSION;
use crate::models::{BrandStyle, FieldError, NewTrade, Trade};
use crate::registry::StyleRegistry;
use crate::render::{Theme, Viewport};
use crate::services::catalog::render_detail;
use crate::services::{
    export_site, BrandGenerator, CatalogService, GenerationOutcome, ServiceError, TradeDetail,
};
use crate::store::TradeRow;
use crate::theme::{css_variables, CssVar};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Trade catalog
    catalog: CatalogService,
    /// Brand generator
    generator: BrandGenerator,
    /// Current registry snapshot, replaced whole after generation
    registry: Arc<RwLock<Arc<StyleRegistry>>>,
    /// Site analyzer
    analyzer: Arc<Analyzer>,
}

impl AppState {
    /// Opens the catalog and registry under the configured data directory.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let analyzer = Analyzer::from_config(&config.analysis)?;
        Self::with_analyzer(config, analyzer)
    }

    /// Like [`AppState::new`] with an explicit analyzer.
    pub fn with_analyzer(config: Config, analyzer: Analyzer) -> anyhow::Result<Self> {
        let catalog = CatalogService::open(config.paths.clone())?;
        let registry = StyleRegistry::load(Some(&config.paths.styles_dir()))?;
        info!(
            styles = registry.len(),
            data_dir = %config.paths.data_dir.display(),
            "Loaded style registry"
        );

        Ok(Self {
            generator: BrandGenerator::new(catalog.clone()),
            catalog,
            registry: Arc::new(RwLock::new(Arc::new(registry))),
            analyzer: Arc::new(analyzer),
        })
    }

    /// Current registry snapshot.
    pub fn registry(&self) -> Arc<StyleRegistry> {
        let guard = self
            .registry
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replaces the snapshot with one that includes `style`.
    fn publish(&self, style: BrandStyle) {
        let mut guard = self
            .registry
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let next = guard.with_record(style);
        *guard = Arc::new(next);
    }

    /// Returns the trade catalog.
    #[must_use]
    pub fn catalog(&self) -> &CatalogService {
        &self.catalog
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "healthy").
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Theme information for API response.
#[derive(Debug, Serialize)]
pub struct ThemeInfo {
    /// Theme identifier (e.g., "clean").
    pub id: &'static str,
    /// Blueprint letter.
    pub letter: char,
    /// Display name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
}

impl From<Theme> for ThemeInfo {
    fn from(theme: Theme) -> Self {
        Self {
            id: theme.id(),
            letter: theme.letter(),
            name: theme.name(),
            description: theme.description(),
        }
    }
}

/// Resolved brand style response.
#[derive(Debug, Serialize)]
pub struct BrandStyleResponse {
    /// Requested slug.
    pub requested: String,
    /// Whether the slug has its own record (false means the default was used).
    pub matched: bool,
    /// Resolved style record.
    pub style: BrandStyle,
    /// CSS custom properties derived from the record.
    pub css_variables: Vec<CssVar>,
}

/// Analyze request.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Site to analyze.
    #[serde(default)]
    pub url: Option<String>,
}

/// Query parameters for page previews.
#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    /// mobile, tablet or desktop (default).
    pub viewport: Option<String>,
    /// html (default) or json.
    pub format: Option<String>,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub message: String,
    /// Field-level validation errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl ApiError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: None,
        }
    }

    fn with_errors(message: impl Into<String>, errors: Vec<FieldError>) -> Self {
        Self {
            message: message.into(),
            errors: Some(errors),
        }
    }
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

fn not_found(message: impl Into<String>) -> (StatusCode, Json<ApiError>) {
    (StatusCode::NOT_FOUND, Json(ApiError::new(message)))
}

fn internal(message: &str, err: &anyhow::Error) -> (StatusCode, Json<ApiError>) {
    error!(error = %format!("{err:#}"), "{message}");
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ApiError::new(message)))
}

fn service_error(err: ServiceError, message: &str) -> (StatusCode, Json<ApiError>) {
    match err {
        ServiceError::Invalid(errors) => (
            StatusCode::BAD_REQUEST,
            Json(ApiError::with_errors(
                "Validation failed",
                errors.errors().to_vec(),
            )),
        ),
        ServiceError::Conflict(slug) => (
            StatusCode::CONFLICT,
            Json(ApiError::new(format!("Trade '{slug}' already exists"))),
        ),
        ServiceError::NotFound(slug) => not_found(format!("Trade '{slug}' not found")),
        ServiceError::Internal(e) => internal(message, &e),
    }
}

/// Unwraps a JSON body, answering a malformed one with 400 `{message, errors}`.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload.map(|Json(value)| value).map_err(|rejection| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::with_errors(
                "Invalid request body",
                vec![FieldError {
                    field: "body".to_string(),
                    message: rejection.body_text(),
                }],
            )),
        )
    })
}

fn trade_not_found(slug: &str) -> (StatusCode, Json<ApiError>) {
    not_found(format!("Trade '{slug}' not found"))
}

fn load_detail(state: &AppState, slug: &str) -> ApiResult<TradeDetail> {
    state
        .catalog
        .get(slug)
        .map_err(|e| internal("Failed to load trade", &e))?
        .ok_or_else(|| trade_not_found(slug))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /health - Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: VERSION.to_string(),
    })
}

/// GET /api/trades - List all trades.
async fn list_trades(State(state): State<AppState>) -> ApiResult<Json<Vec<Trade>>> {
    state
        .catalog
        .list()
        .map(Json)
        .map_err(|e| internal("Failed to list trades", &e))
}

/// GET /api/trades/{slug} - Trade with resolved content.
async fn get_trade(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<TradeDetail>> {
    load_detail(&state, &slug).map(Json)
}

/// POST /api/trades - Create a trade with synthesized content.
async fn create_trade(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TradeRow>)> {
    let request = NewTrade::from_value(&json_body(payload)?)
        .map_err(|e| service_error(ServiceError::Invalid(e), "Failed to create trade"))?;
    let row = state
        .catalog
        .create(request)
        .map_err(|e| service_error(e, "Failed to create trade"))?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// POST /api/trades/analyze - Analyze an external site.
async fn analyze_site(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let request = json_body(payload)?;
    let url = request.url.unwrap_or_default();
    match state.analyzer.analyze(&url).await {
        Ok(analysis) => Ok(Json(analysis)),
        Err(e @ (AnalysisError::MissingUrl | AnalysisError::InvalidUrl(_))) => Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(e.to_string())),
        )),
        Err(AnalysisError::Blocked(detail)) => {
            warn!(url = %url, detail = %detail, "Site blocked analysis");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new(BLOCKED_MESSAGE)),
            ))
        }
        Err(e) => {
            error!(url = %url, error = %e.detail(), "Brand analysis failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new("Brand analysis failed")),
            ))
        }
    }
}

/// POST /api/trades/generate - Generate a trade from an analysis.
async fn generate_trade(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<GenerationOutcome>)> {
    let analysis = json_body(payload)?;
    let registry = state.registry();
    let outcome = state
        .generator
        .generate(&registry, &analysis)
        .map_err(|e| service_error(e, "Brand generation failed"))?;

    let status = if outcome.created {
        state.publish(outcome.style.clone());
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(outcome)))
}

/// GET /api/themes - List the available themes.
async fn list_themes() -> Json<Vec<ThemeInfo>> {
    Json(Theme::ALL.into_iter().map(ThemeInfo::from).collect())
}

/// GET /api/brands/{slug}/style - Resolved style record (never 404).
async fn get_brand_style(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Json<BrandStyleResponse> {
    let registry = state.registry();
    let style = registry.resolve(&slug).clone();
    Json(BrandStyleResponse {
        matched: registry.contains(&slug),
        css_variables: css_variables(&style),
        requested: slug,
        style,
    })
}

/// GET /api/trades/{slug}/preview/{theme} - Rendered page.
async fn preview_trade(
    State(state): State<AppState>,
    Path((slug, theme)): Path<(String, String)>,
    Query(query): Query<PreviewQuery>,
) -> ApiResult<Response> {
    let theme = Theme::from_id(&theme)
        .ok_or_else(|| not_found(format!("Theme '{theme}' not found")))?;
    let viewport = match query.viewport.as_deref() {
        None | Some("") => Viewport::default(),
        Some(v) => v
            .parse::<Viewport>()
            .map_err(|e| (StatusCode::BAD_REQUEST, Json(ApiError::new(e.to_string()))))?,
    };

    let detail = load_detail(&state, &slug)?;
    let page = render_detail(&state.registry(), &detail, theme, viewport);

    match query.format.as_deref() {
        Some("json") => Ok(Json(page).into_response()),
        None | Some("" | "html") => Ok(Html(page.to_html()).into_response()),
        Some(other) => Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(format!(
                "Unknown format '{other}'. Expected html or json"
            ))),
        )),
    }
}

/// GET /api/trades/{slug}/export - Zip of the rendered site.
async fn export_trade(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Response> {
    let detail = load_detail(&state, &slug)?;
    let bytes = export_site(&state.registry(), &detail)
        .map_err(|e| internal("Failed to export site", &e))?;

    let disposition = format!("attachment; filename=\"{slug}-site.zip\"");
    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the application router.
pub fn create_router(state: AppState) -> Router {
    // Permissive CORS: the server is meant to run next to a local frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Trade endpoints
        .route("/api/trades", get(list_trades).post(create_trade))
        .route("/api/trades/analyze", post(analyze_site))
        .route("/api/trades/generate", post(generate_trade))
        .route("/api/trades/{slug}", get(get_trade))
        .route("/api/trades/{slug}/preview/{theme}", get(preview_trade))
        .route("/api/trades/{slug}/export", get(export_trade))
        // Theme and style endpoints
        .route("/api/themes", get(list_themes))
        .route("/api/brands/{slug}/style", get(get_brand_style))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Errors
///
/// Returns an error if the state cannot be initialized or the server fails
/// to start.
pub async fn run_server(config: Config, addr: SocketAddr) -> anyhow::Result<()> {
    let state = AppState::new(config)?;
    let app = create_router(state);

    info!("Starting Tradeforge web server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ValidationErrors;

    #[test]
    fn test_validation_maps_to_400_with_fields() {
        let mut errors = ValidationErrors::new();
        errors.push("slug", "must not be empty");
        let (status, Json(body)) = service_error(ServiceError::Invalid(errors), "x");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.errors.unwrap()[0].field, "slug");
    }

    #[test]
    fn test_conflict_maps_to_409() {
        let (status, Json(body)) = service_error(ServiceError::Conflict("roofer".into()), "x");
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body.message.contains("roofer"));
    }

    #[test]
    fn test_internal_hides_details() {
        let err = ServiceError::Internal(anyhow::anyhow!("disk on fire"));
        let (status, Json(body)) = service_error(err, "Brand generation failed");
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "Brand generation failed");
    }

    #[test]
    fn test_theme_info() {
        let info = ThemeInfo::from(Theme::Luxury);
        assert_eq!(info.id, "luxury");
        assert_eq!(info.letter, 'C');
    }
}
