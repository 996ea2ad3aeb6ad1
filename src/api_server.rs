//! Axum Server Module
//!
//! Router, shared state and the JSON endpoints. HTML page handlers live in
//! `web::handlers::pages`; both share [`AppState`] and [`AppError`].

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::ServeDir,
    trace::TraceLayer,
};

use crate::calculators::{Evaluation, FormValues, Registry, RegistryError};
use crate::catalog::{Catalog, Category};
use crate::config::SiteConfig;
use crate::search_index::{SearchIndex, SearchResult};
use crate::share::{share_links, ShareLink};
use crate::web::handlers::pages;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub registry: Arc<Registry>,
    /// Built once at startup; the catalog never changes afterwards
    pub search_index: Arc<SearchIndex>,
    pub config: Arc<SiteConfig>,
}

impl AppState {
    pub fn new(config: SiteConfig) -> Result<Self, RegistryError> {
        let catalog = Catalog::builtin();

        tracing::info!("Registering calculators...");
        let registry = Registry::builtin()?;

        tracing::info!("Building search index...");
        let search_index = SearchIndex::build(&catalog);
        let stats = search_index.stats();
        tracing::info!(
            "Search index ready ({} categories, {} calculators)",
            stats.category_count,
            stats.calculator_count
        );

        let missing: Vec<&str> = catalog
            .all_calculator_ids()
            .into_iter()
            .filter(|id| !registry.contains(id))
            .collect();
        if !missing.is_empty() {
            tracing::warn!("Catalog entries without a calculator: {:?}", missing);
        }

        Ok(Self {
            catalog,
            registry: Arc::new(registry),
            search_index: Arc::new(search_index),
            config: Arc::new(config),
        })
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        // Pages (HTML)
        .route("/", get(pages::home_page))
        .route("/category/:category_id", get(pages::category_page))
        .route(
            "/category/:category_id/:subcategory_id",
            get(pages::biology_subcategory_page),
        )
        .route(
            "/calculator/:calculator_id",
            get(pages::calculator_page).post(pages::evaluate_calculator),
        )
        .route("/search", get(pages::search_page))

        // JSON API
        .route("/health", get(health_check))
        .route("/api/catalog", get(get_catalog))
        .route("/api/search", get(search_catalog))
        .route("/api/calculators/:calculator_id", post(evaluate))

        .nest_service("/static", static_files)
        .fallback(pages::not_found_page)

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "calculators": state.registry.len(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[derive(Serialize)]
struct CatalogResponse {
    categories: &'static [Category],
    calculator_count: usize,
}

async fn get_catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        categories: state.catalog.list_categories(),
        calculator_count: state.catalog.calculator_count(),
    })
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
struct SearchResponse<'a> {
    query: &'a str,
    count: usize,
    results: Vec<&'a SearchResult>,
}

async fn search_catalog(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let results = state.search_index.filter(&params.q);
    tracing::debug!("API search '{}' -> {} results", params.q, results.len());
    Json(SearchResponse {
        query: &params.q,
        count: results.len(),
        results,
    })
    .into_response()
}

#[derive(Serialize)]
struct EvaluationResponse {
    calculator: &'static str,
    title: &'static str,
    #[serde(flatten)]
    evaluation: Evaluation,
    /// Present only for computed results
    #[serde(skip_serializing_if = "Vec::is_empty")]
    share: Vec<ShareLink>,
}

/// Evaluate a calculator from a JSON object of field values.
///
/// Numbers and booleans are accepted as well as strings; `null` means blank.
async fn evaluate(
    State(state): State<AppState>,
    Path(calculator_id): Path<String>,
    Json(payload): Json<HashMap<String, serde_json::Value>>,
) -> Result<Json<EvaluationResponse>, AppError> {
    let leaf = state
        .registry
        .get(&calculator_id)
        .ok_or_else(|| AppError::NotFound(format!("Calculator '{}' not found", calculator_id)))?;

    let form = form_from_json(payload)?;
    let evaluation = leaf.evaluate(&form);

    let page = leaf.page();
    let share = match evaluation.result() {
        Some(result) => share_links(
            page.title,
            &result.share_text(page.title),
            &state.config.absolute_url(&format!("/calculator/{}", leaf.id())),
        ),
        None => Vec::new(),
    };

    Ok(Json(EvaluationResponse {
        calculator: leaf.id(),
        title: page.title,
        evaluation,
        share,
    }))
}

fn form_from_json(payload: HashMap<String, serde_json::Value>) -> Result<FormValues, AppError> {
    let mut values = HashMap::with_capacity(payload.len());
    for (name, value) in payload {
        let text = match value {
            serde_json::Value::Null => continue,
            serde_json::Value::String(s) => s,
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                return Err(AppError::BadRequest(format!(
                    "Field '{}' must be a string or a number",
                    name
                )))
            }
        };
        values.insert(name, text);
    }
    Ok(FormValues::new(values))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Template(String),
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Template(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Template(msg) => {
                tracing::error!("Template error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_from_json_stringifies_scalars() {
        let payload: HashMap<String, serde_json::Value> = serde_json::from_str(
            r#"{"systolic": 120, "diastolic": "80", "note": null, "flag": true}"#,
        )
        .unwrap();
        let form = form_from_json(payload).unwrap();
        assert_eq!(form.raw("systolic"), Some("120"));
        assert_eq!(form.raw("diastolic"), Some("80"));
        assert_eq!(form.raw("flag"), Some("true"));
        assert!(form.is_blank("note"));
    }

    #[test]
    fn test_form_from_json_rejects_nested_values() {
        let payload: HashMap<String, serde_json::Value> =
            serde_json::from_str(r#"{"values": [1, 2]}"#).unwrap();
        assert!(matches!(form_from_json(payload), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_state_covers_catalog() {
        let state = AppState::new(SiteConfig::default()).unwrap();
        for id in state.catalog.all_calculator_ids() {
            assert!(state.registry.contains(id), "no calculator for '{}'", id);
        }
    }
}
