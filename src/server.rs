use crate::datasources::WeatherGateway;
use crate::logic::CropAdvisor;
use crate::models::{ErrorPayload, ScoringMode};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Debug, Deserialize)]
pub struct CropQuery {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub city: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckQuery {
    pub city: String,
    pub crop: String,
    /// `boolean` or `graded`; the configured mode when absent
    pub mode: Option<String>,
}

pub fn router<G>(advisor: Arc<CropAdvisor<G>>) -> Router
where
    G: WeatherGateway + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/crops", get(lookup_crop::<G>))
        .route("/weather", get(current_weather::<G>))
        .route("/recommend/check", get(check_suitability::<G>))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(advisor)
}

pub async fn serve<G>(advisor: Arc<CropAdvisor<G>>, bind: &str) -> std::io::Result<()>
where
    G: WeatherGateway + 'static,
{
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router(advisor)).await
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Malformed or missing query parameters as an `invalid_input` payload
fn query_error(rejection: QueryRejection) -> Response {
    ErrorPayload::new("invalid_input", rejection.body_text()).into_response()
}

async fn lookup_crop<G: WeatherGateway + 'static>(
    State(advisor): State<Arc<CropAdvisor<G>>>,
    query: std::result::Result<Query<CropQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return query_error(rejection),
    };
    match advisor.lookup_crop(&query.name) {
        Ok(record) => Json(record).into_response(),
        Err(e) => ErrorPayload::from_error(&e)
            .with_crop(query.name)
            .into_response(),
    }
}

async fn current_weather<G: WeatherGateway + 'static>(
    State(advisor): State<Arc<CropAdvisor<G>>>,
    query: std::result::Result<Query<WeatherQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return query_error(rejection),
    };
    match advisor.current_weather(&query.city).await {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(e) => ErrorPayload::from_error(&e)
            .with_city(query.city)
            .into_response(),
    }
}

async fn check_suitability<G: WeatherGateway + 'static>(
    State(advisor): State<Arc<CropAdvisor<G>>>,
    query: std::result::Result<Query<CheckQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return query_error(rejection),
    };

    let mode = match query.mode.as_deref() {
        None => None,
        Some(raw) => match ScoringMode::from_str(raw) {
            Some(mode) => Some(mode),
            None => {
                return ErrorPayload::new(
                    "invalid_input",
                    format!("Unknown scoring mode '{}', expected boolean or graded", raw),
                )
                .with_city(query.city)
                .with_crop(query.crop)
                .into_response()
            }
        },
    };

    match advisor.check_suitability(&query.city, &query.crop, mode).await {
        Ok(payload) => Json(payload).into_response(),
        Err(err) => err.into_response(),
    }
}

impl IntoResponse for ErrorPayload {
    fn into_response(self) -> Response {
        let status = match self.kind.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "invalid_input" => StatusCode::UNPROCESSABLE_ENTITY,
            "upstream_unavailable" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}
