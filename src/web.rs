//! HTTP transport: routing, CORS, request validation, status mapping
//!
//! The single top-level error boundary lives here: every pipeline error is
//! converted into a complete JSON `{message}` body with the status its
//! taxonomy prescribes. Responses are all-or-nothing, never partial.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tracing::{error, warn};

use crate::config::ServerConfig;
use crate::error::ChartError;
use crate::models::birth::BirthInput;
use crate::pipeline::ChartService;

/// Inbound chart request; every field is required
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRequest {
    pub birth_date: Option<String>,
    pub birth_time: Option<String>,
    pub birth_place: Option<String>,
    pub user_sex: Option<String>,
    pub language: Option<String>,
}

/// Success body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartResponse {
    pub chart_text: String,
}

/// Error body returned on every failure path
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Status code prescribed for each error variant
#[must_use]
pub fn status_for(error: &ChartError) -> StatusCode {
    match error {
        ChartError::Validation { .. } | ChartError::InvalidDateTime { .. } => {
            StatusCode::BAD_REQUEST
        }
        ChartError::GeoResolutionFailed { .. } | ChartError::TimeZoneResolutionFailed { .. } => {
            StatusCode::NOT_FOUND
        }
        ChartError::ConfigMissing { .. }
        | ChartError::UpstreamTransport { .. }
        | ChartError::HouseComputationFailed { .. }
        | ChartError::MissingChartField { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ChartError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Request rejected: {}", self);
        }
        (
            status,
            Json(ErrorBody {
                message: self.user_message(),
            }),
        )
            .into_response()
    }
}

/// Build the application router
pub fn router(service: Arc<ChartService>, config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/chart",
            post(generate_chart)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route("/api/health", get(health))
        .layer(RequestBodyLimitLayer::new(32 * 1024))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_seconds.into(),
        )))
        .layer(cors)
        .with_state(service)
}

/// Bind and serve until shutdown
pub async fn serve(service: Arc<ChartService>, config: &ServerConfig) -> anyhow::Result<()> {
    let app = router(service, config);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("AstroAI server running at http://localhost:{}", config.port);
    axum::serve(listener, app)
        .await
        .with_context(|| "Server error")?;
    Ok(())
}

async fn generate_chart(
    State(service): State<Arc<ChartService>>,
    payload: Result<Json<ChartRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return ChartError::validation(format!("invalid request body: {rejection}"))
                .into_response();
        }
    };

    let birth = match validate_request(request) {
        Ok(birth) => birth,
        Err(error) => return error.into_response(),
    };

    match service.generate(&birth).await {
        Ok(reading) => (
            StatusCode::OK,
            Json(ChartResponse {
                chart_text: reading.chart_text,
            }),
        )
            .into_response(),
        Err(error) => error.into_response(),
    }
}

/// CORS preflight; the CORS layer fills in the headers
async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody {
            message: "Only POST and OPTIONS are supported on this route".to_string(),
        }),
    )
        .into_response()
}

async fn health() -> &'static str {
    "ok"
}

/// Check all five required fields before touching any collaborator
fn validate_request(request: ChartRequest) -> crate::Result<BirthInput> {
    let birth_date = required(request.birth_date, "birthDate")?;
    let birth_time = required(request.birth_time, "birthTime")?;
    let birth_place = required(request.birth_place, "birthPlace")?;
    let user_sex = required(request.user_sex, "userSex")?;
    let language = required(request.language, "language")?;
    BirthInput::parse(&birth_date, &birth_time, &birth_place, &user_sex, &language)
}

fn required(value: Option<String>, field: &'static str) -> crate::Result<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ChartError::validation(format!("{field} is required")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn full_request() -> ChartRequest {
        ChartRequest {
            birth_date: Some("1990-03-21".to_string()),
            birth_time: Some("12:00".to_string()),
            birth_place: Some("Paris, France".to_string()),
            user_sex: Some("female".to_string()),
            language: Some("es".to_string()),
        }
    }

    #[test]
    fn test_validate_accepts_full_request() {
        let birth = validate_request(full_request()).expect("valid request");
        assert_eq!(birth.place, "Paris, France");
    }

    #[rstest]
    #[case("birthDate")]
    #[case("birthTime")]
    #[case("birthPlace")]
    #[case("userSex")]
    #[case("language")]
    fn test_validate_rejects_each_missing_field(#[case] field: &str) {
        let mut request = full_request();
        match field {
            "birthDate" => request.birth_date = None,
            "birthTime" => request.birth_time = None,
            "birthPlace" => request.birth_place = Some("  ".to_string()),
            "userSex" => request.user_sex = None,
            _ => request.language = None,
        }
        let error = validate_request(request).unwrap_err();
        assert!(matches!(error, ChartError::Validation { .. }));
        assert!(error.user_message().contains(field));
    }

    #[test]
    fn test_status_mapping_matches_taxonomy() {
        assert_eq!(
            status_for(&ChartError::validation("x")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&ChartError::invalid_date_time("x")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&ChartError::place_not_found("x")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&ChartError::time_zone("x")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&ChartError::config("x")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(&ChartError::upstream("x")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(&ChartError::house("x")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(&ChartError::MissingChartField { field: "cusps" }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
