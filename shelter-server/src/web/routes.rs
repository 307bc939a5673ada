//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tracing::{error, warn};

use crate::domain::{DomainError, Geocoordinate};
use crate::locator::{LocateError, LocatorError};

use super::dto::*;
use super::session::SessionError;
use super::state::AppState;
use super::templates::*;

/// Shown for failures a retry may fix.
pub const TRY_AGAIN_MESSAGE: &str =
    "Could not reach the maps service right now, please try again.";

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/shelters/locate", get(locate_shelter))
        .route("/api/shelters/navigate", get(navigate))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the locate form.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let html = IndexTemplate::new(state.default_center).render()?;
    Ok(Html(html))
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Locate the nearest shelter to the given position.
///
/// With a `session` id, a newer request for the same session cancels this
/// one, which then answers 409.
async fn locate_shelter(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<LocateRequest>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(req) = query?;
    let origin = Geocoordinate::new(req.lat, req.lng)?;

    let outcome = match req.session.as_deref().filter(|s| !s.is_empty()) {
        Some(session) => {
            let locator = state.locator.clone();
            state
                .sessions
                .run(session, async move { locator.locate(origin).await })
                .await??
        }
        None => state.locator.locate(origin).await?,
    };

    let response = LocateResponse::from_outcome(&outcome);

    // Return HTML or JSON based on Accept header
    if accepts_html(&headers) {
        let html = ShelterListTemplate::from_response(&response).render()?;
        Ok(Html(html).into_response())
    } else {
        Ok(Json(response).into_response())
    }
}

/// Walking route between two points.
async fn navigate(
    State(state): State<AppState>,
    query: Result<Query<NavigateRequest>, QueryRejection>,
) -> Result<Json<RouteResponse>, AppError> {
    let Query(req) = query?;
    let origin = Geocoordinate::new(req.from_lat, req.from_lng)?;
    let destination = Geocoordinate::new(req.to_lat, req.to_lng)?;

    let route = state.locator.navigate_to(origin, destination).await?;

    Ok(Json(RouteResponse::new(origin, destination, &route)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Conflict { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::BadRequest {
            message: e.body_text(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<LocateError> for AppError {
    fn from(e: LocateError) -> Self {
        match e.source {
            LocatorError::Oracle(_) | LocatorError::RouteNotFound { .. } => {
                warn!(error = %e, "locate failed");
                AppError::BadGateway {
                    message: TRY_AGAIN_MESSAGE.to_string(),
                }
            }
            LocatorError::NoCandidates | LocatorError::InvalidConfig(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::Superseded => AppError::Conflict {
                message: e.to_string(),
            },
            SessionError::TaskFailed(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Internal {
            message: format!("Template error: {}", e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => {
                error!(%message, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
