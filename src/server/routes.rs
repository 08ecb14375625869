//! Lesson route handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use std::sync::Arc;

use super::state::AppState;
use crate::error::LessonError;
use crate::types::{ContinuationRequest, GenerationRequest, Lesson};

/// Error returned by handlers, rendered as `{"message": ...}`
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Map a pipeline error, prefixing server-side failures with `context`
    fn from_lesson(err: LessonError, context: &str) -> Self {
        match err {
            LessonError::NotFound(_) => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            LessonError::InvalidRequest(msg) => Self {
                status: StatusCode::BAD_REQUEST,
                message: msg,
            },
            LessonError::Storage(_) => {
                tracing::error!(error = %err, "{}", context);
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: format!("{}: {}", context, err),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "message": self.message }))).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

pub async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Welcome to Lesson Generator API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn list_lessons(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Lesson>>> {
    let lessons = state
        .store
        .get_all_lessons()
        .map_err(|e| ApiError::from_lesson(e, "Failed to list lessons"))?;
    Ok(Json(lessons))
}

pub async fn get_lesson(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> ApiResult<Json<Lesson>> {
    let context = "Failed to get lesson";
    state
        .store
        .get_lesson(id)
        .map_err(|e| ApiError::from_lesson(e, context))?
        .map(Json)
        .ok_or_else(|| ApiError::from_lesson(LessonError::NotFound(id), context))
}

pub async fn create_lesson(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerationRequest>,
) -> ApiResult<(StatusCode, Json<Lesson>)> {
    let outcome = state
        .pipeline
        .generate(&request)
        .await
        .map_err(|e| ApiError::from_lesson(e, "Failed to create lesson"))?;
    Ok((StatusCode::CREATED, Json(outcome.lesson)))
}

pub async fn delete_lesson(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> ApiResult<StatusCode> {
    let context = "Failed to delete lesson";
    let deleted = state
        .store
        .delete_lesson(id)
        .map_err(|e| ApiError::from_lesson(e, context))?;
    if deleted {
        tracing::info!(id, "deleted lesson");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::from_lesson(LessonError::NotFound(id), context))
    }
}

pub async fn continue_lesson(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    body: Option<Json<ContinuationRequest>>,
) -> ApiResult<Json<Lesson>> {
    let request = body.map(|Json(r)| r);
    let outcome = state
        .pipeline
        .continue_lesson(id, request.as_ref())
        .await
        .map_err(|e| ApiError::from_lesson(e, "Failed to continue lesson"))?;
    Ok(Json(outcome.lesson))
}
