use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use backend_application::AppError;

#[derive(Debug)]
pub enum HttpError {
    Unauthorized,
    Forbidden(String),
    BadRequest(String),
    NotFound(String),
    /// 409 with a machine-readable code, e.g. a second match result.
    Conflict {
        code: &'static str,
        message: String,
    },
    /// 410 for windows that have closed and will not reopen.
    Gone {
        code: &'static str,
        message: String,
    },
    /// A series insert failed midway; the body names the events that
    /// were persisted before the failure.
    PartialSeries {
        message: String,
        created_event_ids: Vec<String>,
        requested: usize,
    },
    Internal(String),
}

impl From<AppError> for HttpError {
    fn from(value: AppError) -> Self {
        match value {
            AppError::Unauthorized => HttpError::Unauthorized,
            AppError::Forbidden(msg) => HttpError::Forbidden(msg),
            AppError::Validation(err) => HttpError::BadRequest(err.to_string()),
            AppError::NotFound(msg) => HttpError::NotFound(msg),
            AppError::DuplicateMatchResult(event_id) => HttpError::Conflict {
                code: "duplicate_match_result",
                message: format!("a result is already recorded for event '{}'", event_id),
            },
            AppError::ResponseWindowClosed(event_id) => HttpError::Gone {
                code: "response_window_closed",
                message: format!("responses for event '{}' are closed", event_id),
            },
            AppError::PartialSeries {
                created,
                requested,
                source,
            } => HttpError::PartialSeries {
                message: format!(
                    "series partially created: {} of {} events persisted: {}",
                    created.len(),
                    requested,
                    source
                ),
                created_event_ids: created.into_iter().map(|event| event.id.0).collect(),
                requested,
            },
            AppError::Internal(err) => HttpError::Internal(err.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
}

#[derive(Serialize)]
struct PartialSeriesBody {
    error: String,
    code: &'static str,
    created_event_ids: Vec<String>,
    created: usize,
    requested: usize,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            HttpError::Unauthorized => (StatusCode::UNAUTHORIZED, None, "unauthorized".to_string()),
            HttpError::Forbidden(msg) => (StatusCode::FORBIDDEN, None, msg),
            HttpError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                None,
                format!("bad request: {}", msg),
            ),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, None, msg),
            HttpError::Conflict { code, message } => (StatusCode::CONFLICT, Some(code), message),
            HttpError::Gone { code, message } => (StatusCode::GONE, Some(code), message),
            HttpError::PartialSeries {
                message,
                created_event_ids,
                requested,
            } => {
                let created = created_event_ids.len();
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(PartialSeriesBody {
                        error: message,
                        code: "partial_series",
                        created_event_ids,
                        created,
                        requested,
                    }),
                )
                    .into_response();
            }
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, None, msg),
        };
        (status, Json(ErrorBody { error: message, code })).into_response()
    }
}
