use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;

use backend_application::commands::response_commands;
use backend_application::queries::response_queries;
use backend_application::AppState;
use backend_domain::value_objects::{EventId, MemberId};
use backend_domain::{EventResponse, ResponseChoice, ResponsesSnapshot};

use crate::error::HttpError;
use crate::middleware::{acting_member, authorize, require_manager};

#[derive(serde::Deserialize)]
pub struct RespondPayload {
    pub response: ResponseChoice,
    /// Absent means the acting member answers for themselves. Managers
    /// may answer on another member's behalf.
    #[serde(default)]
    pub member_id: Option<MemberId>,
}

pub async fn respond_to_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(payload): Json<RespondPayload>,
) -> Result<Json<EventResponse>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let member = acting_member(&headers)?;
    let responder = match payload.member_id {
        Some(other) if other != member.id => {
            require_manager(&member)?;
            other
        }
        Some(own) => own,
        None => member.id,
    };
    let stored =
        response_commands::respond_to_event(&state, responder, EventId(id), payload.response)
            .await?;
    Ok(Json(stored))
}

pub async fn list_event_responses(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ResponsesSnapshot>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    acting_member(&headers)?;
    let snapshot = response_queries::get_event_responses(&state, &EventId(id)).await?;
    Ok(Json(snapshot))
}
