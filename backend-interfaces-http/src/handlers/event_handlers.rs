use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::NaiveDate;

use backend_application::commands::event_commands;
use backend_application::queries::event_queries;
use backend_application::AppState;
use backend_domain::value_objects::{EventId, TeamId};
use backend_domain::{Event, EventDraft, RepeatDraft};

use crate::error::HttpError;
use crate::middleware::{acting_member, authorize, require_manager};

#[derive(serde::Deserialize)]
pub struct CreateSeriesPayload {
    #[serde(flatten)]
    pub event: EventDraft,
    pub repeat: RepeatDraft,
}

#[derive(serde::Deserialize)]
pub struct TeamEventsQuery {
    pub team: String,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

pub async fn create_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<EventDraft>,
) -> Result<(StatusCode, Json<Event>), HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let member = acting_member(&headers)?;
    require_manager(&member)?;
    let event = event_commands::create_event(&state, member.id, payload).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn create_recurring_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateSeriesPayload>,
) -> Result<(StatusCode, Json<Vec<Event>>), HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let member = acting_member(&headers)?;
    require_manager(&member)?;
    let events =
        event_commands::create_recurring_events(&state, member.id, payload.event, payload.repeat)
            .await?;
    Ok((StatusCode::CREATED, Json(events)))
}

pub async fn get_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Event>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    // Reads need an identified member too; any role will do.
    acting_member(&headers)?;
    let event = event_queries::get_event(&state, &EventId(id)).await?;
    Ok(Json(event))
}

pub async fn list_team_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<TeamEventsQuery>,
) -> Result<Json<Vec<Event>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    acting_member(&headers)?;
    let events =
        event_queries::list_team_events(&state, &TeamId(query.team), query.from, query.to).await?;
    Ok(Json(events))
}
