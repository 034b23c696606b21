use chrono::Utc;

use backend_domain::value_objects::{EventId, MemberId};
use backend_domain::{EventResponse, ResponseChoice, ValidationError};

use crate::{AppError, AppState};

/// Records (or replaces) a member's answer for an event. The answer is
/// only accepted while the event's date is still in the future.
pub async fn respond_to_event(
    state: &AppState,
    member_id: MemberId,
    event_id: EventId,
    choice: ResponseChoice,
) -> Result<EventResponse, AppError> {
    let event = state
        .event_repo
        .fetch_event(&event_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("event '{event_id}' does not exist")))?;

    if !event.requires_response {
        return Err(AppError::Validation(ValidationError::new(
            "this event does not collect responses",
        )));
    }

    let now = Utc::now();
    if !event.response_window_open(now) {
        state.metrics.record_window_rejection();
        return Err(AppError::ResponseWindowClosed(event.id));
    }

    let response = EventResponse {
        event_id: event.id,
        member_id,
        choice,
        responded_at: now,
    };
    let stored = state.response_repo.upsert_response(response).await?;
    state.metrics.record_response();
    Ok(stored)
}
