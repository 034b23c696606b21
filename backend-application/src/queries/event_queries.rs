use chrono::NaiveDate;

use backend_domain::value_objects::{EventId, TeamId};
use backend_domain::{Event, ValidationError};

use crate::{AppError, AppState};

pub async fn get_event(state: &AppState, id: &EventId) -> Result<Event, AppError> {
    state
        .event_repo
        .fetch_event(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("event '{id}' does not exist")))
}

pub async fn list_team_events(
    state: &AppState,
    team: &TeamId,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Vec<Event>, AppError> {
    if let (Some(from), Some(to)) = (from, to) {
        if to < from {
            return Err(AppError::Validation(ValidationError::new(
                "'to' must not be before 'from'",
            )));
        }
    }
    Ok(state.event_repo.list_team_events(team, from, to).await?)
}
