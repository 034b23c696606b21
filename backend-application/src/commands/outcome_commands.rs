use std::collections::HashSet;

use chrono::Utc;

use backend_domain::ports::StoreError;
use backend_domain::value_objects::{EventId, MemberId};
use backend_domain::{EventKind, MatchOutcome, MatchOutcomeDraft, ValidationError};

use crate::{AppError, AppState};

/// Records the final result of a match, exactly once per event.
///
/// The early duplicate check is advisory only; the store's unique
/// constraint decides when two submissions race.
pub async fn submit_match_result(
    state: &AppState,
    submitted_by: MemberId,
    event_id: EventId,
    draft: MatchOutcomeDraft,
) -> Result<MatchOutcome, AppError> {
    let event = state
        .event_repo
        .fetch_event(&event_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("event '{event_id}' does not exist")))?;

    if event.kind != EventKind::Match {
        return Err(AppError::Validation(ValidationError::new(
            "results can only be recorded for match events",
        )));
    }

    if state.outcome_repo.fetch_outcome(&event.id).await?.is_some() {
        state.metrics.record_result_conflict();
        return Err(AppError::DuplicateMatchResult(event.id));
    }

    let outcome = draft.into_outcome(event.id.clone(), submitted_by, Utc::now())?;

    let roster = state.roster.team_members(&event.team_id).await?;
    let known: HashSet<&MemberId> = roster.iter().map(|m| &m.id).collect();
    for player in outcome.referenced_players() {
        if !known.contains(player) {
            return Err(AppError::Validation(ValidationError::new(format!(
                "player '{player}' is not on the roster of team '{}'",
                event.team_id
            ))));
        }
    }

    match state.outcome_repo.create_outcome(outcome).await {
        Ok(stored) => {
            state.metrics.record_match_result();
            Ok(stored)
        }
        Err(err) => match err.downcast_ref::<StoreError>() {
            Some(StoreError::UniqueViolation(_)) => {
                state.metrics.record_result_conflict();
                Err(AppError::DuplicateMatchResult(event.id))
            }
            None => Err(AppError::Internal(err)),
        },
    }
}
