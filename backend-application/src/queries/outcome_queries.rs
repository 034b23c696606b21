use backend_domain::value_objects::EventId;
use backend_domain::MatchOutcome;

use crate::{AppError, AppState};

/// Fetches the recorded result. A missing event and an event without a
/// result read as different not-found messages.
pub async fn get_match_result(
    state: &AppState,
    event_id: &EventId,
) -> Result<MatchOutcome, AppError> {
    let event = state
        .event_repo
        .fetch_event(event_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("event '{event_id}' does not exist")))?;

    state
        .outcome_repo
        .fetch_outcome(&event.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no result recorded for event '{event_id}'")))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{NaiveDate, NaiveTime, Utc};

    use backend_domain::value_objects::{MemberId, TeamId};
    use backend_domain::{Event, EventKind, GoalEntry};

    use super::*;
    use crate::test_support::{state_with, InMemoryEvents, InMemoryOutcomes, InMemoryResponses};

    fn match_event(id: &str) -> Event {
        Event {
            id: EventId(id.to_string()),
            team_id: TeamId("first-team".to_string()),
            kind: EventKind::Match,
            title: "League match".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 9, 12).expect("valid date"),
            meeting_time: Some(NaiveTime::from_hms_opt(18, 0, 0).expect("valid time")),
            start_time: NaiveTime::from_hms_opt(19, 0, 0).expect("valid time"),
            end_time: Some(NaiveTime::from_hms_opt(20, 45, 0).expect("valid time")),
            location: None,
            opponent: Some("Rovers".to_string()),
            notes: None,
            requires_response: true,
            is_repeating: false,
            repeat_pattern: None,
            created_by: MemberId("trainer-1".to_string()),
            created_at: Utc::now(),
        }
    }

    fn outcome(event: &str) -> MatchOutcome {
        MatchOutcome {
            event_id: EventId(event.to_string()),
            team_score: 1,
            opponent_score: 0,
            opponent_name: "Rovers".to_string(),
            goals: vec![GoalEntry {
                player: MemberId("m1".to_string()),
                minute: Some(55),
            }],
            assists: vec![],
            submitted_by: MemberId("trainer-1".to_string()),
            submitted_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn recorded_result_is_returned() {
        let outcomes = Arc::new(InMemoryOutcomes::default());
        outcomes
            .outcomes
            .lock()
            .expect("outcomes lock")
            .insert("e1".to_string(), outcome("e1"));
        let state = state_with(
            Arc::new(InMemoryEvents::seeded(vec![match_event("e1")])),
            Arc::new(InMemoryResponses::default()),
            outcomes,
            vec![],
        );

        let stored = get_match_result(&state, &EventId("e1".to_string()))
            .await
            .expect("result should be found");
        assert_eq!(stored.team_score, 1);
    }

    #[tokio::test]
    async fn event_without_result_is_not_found() {
        let state = state_with(
            Arc::new(InMemoryEvents::seeded(vec![match_event("e1")])),
            Arc::new(InMemoryResponses::default()),
            Arc::new(InMemoryOutcomes::default()),
            vec![],
        );

        let err = get_match_result(&state, &EventId("e1".to_string()))
            .await
            .expect_err("no result recorded");
        match err {
            AppError::NotFound(message) => assert!(message.contains("no result")),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_event_is_not_found() {
        let state = state_with(
            Arc::new(InMemoryEvents::default()),
            Arc::new(InMemoryResponses::default()),
            Arc::new(InMemoryOutcomes::default()),
            vec![],
        );

        let err = get_match_result(&state, &EventId("missing".to_string()))
            .await
            .expect_err("missing event");
        match err {
            AppError::NotFound(message) => assert!(message.contains("does not exist")),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
