use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use backend_application::commands::outcome_commands;
use backend_application::queries::outcome_queries;
use backend_application::AppState;
use backend_domain::value_objects::EventId;
use backend_domain::{MatchOutcome, MatchOutcomeDraft};

use crate::error::HttpError;
use crate::middleware::{acting_member, authorize, require_manager};

pub async fn submit_match_result(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(draft): Json<MatchOutcomeDraft>,
) -> Result<(StatusCode, Json<MatchOutcome>), HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let member = acting_member(&headers)?;
    require_manager(&member)?;
    let outcome =
        outcome_commands::submit_match_result(&state, member.id, EventId(id), draft).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

pub async fn get_match_result(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<MatchOutcome>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    acting_member(&headers)?;
    let outcome = outcome_queries::get_match_result(&state, &EventId(id)).await?;
    Ok(Json(outcome))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{empty_state, member_headers};

    use super::*;

    #[tokio::test]
    async fn fetching_a_result_requires_member_identity() {
        let state = empty_state();

        let err = get_match_result(
            State(state.clone()),
            HeaderMap::new(),
            Path("e1".to_string()),
        )
        .await
        .expect_err("anonymous read must be rejected");
        assert!(matches!(err, HttpError::BadRequest(_)));

        let err = get_match_result(State(state), member_headers("m1"), Path("e1".to_string()))
            .await
            .expect_err("event does not exist");
        assert!(matches!(err, HttpError::NotFound(_)));
    }
}
