use axum::Router;

use backend_application::AppState;

use crate::handlers::{event_handlers, ops_handlers, outcome_handlers, response_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/v1/events",
            axum::routing::post(event_handlers::create_event)
                .get(event_handlers::list_team_events),
        )
        .route(
            "/v1/events/recurring",
            axum::routing::post(event_handlers::create_recurring_events),
        )
        .route(
            "/v1/events/:id",
            axum::routing::get(event_handlers::get_event),
        )
        .route(
            "/v1/events/:id/response",
            axum::routing::put(response_handlers::respond_to_event),
        )
        .route(
            "/v1/events/:id/responses",
            axum::routing::get(response_handlers::list_event_responses),
        )
        .route(
            "/v1/events/:id/result",
            axum::routing::post(outcome_handlers::submit_match_result)
                .get(outcome_handlers::get_match_result),
        )
        .route(
            "/v1/ops/health/live",
            axum::routing::get(ops_handlers::health_live),
        )
        .route(
            "/v1/ops/health/ready",
            axum::routing::get(ops_handlers::health_ready),
        )
        .route(
            "/v1/ops/metrics/prometheus",
            axum::routing::get(ops_handlers::metrics_prometheus),
        )
        .route(
            "/v1/ops/notify-target/check",
            axum::routing::get(ops_handlers::notify_target_check),
        )
        .with_state(state)
}
