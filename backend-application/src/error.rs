use backend_domain::value_objects::EventId;
use backend_domain::{Event, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    NotFound(String),
    #[error("a result is already recorded for event '{0}'")]
    DuplicateMatchResult(EventId),
    #[error("responses for event '{0}' are closed")]
    ResponseWindowClosed(EventId),
    /// A series insert failed midway. The events created before the
    /// failure stay persisted; `created` reports that prefix.
    #[error("series partially created: {} of {} events persisted", .created.len(), .requested)]
    PartialSeries {
        created: Vec<Event>,
        requested: usize,
        #[source]
        source: anyhow::Error,
    },
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
