//! Shared error types for the services crate.

use thiserror::Error;

use fitness_core::model::ProfileError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `HttpExerciseGuideService`.
///
/// These never reach the progress engine; the provider turns them into a
/// fallback guide.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExerciseGuideError {
    #[error("exercise guide lookups are not configured")]
    Disabled,
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("exercise guide returned an empty response")]
    EmptyResponse,
    #[error("exercise guide request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("malformed exercise guide: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Errors emitted by `SessionManager`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Profile(#[from] ProfileError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Guide(#[from] ExerciseGuideError),
}
