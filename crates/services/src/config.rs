use std::env;

use crate::error::ExerciseGuideError;
use crate::exercise_guide::ExerciseGuideConfig;

const DEFAULT_DB_URL: &str = "sqlite://fitness.sqlite3";

/// Runtime configuration for `FitnessServices`.
#[derive(Clone, Debug)]
pub struct ServicesConfig {
    pub db_url: String,
    pub guide: Option<ExerciseGuideConfig>,
}

impl ServicesConfig {
    #[must_use]
    pub fn new(db_url: impl Into<String>) -> Self {
        Self {
            db_url: db_url.into(),
            guide: None,
        }
    }

    #[must_use]
    pub fn with_guide(mut self, guide: ExerciseGuideConfig) -> Self {
        self.guide = Some(guide);
        self
    }

    /// Read `FITNESS_DB_URL` plus the exercise guide variables.
    ///
    /// # Errors
    ///
    /// Returns `ExerciseGuideError::InvalidBaseUrl` for a malformed guide URL.
    pub fn from_env() -> Result<Self, ExerciseGuideError> {
        let db_url = env::var("FITNESS_DB_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DB_URL.into());
        Ok(Self {
            db_url,
            guide: ExerciseGuideConfig::from_env()?,
        })
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DB_URL)
    }
}
