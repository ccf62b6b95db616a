use std::sync::Arc;

use fitness_core::Catalog;
use fitness_core::model::MonthInstance;
use storage::Storage;
use tracing::info;

use crate::Clock;
use crate::config::ServicesConfig;
use crate::detail_lookup::ExerciseDetailLookup;
use crate::error::AppServicesError;
use crate::exercise_guide::{ExerciseGuideProvider, HttpExerciseGuideService};
use crate::persistence::WriteBehind;
use crate::session_manager::SessionManager;

/// Assembles the tracker's services around one store and one write queue.
///
/// Must be built inside a Tokio runtime.
#[derive(Clone)]
pub struct FitnessServices {
    clock: Clock,
    catalog: Arc<Catalog>,
    storage: Storage,
    writer: WriteBehind,
    guides: Arc<dyn ExerciseGuideProvider>,
}

impl FitnessServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        config: &ServicesConfig,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(&config.db_url).await?;
        let guides = Arc::new(HttpExerciseGuideService::new(config.guide.clone()));
        info!(db_url = %config.db_url, guides = config.guide.is_some(), "opened fitness storage");
        Ok(Self::with_storage(storage, clock, guides))
    }

    /// Build `SQLite`-backed services configured from the environment.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the configuration is invalid or storage
    /// initialization fails.
    pub async fn from_env(clock: Clock) -> Result<Self, AppServicesError> {
        let config = ServicesConfig::from_env()?;
        Self::new_sqlite(&config, clock).await
    }

    /// Build services over a volatile in-memory store.
    #[must_use]
    pub fn in_memory(clock: Clock, guides: Arc<dyn ExerciseGuideProvider>) -> Self {
        Self::with_storage(Storage::in_memory(), clock, guides)
    }

    #[must_use]
    pub fn with_storage(
        storage: Storage,
        clock: Clock,
        guides: Arc<dyn ExerciseGuideProvider>,
    ) -> Self {
        let writer = WriteBehind::spawn(Arc::clone(&storage.kv));
        Self {
            clock,
            catalog: Arc::new(Catalog::standard()),
            storage,
            writer,
            guides,
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Restore the persisted session.
    pub async fn session_manager(&self) -> SessionManager {
        SessionManager::restore(
            Arc::clone(&self.storage.kv),
            self.writer.clone(),
            Arc::clone(&self.catalog),
        )
        .await
    }

    #[must_use]
    pub fn detail_lookup(&self) -> ExerciseDetailLookup {
        ExerciseDetailLookup::new(Arc::clone(&self.guides))
    }

    /// The month to show first: the one containing today, else the first.
    #[must_use]
    pub fn default_month(&self) -> Option<&MonthInstance> {
        self.catalog.calendar().default_month(self.clock.today())
    }

    /// Wait for queued writes to reach storage.
    pub async fn shutdown(&self) {
        self.writer.flush().await;
    }
}
