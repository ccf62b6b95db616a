use std::sync::Arc;

use fitness_core::Catalog;
use fitness_core::aggregate;
use fitness_core::model::{ProfileName, ProfileRegistry};
use storage::{KeyValueStore, keys};
use tracing::{debug, info, warn};

use crate::error::SessionError;
use crate::persistence::WriteBehind;
use crate::progress_store::{ProgressStore, load_record};

/// Who is using the tracker right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn(ProfileName),
}

/// What the profile screen should offer when nobody is logged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    CreateProfile,
    SelectProfile,
}

/// A registered profile with its lifetime total, for profile pickers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileOverview {
    pub name: ProfileName,
    pub lifetime_total: u32,
    pub tier_title: &'static str,
}

/// Owns the profile registry and the active profile's progress.
///
/// At most one `ProgressStore` is alive at a time, and only for the active
/// profile. Every mutation takes `&mut self`, so operations never interleave.
pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
    writer: WriteBehind,
    catalog: Arc<Catalog>,
    registry: ProfileRegistry,
    active: Option<ProgressStore>,
}

impl SessionManager {
    /// Restore the session persisted by a previous run.
    ///
    /// Logs in to the stored active profile if it is still registered;
    /// otherwise starts logged out. Unreadable or malformed data falls back to
    /// an empty registry.
    pub async fn restore(
        store: Arc<dyn KeyValueStore>,
        writer: WriteBehind,
        catalog: Arc<Catalog>,
    ) -> Self {
        let mut manager = Self {
            store,
            writer,
            catalog,
            registry: ProfileRegistry::new(),
            active: None,
        };

        manager.registry = match manager.read(keys::PROFILE_REGISTRY).await {
            Some(raw) => ProfileRegistry::from_json(&raw).unwrap_or_else(|err| {
                warn!(error = %err, "discarding malformed profile registry");
                ProfileRegistry::new()
            }),
            None => ProfileRegistry::new(),
        };

        let pointer = manager
            .read(keys::ACTIVE_PROFILE)
            .await
            .and_then(|raw| ProfileName::new(raw).ok())
            .filter(|name| manager.registry.contains(name));

        match pointer {
            Some(name) => {
                info!(profile = %name, "restored session");
                manager.active = Some(manager.open_progress(name).await);
            }
            None => debug!("no active profile to restore"),
        }

        manager
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        match &self.active {
            Some(progress) => SessionState::LoggedIn(progress.profile().clone()),
            None => SessionState::LoggedOut,
        }
    }

    #[must_use]
    pub fn active_profile(&self) -> Option<&ProfileName> {
        self.active.as_ref().map(ProgressStore::profile)
    }

    #[must_use]
    pub fn progress(&self) -> Option<&ProgressStore> {
        self.active.as_ref()
    }

    pub fn progress_mut(&mut self) -> Option<&mut ProgressStore> {
        self.active.as_mut()
    }

    #[must_use]
    pub fn profiles(&self) -> &[ProfileName] {
        self.registry.names()
    }

    #[must_use]
    pub fn landing(&self) -> Landing {
        if self.registry.is_empty() {
            Landing::CreateProfile
        } else {
            Landing::SelectProfile
        }
    }

    /// Log in as `name`, registering it first if it is new.
    ///
    /// Switching from another profile drops that profile's in-memory store.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Profile` if `name` is blank.
    pub async fn login(&mut self, name: &str) -> Result<&mut ProgressStore, SessionError> {
        let name = ProfileName::new(name)?;

        if self.registry.add(name.clone()) {
            info!(profile = %name, "registered new profile");
            self.persist_registry();
        }
        self.writer.set(keys::ACTIVE_PROFILE, name.as_str());

        let progress = match self.active.take() {
            Some(current) if current.profile() == &name => current,
            _ => {
                info!(profile = %name, "logged in");
                self.open_progress(name).await
            }
        };
        Ok(self.active.insert(progress))
    }

    /// Leave the active profile. Its data stays persisted.
    pub fn logout(&mut self) {
        if let Some(progress) = self.active.take() {
            info!(profile = %progress.profile(), "logged out");
        }
        self.writer.remove(keys::ACTIVE_PROFILE);
    }

    /// Unregister `name` and discard its progress. Logs out if it was active.
    ///
    /// Unknown names are ignored.
    pub fn delete_profile(&mut self, name: &str) {
        let Ok(name) = ProfileName::new(name) else {
            return;
        };
        if !self.registry.remove(&name) {
            debug!(profile = %name, "delete ignored for unknown profile");
            return;
        }

        if self.active_profile() == Some(&name) {
            self.logout();
        }
        self.persist_registry();
        self.writer.remove(keys::progress(&name));
        info!(profile = %name, "deleted profile");
    }

    /// Every registered profile with its lifetime total.
    ///
    /// Each total is computed from that profile's own persisted blob.
    pub async fn profile_overview(&self) -> Vec<ProfileOverview> {
        let mut overview = Vec::with_capacity(self.registry.names().len());
        for name in self.registry.names() {
            let lifetime_total = match self.read(&keys::progress(name)).await {
                Some(raw) => aggregate::lifetime_total(&load_record(name, &raw)),
                None => 0,
            };
            overview.push(ProfileOverview {
                name: name.clone(),
                lifetime_total,
                tier_title: self.catalog.tiers().evaluate(lifetime_total).current.title,
            });
        }
        overview
    }

    /// Wait for every queued write to reach the store.
    pub async fn flush(&self) {
        self.writer.flush().await;
    }

    async fn open_progress(&self, name: ProfileName) -> ProgressStore {
        let raw = self.read(&keys::progress(&name)).await;
        ProgressStore::from_persisted(
            name,
            raw.as_deref(),
            Arc::clone(&self.catalog),
            self.writer.clone(),
        )
    }

    /// Read through the write queue so pending writes are visible.
    async fn read(&self, key: &str) -> Option<String> {
        self.writer.flush().await;
        match self.store.get(key).await {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "failed to read persisted value");
                None
            }
        }
    }

    fn persist_registry(&self) {
        match self.registry.to_json() {
            Ok(raw) => self.writer.set(keys::PROFILE_REGISTRY, raw),
            Err(err) => warn!(error = %err, "failed to encode profile registry"),
        }
    }
}
