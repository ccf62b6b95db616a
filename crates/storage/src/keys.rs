//! Key layout inside the `fitness` namespace.

use fitness_core::model::ProfileName;

/// Namespace shared by every key the tracker writes.
pub const NAMESPACE: &str = "fitness";

/// Name of the profile that was active when the app last closed.
pub const ACTIVE_PROFILE: &str = "fitness_active_user";

/// JSON array of registered profile names.
pub const PROFILE_REGISTRY: &str = "fitness_users_list";

const PROGRESS_PREFIX: &str = "fitness_progress_";

/// Key of the progress blob owned by `profile`.
#[must_use]
pub fn progress(profile: &ProfileName) -> String {
    format!("{PROGRESS_PREFIX}{profile}")
}
