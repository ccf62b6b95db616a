use thiserror::Error;

use crate::achievement::AchievementError;
use crate::model::{ProfileError, ProgressError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    Achievement(#[from] AchievementError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievement::TierTable;
    use crate::model::{ProfileName, ProgressRecord};

    #[test]
    fn domain_errors_convert_into_umbrella() {
        let profile: Error = ProfileName::new("").unwrap_err().into();
        assert!(matches!(profile, Error::Profile(_)));

        let progress: Error = ProgressRecord::from_json("[]").unwrap_err().into();
        assert!(matches!(progress, Error::Progress(_)));

        let tiers: Error = TierTable::new(Vec::new()).unwrap_err().into();
        assert_eq!(tiers.to_string(), AchievementError::Empty.to_string());
    }
}
