use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProfileError {
    #[error("profile name cannot be empty")]
    EmptyName,

    #[error("malformed profile registry: {0}")]
    MalformedRegistry(String),
}

/// Validated profile name (trimmed, non-empty).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProfileName(String);

impl ProfileName {
    /// Create a validated profile name.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::EmptyName` if the name is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, ProfileError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ProfileError::EmptyName);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProfileName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered list of known profiles, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileRegistry {
    names: Vec<ProfileName>,
}

impl ProfileRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn names(&self) -> &[ProfileName] {
        &self.names
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[must_use]
    pub fn contains(&self, name: &ProfileName) -> bool {
        self.names.contains(name)
    }

    /// Append `name` if it is not registered yet. Returns true if appended.
    pub fn add(&mut self, name: ProfileName) -> bool {
        if self.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    /// Remove `name`. Returns true if it was registered.
    pub fn remove(&mut self, name: &ProfileName) -> bool {
        let before = self.names.len();
        self.names.retain(|n| n != name);
        self.names.len() != before
    }

    /// Encode as a JSON array of names.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::MalformedRegistry` if encoding fails.
    pub fn to_json(&self) -> Result<String, ProfileError> {
        let names: Vec<&str> = self.names.iter().map(ProfileName::as_str).collect();
        serde_json::to_string(&names).map_err(|err| ProfileError::MalformedRegistry(err.to_string()))
    }

    /// Decode a JSON array of names.
    ///
    /// Blank entries are skipped and duplicates keep their first position.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::MalformedRegistry` if `raw` is not a JSON array of strings.
    pub fn from_json(raw: &str) -> Result<Self, ProfileError> {
        let names: Vec<String> = serde_json::from_str(raw)
            .map_err(|err| ProfileError::MalformedRegistry(err.to_string()))?;
        let mut registry = Self::new();
        for name in names {
            if let Ok(name) = ProfileName::new(name) {
                registry.add(name);
            }
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_trimmed_and_non_empty() {
        assert_eq!(ProfileName::new("  Ana ").unwrap().as_str(), "Ana");
        assert_eq!(ProfileName::new("   "), Err(ProfileError::EmptyName));
    }

    #[test]
    fn registry_keeps_insertion_order_without_duplicates() {
        let mut registry = ProfileRegistry::new();
        assert!(registry.add(ProfileName::new("b").unwrap()));
        assert!(registry.add(ProfileName::new("a").unwrap()));
        assert!(!registry.add(ProfileName::new("b").unwrap()));

        let json = registry.to_json().unwrap();
        assert_eq!(json, r#"["b","a"]"#);
        assert_eq!(ProfileRegistry::from_json(&json).unwrap(), registry);
    }

    #[test]
    fn registry_remove_reports_membership() {
        let mut registry = ProfileRegistry::from_json(r#"["a","b"]"#).unwrap();
        assert!(registry.remove(&ProfileName::new("a").unwrap()));
        assert!(!registry.remove(&ProfileName::new("a").unwrap()));
        assert_eq!(registry.names().len(), 1);
    }

    #[test]
    fn registry_decoding_cleans_entries_and_rejects_garbage() {
        let registry = ProfileRegistry::from_json(r#"["a"," ","a","c"]"#).unwrap();
        let names: Vec<&str> = registry.names().iter().map(ProfileName::as_str).collect();
        assert_eq!(names, vec!["a", "c"]);

        assert!(ProfileRegistry::from_json("{not json").is_err());
        assert!(ProfileRegistry::from_json(r#"{"a":1}"#).is_err());
    }
}
