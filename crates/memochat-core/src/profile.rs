use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Per-user profile. Preferences keep insertion order so rendered context is
/// stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub preferences: IndexMap<String, String>,
}

impl Profile {
    /// Apply `update`: a provided name overwrites, preferences are inserted or
    /// overwritten key by key. Existing keys are never removed.
    pub fn merge(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = Some(name);
        }
        for (key, value) in update.preferences {
            self.preferences.insert(key, value);
        }
    }
}

/// A structured profile change. Later writes win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub preferences: IndexMap<String, String>,
}

impl ProfileUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_preference(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.preferences.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.preferences.is_empty()
    }
}

/// User id to profile mapping. Profiles are created on first activation and
/// never deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileStore {
    profiles: IndexMap<String, Profile>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&Profile> {
        self.profiles.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Profile> {
        self.profiles.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.profiles.contains_key(id)
    }

    /// Insert an empty profile for `id` if none exists. Returns `true` when
    /// a new profile was created.
    pub fn ensure(&mut self, id: &str) -> bool {
        if self.profiles.contains_key(id) {
            return false;
        }
        self.profiles.insert(id.to_string(), Profile::default());
        true
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
