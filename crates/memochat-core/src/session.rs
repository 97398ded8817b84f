use crate::context::{build_context, HistoryLog};
use crate::error::MemochatError;
use crate::profile::{Profile, ProfileStore, ProfileUpdate};
use tracing::info;

/// The full conversational state of one engine instance.
///
/// Invariant: `active_user`, when set, is always a key of `profiles`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub profiles: ProfileStore,
    pub(crate) active_user: Option<String>,
    pub history: HistoryLog,
    pub last_saved: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a session from parts, creating an empty profile for
    /// `active_user` if it has none.
    pub fn from_parts(
        mut profiles: ProfileStore,
        active_user: Option<String>,
        history: HistoryLog,
        last_saved: Option<String>,
    ) -> Self {
        if let Some(ref id) = active_user {
            profiles.ensure(id);
        }
        Self {
            profiles,
            active_user,
            history,
            last_saved,
        }
    }

    pub fn active_user(&self) -> Option<&str> {
        self.active_user.as_deref()
    }

    pub fn active_profile(&self) -> Option<&Profile> {
        self.active_user
            .as_deref()
            .and_then(|id| self.profiles.get(id))
    }

    /// Make `id` the active user, creating an empty profile on first sight.
    /// Existing profiles are left as they are.
    pub fn set_active_user(&mut self, id: impl Into<String>) {
        let id = id.into();
        if self.profiles.ensure(&id) {
            info!(user = %id, "Created profile");
        }
        self.active_user = Some(id);
    }

    /// Merge `update` into the active profile.
    pub fn update_active_profile(&mut self, update: ProfileUpdate) -> Result<(), MemochatError> {
        let id = self
            .active_user
            .as_deref()
            .ok_or(MemochatError::NoActiveUser)?;
        let profile = self
            .profiles
            .get_mut(id)
            .ok_or(MemochatError::NoActiveUser)?;
        profile.merge(update);
        Ok(())
    }

    /// Profile context for the active user, empty when nobody is active.
    pub fn context(&self) -> String {
        build_context(self.active_profile())
    }
}
