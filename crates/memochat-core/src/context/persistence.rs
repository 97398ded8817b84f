use crate::constants::{defaults, history::PERSIST_WINDOW};
use crate::context::history::{now_timestamp, HistoryLog, Turn};
use crate::error::MemochatError;
use crate::profile::ProfileStore;
use crate::session::Session;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// On-disk shape of a session. Every field is optional on load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionFile {
    #[serde(default)]
    pub profiles: ProfileStore,
    #[serde(default)]
    pub current_user: Option<String>,
    #[serde(default)]
    pub history: Vec<Turn>,
    #[serde(default)]
    pub last_saved: Option<String>,
}

impl SessionFile {
    /// Snapshot `session`, keeping only the last [`PERSIST_WINDOW`] turns.
    pub fn snapshot(session: &Session, last_saved: String) -> Self {
        Self {
            profiles: session.profiles.clone(),
            current_user: session.active_user().map(str::to_string),
            history: session.history.windowed(PERSIST_WINDOW).to_vec(),
            last_saved: Some(last_saved),
        }
    }

    pub fn into_session(self) -> Session {
        Session::from_parts(
            self.profiles,
            self.current_user,
            HistoryLog::from_turns(self.history),
            self.last_saved,
        )
    }
}

/// Reads and overwrites the single session file.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `memochat_session.json` in the working directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from(defaults::SESSION_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the session file with the current state and stamp
    /// `session.last_saved` on success.
    pub fn save(&self, session: &mut Session) -> Result<(), MemochatError> {
        let stamp = now_timestamp();
        let file = SessionFile::snapshot(session, stamp.clone());
        let contents = serde_json::to_string_pretty(&file).map_err(|e| {
            MemochatError::Persistence(format!("Failed to serialize session: {}", e))
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                MemochatError::Persistence(format!("Failed to create session directory: {}", e))
            })?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, contents).map_err(|e| {
            MemochatError::Persistence(format!("Failed to write temporary session file: {}", e))
        })?;

        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(MemochatError::Persistence(format!(
                "Failed to rename session file: {}",
                e
            )));
        }

        debug!(path = %self.path.display(), turns = file.history.len(), "Session saved");
        session.last_saved = Some(stamp);
        Ok(())
    }

    /// Read the session file.
    ///
    /// `Ok(None)` when no file exists yet; an error when it exists but cannot
    /// be read or parsed.
    pub fn load(&self) -> Result<Option<Session>, MemochatError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(MemochatError::Persistence(format!(
                    "Failed to read session file: {}",
                    e
                )))
            }
        };

        let file: SessionFile = serde_json::from_str(&contents).map_err(|e| {
            MemochatError::Persistence(format!("Failed to parse session file: {}", e))
        })?;

        Ok(Some(file.into_session()))
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default() {
        let file: SessionFile = serde_json::from_str("{}").unwrap();
        let session = file.into_session();
        assert!(session.profiles.is_empty());
        assert!(session.active_user().is_none());
        assert!(session.history.is_empty());
    }

    #[test]
    fn test_reads_null_name_and_untimed_turns() {
        let raw = r#"{
            "profiles": {"u1": {"name": null, "preferences": {"z": "1", "a": "2"}}},
            "current_user": "u1",
            "history": [
                {"role": "system", "content": "Previous conversation summary: s"},
                {"role": "human", "content": "hi", "timestamp": "2024-05-01T10:00:00.123456"}
            ]
        }"#;
        let session = serde_json::from_str::<SessionFile>(raw)
            .unwrap()
            .into_session();

        let profile = session.active_profile().unwrap();
        assert!(profile.name.is_none());
        let keys: Vec<_> = profile.preferences.keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a"]);
        assert_eq!(session.history.len(), 2);
        assert!(session.history.turns()[0].timestamp.is_none());
    }

    #[test]
    fn test_unknown_role_is_a_parse_error() {
        let raw = r#"{"history": [{"role": "robot", "content": "x"}]}"#;
        assert!(serde_json::from_str::<SessionFile>(raw).is_err());
    }
}
