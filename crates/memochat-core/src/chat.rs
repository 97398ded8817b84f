use crate::constants::history::PROMPT_WINDOW;
use crate::context::{assemble, SessionStore, Turn};
use crate::error::MemochatError;
use crate::llm::TextGenerator;
use crate::profile::ProfileUpdate;
use crate::session::Session;
use tracing::{debug, info, warn};

/// Coordinates one session around a single remote call per chat turn.
///
/// Every operation takes `&mut self` and runs to completion, remote call and
/// file write included, before another can start.
pub struct ChatOrchestrator {
    session: Session,
    store: SessionStore,
    generator: Box<dyn TextGenerator>,
}

impl ChatOrchestrator {
    /// Load the session from `store` and wrap it.
    ///
    /// A missing file starts a fresh session. An unreadable or malformed file
    /// is reported as a warning and also starts a fresh session.
    pub fn new(store: SessionStore, generator: Box<dyn TextGenerator>) -> Self {
        let session = load_or_default(&store);
        Self::with_session(session, store, generator)
    }

    pub fn with_session(
        session: Session,
        store: SessionStore,
        generator: Box<dyn TextGenerator>,
    ) -> Self {
        Self {
            session,
            store,
            generator,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Activate `id`, creating its profile if needed, then save.
    pub fn set_user(&mut self, id: impl Into<String>) {
        self.session.set_active_user(id);
        info!(user = self.session.active_user().unwrap_or_default(), "User set");
        self.persist();
    }

    /// Merge `update` into the active profile, then save.
    ///
    /// Returns `NoActiveUser` without touching state or storage when no user
    /// is active.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<(), MemochatError> {
        self.session.update_active_profile(update)?;
        self.persist();
        Ok(())
    }

    /// Run one chat turn.
    ///
    /// On success both turns are appended, history is compacted if it has
    /// grown long enough, and the session is saved. If generation fails the
    /// session is left exactly as it was and nothing is written.
    pub async fn try_chat(&mut self, message: &str) -> Result<String, MemochatError> {
        let context = self.session.context();
        let window = self.session.history.windowed(PROMPT_WINDOW);
        let prompt = assemble(window, &context, message);
        debug!(
            generator = self.generator.name(),
            history_turns = window.len(),
            prompt_len = prompt.len(),
            "Sending prompt"
        );

        let response = self.generator.generate(&prompt).await?;

        self.session.history.append(Turn::human(message));
        self.session.history.append(Turn::assistant(response.clone()));

        if let Err(e) = self
            .session
            .history
            .compact_if_needed(self.generator.as_ref())
            .await
        {
            warn!(error = %e, "History left uncompacted");
        }

        self.persist();
        Ok(response)
    }

    /// Like [`try_chat`](Self::try_chat), but failures come back as
    /// `"Error: {description}"` text.
    pub async fn chat(&mut self, message: &str) -> String {
        match self.try_chat(message).await {
            Ok(response) => response,
            Err(e) => format!("Error: {}", e),
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&mut self.session) {
            warn!(path = %self.store.path().display(), error = %e, "Save failed");
        }
    }
}

/// Load `store`'s session, or a fresh one if it is absent or unusable.
pub fn load_or_default(store: &SessionStore) -> Session {
    match store.load() {
        Ok(Some(session)) => {
            if let Some(user) = session.active_user() {
                info!(user, turns = session.history.len(), "Loaded session");
            }
            session
        }
        Ok(None) => Session::new(),
        Err(e) => {
            warn!(path = %store.path().display(), error = %e, "Could not load session");
            Session::new()
        }
    }
}
