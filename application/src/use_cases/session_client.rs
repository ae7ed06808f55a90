//! Session Client use case.
//!
//! Creates, lists, switches and deletes server-side chat sessions and
//! reconciles the results into the [`ChatViewModel`]. Failures are logged;
//! only deletion reports its error so the caller can alert the user.

use crate::ports::chat_api::{ApiError, ChatApi};
use crate::ports::confirmation::ConfirmationPort;
use crate::use_cases::render_message::MessageRenderer;
use docchat_domain::text::DELETE_CONFIRM_PROMPT;
use docchat_domain::{ChatViewModel, MessageView, Session, SessionId};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Errors from session operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Error loading chat sessions: {0}")]
    List(ApiError),

    #[error("Error creating new chat session: {0}")]
    Create(ApiError),

    #[error("Error switching session: {0}")]
    Switch(ApiError),

    #[error("Error deleting chat session: {0}")]
    Delete(ApiError),
}

/// What a delete request ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// User declined; nothing was sent
    Declined,
    /// The active session was deleted and a fresh one created
    Recreated,
    /// Another session was deleted and the list refreshed
    Refreshed,
}

/// A freshly created server session, ready to be shown
#[derive(Debug, Clone)]
pub struct NewConversation {
    pub id: Option<SessionId>,
    pub welcome: MessageView,
    /// Refreshed sidebar; `None` when the list could not be loaded
    pub sessions: Option<Vec<Session>>,
}

impl NewConversation {
    pub fn apply(self, view: &mut ChatViewModel) {
        view.start_new_conversation(self.id, self.welcome);
        if let Some(sessions) = self.sessions {
            view.set_sessions(sessions);
        }
    }
}

/// A session the server switched to, with its rendered history
#[derive(Debug, Clone)]
pub struct OpenedSession {
    pub id: SessionId,
    pub history: Vec<MessageView>,
}

impl OpenedSession {
    pub fn apply(self, view: &mut ChatViewModel) {
        view.clear_conversation();
        for message in self.history {
            view.push_message(message);
        }
        view.set_active(self.id);
    }
}

/// Result of a delete request
#[derive(Debug, Clone)]
pub enum Removal {
    Declined,
    Recreated(NewConversation),
    /// Refreshed sidebar, `None` when the list could not be loaded
    Refreshed(Option<Vec<Session>>),
}

impl Removal {
    pub fn outcome(&self) -> DeleteOutcome {
        match self {
            Removal::Declined => DeleteOutcome::Declined,
            Removal::Recreated(_) => DeleteOutcome::Recreated,
            Removal::Refreshed(_) => DeleteOutcome::Refreshed,
        }
    }

    pub fn apply(self, view: &mut ChatViewModel) {
        match self {
            Removal::Declined => {}
            Removal::Recreated(conversation) => conversation.apply(view),
            Removal::Refreshed(Some(sessions)) => view.set_sessions(sessions),
            Removal::Refreshed(None) => {}
        }
    }
}

/// Session operations against the chat server
///
/// The `fetch_*`, `open*` and `remove` methods only talk to the server, so
/// they can run away from the view-model; their results apply later. The
/// methods taking `&mut ChatViewModel` do both in one step.
#[derive(Clone)]
pub struct SessionClient {
    api: Arc<dyn ChatApi>,
    renderer: MessageRenderer,
    confirmation: Arc<dyn ConfirmationPort>,
}

impl SessionClient {
    pub fn new(
        api: Arc<dyn ChatApi>,
        renderer: MessageRenderer,
        confirmation: Arc<dyn ConfirmationPort>,
    ) -> Self {
        Self {
            api,
            renderer,
            confirmation,
        }
    }

    /// Load the session list.
    pub async fn fetch_sessions(&self) -> Result<Vec<Session>, SessionError> {
        match self.api.list_sessions().await {
            Ok(sessions) => {
                debug!("Loaded {} sessions", sessions.len());
                Ok(sessions)
            }
            Err(e) => {
                let err = SessionError::List(e);
                error!("{}", err);
                Err(err)
            }
        }
    }

    /// Render the current session's history, or the welcome message when
    /// there is none or it cannot be loaded.
    pub async fn fetch_history(&self) -> Vec<MessageView> {
        match self.api.chat_history().await {
            Ok(messages) if messages.is_empty() => vec![self.renderer.welcome()],
            Ok(messages) => {
                debug!("Loaded {} history messages", messages.len());
                messages
                    .into_iter()
                    .map(|message| self.renderer.render_message(message))
                    .collect()
            }
            Err(e) => {
                error!("Error loading chat history: {}", e);
                vec![self.renderer.welcome()]
            }
        }
    }

    /// Start a new server session.
    pub async fn open_new(&self) -> Result<NewConversation, SessionError> {
        let id = self.api.new_session().await.map_err(|e| {
            let err = SessionError::Create(e);
            error!("{}", err);
            err
        })?;

        info!(
            "Created new session{}",
            id.as_ref().map(|id| format!(" {}", id)).unwrap_or_default()
        );
        // Logged inside; the new conversation is shown regardless
        let sessions = self.fetch_sessions().await.ok();
        Ok(NewConversation {
            id,
            welcome: self.renderer.welcome(),
            sessions,
        })
    }

    /// Ask the server to make `id` current and load its history.
    pub async fn open(&self, id: SessionId) -> Result<OpenedSession, SessionError> {
        if let Err(e) = self.api.switch_session(&id).await {
            let err = SessionError::Switch(e);
            error!("{}", err);
            return Err(err);
        }

        info!("Switched to session {}", id);
        let history = self.fetch_history().await;
        Ok(OpenedSession { id, history })
    }

    /// Delete `id` after the user confirms.
    ///
    /// Deleting the active session starts a new one; deleting any other
    /// session only refreshes the list.
    pub async fn remove(&self, id: SessionId, was_active: bool) -> Result<Removal, SessionError> {
        let confirmed = match self.confirmation.confirm(DELETE_CONFIRM_PROMPT).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Delete confirmation unavailable, treating as declined: {}", e);
                false
            }
        };
        if !confirmed {
            debug!("Delete of session {} declined", id);
            return Ok(Removal::Declined);
        }

        if let Err(e) = self.api.delete_session(&id).await {
            let err = SessionError::Delete(e);
            error!("{}", err);
            return Err(err);
        }
        info!("Deleted session {}", id);

        if was_active {
            match self.open_new().await {
                Ok(conversation) => Ok(Removal::Recreated(conversation)),
                // The old conversation stays on screen; the list still changed
                Err(_) => Ok(Removal::Refreshed(self.fetch_sessions().await.ok())),
            }
        } else {
            Ok(Removal::Refreshed(self.fetch_sessions().await.ok()))
        }
    }

    /// Refresh the sidebar. The active marker follows the id, not the row.
    pub async fn list(&self, view: &mut ChatViewModel) -> Result<(), SessionError> {
        let sessions = self.fetch_sessions().await?;
        view.set_sessions(sessions);
        Ok(())
    }

    /// Start a new server session and show the welcome message.
    pub async fn create(&self, view: &mut ChatViewModel) -> Result<(), SessionError> {
        self.open_new().await?.apply(view);
        Ok(())
    }

    /// Make `id` the current session and show its history.
    pub async fn switch(&self, view: &mut ChatViewModel, id: SessionId) -> Result<(), SessionError> {
        self.open(id).await?.apply(view);
        Ok(())
    }

    /// Delete `id` after the user confirms, then update `view`.
    pub async fn delete(
        &self,
        view: &mut ChatViewModel,
        id: SessionId,
    ) -> Result<DeleteOutcome, SessionError> {
        let was_active = view.is_active(&id);
        let removal = self.remove(id, was_active).await?;
        let outcome = removal.outcome();
        removal.apply(view);
        Ok(outcome)
    }

    /// Append the current session's history to `view`.
    pub async fn load_history(&self, view: &mut ChatViewModel) {
        for message in self.fetch_history().await {
            view.push_message(message);
        }
    }
}
