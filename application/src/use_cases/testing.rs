//! Scripted port doubles shared by the use case tests.

use crate::ports::chat_api::{ApiError, ChatApi, ChatReply};
use crate::ports::clipboard::{ClipboardError, ClipboardPort};
use async_trait::async_trait;
use docchat_domain::{Message, Session, SessionId};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// `ChatApi` double answering from per-endpoint queues.
///
/// An empty queue yields a benign default (empty list, no id, echo reply).
#[derive(Default)]
pub struct MockApi {
    pub replies: Mutex<VecDeque<Result<ChatReply, ApiError>>>,
    pub session_lists: Mutex<VecDeque<Result<Vec<Session>, ApiError>>>,
    pub new_sessions: Mutex<VecDeque<Result<Option<SessionId>, ApiError>>>,
    pub switches: Mutex<VecDeque<Result<(), ApiError>>>,
    pub deletes: Mutex<VecDeque<Result<(), ApiError>>>,
    pub histories: Mutex<VecDeque<Result<Vec<Message>, ApiError>>>,
    pub calls: Mutex<Vec<String>>,
    /// How long `send_message` takes to answer
    pub reply_delay: Duration,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, result: Result<&str, ApiError>) -> Self {
        self.replies.lock().unwrap().push_back(result.map(|text| ChatReply {
            response: text.to_string(),
            documents: vec![],
        }));
        self
    }

    pub fn slow_replies(mut self, delay: Duration) -> Self {
        self.reply_delay = delay;
        self
    }

    pub fn sessions(self, result: Result<Vec<Session>, ApiError>) -> Self {
        self.session_lists.lock().unwrap().push_back(result);
        self
    }

    pub fn new_session_result(self, result: Result<Option<SessionId>, ApiError>) -> Self {
        self.new_sessions.lock().unwrap().push_back(result);
        self
    }

    pub fn switch_result(self, result: Result<(), ApiError>) -> Self {
        self.switches.lock().unwrap().push_back(result);
        self
    }

    pub fn delete_result(self, result: Result<(), ApiError>) -> Self {
        self.deletes.lock().unwrap().push_back(result);
        self
    }

    pub fn history(self, result: Result<Vec<Message>, ApiError>) -> Self {
        self.histories.lock().unwrap().push_back(result);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

#[async_trait]
impl ChatApi for MockApi {
    async fn send_message(&self, message: &str) -> Result<ChatReply, ApiError> {
        self.record(format!("chat:{}", message));
        if !self.reply_delay.is_zero() {
            tokio::time::sleep(self.reply_delay).await;
        }
        self.replies.lock().unwrap().pop_front().unwrap_or_else(|| {
            Ok(ChatReply {
                response: format!("echo: {}", message),
                documents: vec![],
            })
        })
    }

    async fn list_sessions(&self) -> Result<Vec<Session>, ApiError> {
        self.record("sessions");
        self.session_lists
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(vec![]))
    }

    async fn new_session(&self) -> Result<Option<SessionId>, ApiError> {
        self.record("new_session");
        self.new_sessions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(None))
    }

    async fn switch_session(&self, id: &SessionId) -> Result<(), ApiError> {
        self.record(format!("switch:{}", id));
        self.switches.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }

    async fn delete_session(&self, id: &SessionId) -> Result<(), ApiError> {
        self.record(format!("delete:{}", id));
        self.deletes.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }

    async fn chat_history(&self) -> Result<Vec<Message>, ApiError> {
        self.record("history");
        self.histories
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(vec![]))
    }
}

/// Clipboard double recording copied text
#[derive(Default)]
pub struct MockClipboard {
    pub copied: Mutex<Vec<String>>,
    pub fail: bool,
}

impl ClipboardPort for MockClipboard {
    fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::System("no display".into()));
        }
        self.copied.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

pub fn sid(id: &str) -> SessionId {
    SessionId::new(id).unwrap()
}

pub fn session(id: &str, title: &str) -> Session {
    Session::new(sid(id), title)
}
