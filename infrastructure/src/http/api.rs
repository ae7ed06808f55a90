//! [`ChatApi`] over the server's `/api/*` endpoints

use super::transport::{HttpTransport, RequestOptions};
use async_trait::async_trait;
use docchat_application::{ApiError, ChatApi, ChatReply};
use docchat_domain::{Message, Session, SessionId};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct SessionsResponse {
    sessions: Vec<Session>,
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    messages: Vec<Message>,
}

/// `new_session` may answer with any 2xx body; the id is optional
#[derive(Debug, Default, Deserialize)]
struct NewSessionResponse {
    #[serde(default)]
    session_id: Option<String>,
}

/// Chat server gateway backed by [`HttpTransport`]
#[derive(Debug, Clone)]
pub struct HttpChatApi {
    transport: HttpTransport,
}

impl HttpChatApi {
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn send_message(&self, message: &str) -> Result<ChatReply, ApiError> {
        let reply: ChatReply = self
            .transport
            .request("/api/chat", RequestOptions::post_json(json!({ "message": message })))
            .await?;
        Ok(reply)
    }

    async fn list_sessions(&self) -> Result<Vec<Session>, ApiError> {
        let response: SessionsResponse = self
            .transport
            .request("/api/sessions", RequestOptions::get())
            .await?;
        Ok(response.sessions)
    }

    async fn new_session(&self) -> Result<Option<SessionId>, ApiError> {
        let raw = self
            .transport
            .request_text("/api/new_session", RequestOptions::post())
            .await?;

        let response = serde_json::from_str::<NewSessionResponse>(&raw).unwrap_or_else(|e| {
            debug!("new_session reply has no usable body: {}", e);
            NewSessionResponse::default()
        });
        Ok(response.session_id.and_then(|id| match SessionId::new(id) {
            Ok(id) => Some(id),
            Err(e) => {
                warn!("Ignoring session id from server: {}", e);
                None
            }
        }))
    }

    async fn switch_session(&self, id: &SessionId) -> Result<(), ApiError> {
        self.transport
            .request_text(
                "/api/switch_session",
                RequestOptions::post_json(json!({ "session_id": id })),
            )
            .await?;
        Ok(())
    }

    async fn delete_session(&self, id: &SessionId) -> Result<(), ApiError> {
        self.transport
            .request_text(
                "/api/delete_session",
                RequestOptions::post_json(json!({ "session_id": id })),
            )
            .await?;
        Ok(())
    }

    async fn chat_history(&self) -> Result<Vec<Message>, ApiError> {
        let response: HistoryResponse = self
            .transport
            .request("/api/chat_history", RequestOptions::get())
            .await?;
        Ok(response.messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::transport::TransportSettings;
    use docchat_domain::Role;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn api(server: &MockServer) -> HttpChatApi {
        HttpChatApi::new(HttpTransport::new(&server.uri(), TransportSettings::default()).unwrap())
    }

    #[tokio::test]
    async fn test_send_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_json(json!({"message": "What is in the report?"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": "The report covers Q3.",
                "documents": ["q3.pdf"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = api(&server).await.send_message("What is in the report?").await.unwrap();
        assert_eq!(reply.response, "The report covers Q3.");
        assert_eq!(reply.documents, vec!["q3.pdf".to_string()]);
    }

    #[tokio::test]
    async fn test_send_message_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "x"})))
            .mount(&server)
            .await;

        let err = api(&server).await.send_message("hi").await.unwrap_err();
        assert_eq!(err, ApiError::Status { status: 500 });
    }

    #[tokio::test]
    async fn test_list_sessions_accepts_extra_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/sessions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sessions": [
                    {"id": "session_2", "title": "Budget", "created_at": "2024-05-01 10:00:00"},
                    {"id": "session_1", "title": "New Conversation"}
                ]
            })))
            .mount(&server)
            .await;

        let sessions = api(&server).await.list_sessions().await.unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].id.as_str(), "session_2");
        assert_eq!(sessions[0].created_at.as_deref(), Some("2024-05-01 10:00:00"));
        assert_eq!(sessions[1].created_at, None);
    }

    #[tokio::test]
    async fn test_new_session_with_and_without_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/new_session"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": true, "session_id": "session_9"})),
            )
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/new_session"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let api = api(&server).await;
        assert_eq!(
            api.new_session().await.unwrap(),
            Some(SessionId::new("session_9").unwrap())
        );
        assert_eq!(api.new_session().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_switch_and_delete_send_session_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/switch_session"))
            .and(body_json(json!({"session_id": "session_1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/delete_session"))
            .and(body_json(json!({"session_id": "session_1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;

        let api = api(&server).await;
        let id = SessionId::new("session_1").unwrap();
        api.switch_session(&id).await.unwrap();
        api.delete_session(&id).await.unwrap();
    }

    #[tokio::test]
    async fn test_switch_unknown_session_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/switch_session"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"error": "Session not found"})),
            )
            .mount(&server)
            .await;

        let err = api(&server)
            .await
            .switch_session(&SessionId::new("gone").unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_chat_history() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/chat_history"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "messages": [
                    {"role": "user", "content": "hi", "timestamp": "2024-05-01 10:00:00"},
                    {"role": "assistant", "content": "hello"}
                ]
            })))
            .mount(&server)
            .await;

        let messages = api(&server).await.chat_history().await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[1].content, "hello");
    }

    #[tokio::test]
    async fn test_chat_history_unknown_role_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/chat_history"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "messages": [{"role": "system", "content": "x"}]
            })))
            .mount(&server)
            .await;

        let err = api(&server).await.chat_history().await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }
}
