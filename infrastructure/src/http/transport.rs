//! JSON-over-HTTP transport
//!
//! A thin wrapper around a cookie-carrying [`reqwest::Client`]. Every call
//! is a single round trip: non-2xx statuses become [`TransportError::Status`],
//! and bodies are decoded only on success.

use super::error::{Result, TransportError};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

/// HTTP method used by the chat API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Per-request options
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<serde_json::Value>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self {
            method: Method::Get,
            body: None,
        }
    }

    pub fn post() -> Self {
        Self {
            method: Method::Post,
            body: None,
        }
    }

    pub fn post_json(body: serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            body: Some(body),
        }
    }
}

/// Client-wide settings
#[derive(Debug, Clone)]
pub struct TransportSettings {
    pub user_agent: String,
    pub timeout: Option<Duration>,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            user_agent: concat!("docchat/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: None,
        }
    }
}

/// Transport bound to one chat server
///
/// The cookie store plays the role of same-origin credentials: the server
/// keeps the current session id in its session cookie.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(base_url: &str, settings: TransportSettings) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| TransportError::InvalidUrl(format!("{base_url}: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .user_agent(settings.user_agent);
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Send a request and decode the JSON reply into `T`
    pub async fn request<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T> {
        let raw = self.request_text(path, options).await?;
        serde_json::from_str(&raw).map_err(|e| TransportError::Decode {
            error: e.to_string(),
            raw,
        })
    }

    /// Send a request and return the raw reply body
    pub async fn request_text(&self, path: &str, options: RequestOptions) -> Result<String> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| TransportError::InvalidUrl(format!("{path}: {e}")))?;

        let mut request = match options.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        };
        if let Some(body) = &options.body {
            request = request.body(body.to_string());
        }

        debug!("{:?} {}", options.method, path);
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("HTTP error! status: {}", status.as_u16());
            error!("Error details: {}", body);
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Pong {
        ok: bool,
    }

    async fn transport(server: &MockServer) -> HttpTransport {
        HttpTransport::new(&server.uri(), TransportSettings::default()).unwrap()
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpTransport::new("not a url", TransportSettings::default()).unwrap_err();
        assert!(matches!(err, TransportError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_post_sends_json_body_and_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/echo"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"message": "hi"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let pong: Pong = transport(&server)
            .await
            .request("/api/echo", RequestOptions::post_json(json!({"message": "hi"})))
            .await
            .unwrap();
        assert_eq!(pong, Pong { ok: true });
    }

    #[tokio::test]
    async fn test_non_success_status_carries_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/broken"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = transport(&server)
            .await
            .request::<Pong>("/api/broken", RequestOptions::get())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            TransportError::Status {
                status: 500,
                body: "boom".into()
            }
        );
    }

    #[tokio::test]
    async fn test_malformed_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/html"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let err = transport(&server)
            .await
            .request::<Pong>("/api/html", RequestOptions::get())
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Decode { raw, .. } if raw == "<html></html>"));
    }

    #[tokio::test]
    async fn test_cookies_are_replayed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "session=abc123; Path=/")
                    .set_body_json(json!({"ok": true})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/whoami"))
            .and(header("cookie", "session=abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let transport = transport(&server).await;
        let _: Pong = transport
            .request("/api/login", RequestOptions::post())
            .await
            .unwrap();
        let pong: Pong = transport
            .request("/api/whoami", RequestOptions::get())
            .await
            .unwrap();
        assert!(pong.ok);
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Reserve a port, then free it so nothing is listening
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let uri = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let transport = HttpTransport::new(&uri, TransportSettings::default()).unwrap();
        let err = transport
            .request::<Pong>("/api/chat", RequestOptions::get())
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
    }
}
