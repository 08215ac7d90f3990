//! HTTP implementation of the message store client.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use feedsync_common::{
    FeedsyncError, FetchError, Message, SendError, SendReceipt, SendRequest,
};
use reqwest::{RequestBuilder, Url};
use tracing::{debug, warn};

use super::classify::{classify_batch, classify_send_failure};
use super::cookies::cookie_value;
use super::MessageStore;
use crate::scheduler::FetchOutcome;

const HISTORY_PATH: &str = "api/history";
const MESSAGES_PATH: &str = "api/messages";
const SEND_PATH: &str = "api/send";

/// Connection settings for [`HttpStore`].
#[derive(Clone)]
pub struct HttpStoreConfig {
    pub base_url: String,
    /// Raw `Cookie` header sent with every request.
    pub cookie: Option<String>,
    pub csrf_cookie_name: String,
    pub csrf_header: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl fmt::Debug for HttpStoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpStoreConfig")
            .field("base_url", &self.base_url)
            .field("cookie", &self.cookie.as_ref().map(|_| "[REDACTED]"))
            .field("csrf_cookie_name", &self.csrf_cookie_name)
            .field("csrf_header", &self.csrf_header)
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Default for HttpStoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/".into(),
            cookie: None,
            csrf_cookie_name: "csrftoken".into(),
            csrf_header: "X-CSRFToken".into(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Message store reached over the chat service's JSON API.
pub struct HttpStore {
    config: HttpStoreConfig,
    base: Url,
    csrf_token: Option<String>,
    http: reqwest::Client,
}

impl HttpStore {
    pub fn new(config: HttpStoreConfig) -> Result<Self, FeedsyncError> {
        let mut raw = config.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base = Url::parse(&raw)
            .map_err(|e| FeedsyncError::Other(format!("invalid base URL {raw:?}: {e}")))?;

        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| FeedsyncError::Other(format!("failed to build HTTP client: {e}")))?;

        let csrf_token = config
            .cookie
            .as_deref()
            .and_then(|c| cookie_value(c, &config.csrf_cookie_name));
        if config.cookie.is_some() && csrf_token.is_none() {
            warn!(
                cookie = %config.csrf_cookie_name,
                "no anti-forgery cookie found, sends will likely be rejected"
            );
        }

        Ok(Self {
            config,
            base,
            csrf_token,
            http,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Host and port the store is reached on.
    pub fn host_port(&self) -> Option<(String, u16)> {
        let host = self.base.host_str()?.to_string();
        let port = self.base.port_or_known_default()?;
        Some((host, port))
    }

    fn endpoint(&self, path: &str) -> Url {
        // `path` is a relative constant and `base` ends with '/', so joining
        // cannot fail.
        self.base.join(path).unwrap_or_else(|_| self.base.clone())
    }

    /// Attach the session cookie.
    fn credentialed(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.cookie {
            Some(cookie) => request.header(reqwest::header::COOKIE, cookie),
            None => request,
        }
    }

    async fn get_body(&self, url: Url) -> Result<Vec<u8>, FetchError> {
        let response = self
            .credentialed(self.http.get(url))
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Transport(format!("HTTP {status}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl MessageStore for HttpStore {
    async fn history(&self) -> Result<Vec<Message>, FetchError> {
        let body = self.get_body(self.endpoint(HISTORY_PATH)).await?;
        match classify_batch(&body) {
            FetchOutcome::GotMessages(messages) => Ok(messages),
            FetchOutcome::Empty => Ok(Vec::new()),
            FetchOutcome::Failed(e) => Err(e),
        }
    }

    async fn fetch_since(&self, after: u64) -> FetchOutcome {
        let mut url = self.endpoint(MESSAGES_PATH);
        url.query_pairs_mut()
            .append_pair("after", &after.to_string());
        debug!(after, "fetching new messages");

        match self.get_body(url).await {
            Ok(body) => classify_batch(&body),
            Err(e) => FetchOutcome::Failed(e),
        }
    }

    async fn send(&self, text: &str) -> Result<SendReceipt, SendError> {
        let response = self
            .credentialed(self.http.post(self.endpoint(SEND_PATH)))
            .header(reqwest::header::REFERER, self.base.as_str())
            .header(
                self.config.csrf_header.as_str(),
                self.csrf_token.as_deref().unwrap_or(""),
            )
            .json(&SendRequest {
                message: text.to_string(),
            })
            .send()
            .await
            .map_err(|e| SendError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_send_failure(status.as_u16(), &body));
        }

        response
            .json::<SendReceipt>()
            .await
            .map_err(|e| SendError::MalformedResponse(e.to_string()))
    }
}
