use std::fmt;

use serde::{Deserialize, Serialize};

/// Where the message store lives and how requests are credentialed.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the chat service, e.g. `http://127.0.0.1:8000/`.
    pub base_url: String,
    /// Raw `Cookie` header carrying the session (and CSRF) cookies.
    /// `FEEDSYNC_COOKIE` overrides this at load time.
    pub cookie: Option<String>,
    /// Cookie holding the anti-forgery token.
    pub csrf_cookie_name: String,
    /// Header the anti-forgery token is echoed in.
    pub csrf_header: String,
    pub connect_timeout_secs: u32,
    pub request_timeout_secs: u32,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("base_url", &self.base_url)
            .field("cookie", &self.cookie.as_ref().map(|_| "[REDACTED]"))
            .field("csrf_cookie_name", &self.csrf_cookie_name)
            .field("csrf_header", &self.csrf_header)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/".into(),
            cookie: None,
            csrf_cookie_name: "csrftoken".into(),
            csrf_header: "X-CSRFToken".into(),
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
        }
    }
}
