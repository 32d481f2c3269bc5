//! Shared configuration structures.

use serde::{Deserialize, Serialize};

/// Base service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Service name for logging and tracing
    pub service_name: String,
    /// Host address to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl ServiceConfig {
    /// Socket address string to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "service".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Key-value store (Redis) connection configuration.
#[derive(Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// `redis://` URL or bare `host:port`
    pub url: String,
    /// Optional password sent on connect
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub connect_timeout_seconds: u64,
    pub response_timeout_seconds: u64,
}

impl StoreConfig {
    /// The address as a `redis://` URL.
    pub fn normalized_url(&self) -> String {
        if self.url.contains("://") {
            self.url.clone()
        } else {
            format!("redis://{}", self.url)
        }
    }

    /// The address as a `redis://` URL with any userinfo masked, for logs.
    pub fn redacted_url(&self) -> String {
        let url = self.normalized_url();
        let Some(scheme_end) = url.find("://").map(|i| i + 3) else {
            return url;
        };
        let authority_end = url[scheme_end..]
            .find('/')
            .map_or(url.len(), |i| scheme_end + i);

        match url[scheme_end..authority_end].rfind('@') {
            Some(at) => format!(
                "{}[REDACTED]{}",
                &url[..scheme_end],
                &url[scheme_end + at..]
            ),
            None => url,
        }
    }
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.redacted_url())
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("connect_timeout_seconds", &self.connect_timeout_seconds)
            .field("response_timeout_seconds", &self.response_timeout_seconds)
            .finish()
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            password: None,
            connect_timeout_seconds: 5,
            response_timeout_seconds: 5,
        }
    }
}
