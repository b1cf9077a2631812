//! Typed admin API client

pub mod applications;
pub mod auth;
pub mod campaigns;
pub mod stats;
pub mod users;

use crate::config::{ClientConfig, DEFAULT_TIMEOUT};
use crate::error::{ClientError, Result};
use crate::gateway::{ApiRequest, Gateway};
use crate::session::SessionStore;
use reqwest::ClientBuilder;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Admin API client; every call goes through the authenticated [`Gateway`]
#[derive(Clone, Debug)]
pub struct AdminClient {
    gateway: Gateway,
}

impl AdminClient {
    /// Create a new client with default configuration and an in-memory session
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a client from loaded configuration
    pub fn from_config(config: &ClientConfig, session: Arc<SessionStore>) -> Result<Self> {
        Self::builder()
            .base_url(&config.base_url)
            .api_prefix(&config.api_prefix)
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .session(session)
            .build()
    }

    /// Create a new client builder
    pub fn builder() -> AdminClientBuilder {
        AdminClientBuilder::default()
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        self.gateway.session()
    }

    /// Send a request through the gateway and decode the JSON body
    pub async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let response = self.gateway.send(request).await?;
        Ok(response.json().await?)
    }
}

/// Builder for [`AdminClient`]
#[derive(Default)]
pub struct AdminClientBuilder {
    base_url: Option<String>,
    api_prefix: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    session: Option<Arc<SessionStore>>,
}

impl AdminClientBuilder {
    /// Set the base URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the path prefix of the API routes (default `/api`)
    #[must_use]
    pub fn api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = Some(prefix.into());
        self
    }

    /// Set the request timeout (default 15 seconds)
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Share an existing session store
    #[must_use]
    pub fn session(mut self, session: Arc<SessionStore>) -> Self {
        self.session = Some(session);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<AdminClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        Url::parse(&base_url)
            .map_err(|e| ClientError::Configuration(format!("invalid base_url {base_url}: {e}")))?;

        let base_url = base_url.trim_end_matches('/');
        let prefix = normalize_prefix(self.api_prefix.as_deref().unwrap_or("/api"));

        let client = ClientBuilder::new()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .user_agent(
                self.user_agent
                    .unwrap_or_else(|| ClientConfig::default().user_agent),
            )
            .build()?;

        let session = self
            .session
            .unwrap_or_else(|| Arc::new(SessionStore::in_memory()));

        Ok(AdminClient {
            gateway: Gateway::new(client, format!("{base_url}{prefix}"), session),
        })
    }
}

/// `api/` and `/api/` both become `/api`; an empty prefix stays empty
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
