//! Authenticated request gateway
//!
//! Every request goes out with the session's access token as a bearer
//! credential. When a request comes back 401 the gateway refreshes the
//! token pair once and replays the request exactly once with the new token.
//! Concurrent 401s share a single refresh call: the first caller starts it,
//! everyone else awaits the same [`Shared`] future, and the slot is emptied
//! as soon as the refresh settles.

use crate::error::{ClientError, Result};
use crate::session::SessionStore;
use crate::types::{AuthResponse, RefreshRequest};
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Response};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub const LOGIN_PATH: &str = "/auth/login";
pub const REFRESH_PATH: &str = "/auth/refresh";
pub const LOGOUT_PATH: &str = "/auth/logout";
pub const ME_PATH: &str = "/auth/me";

/// Outgoing request, kept as data so it can be replayed after a refresh
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    headers: HeaderMap,
    retried: bool,
}

impl ApiRequest {
    /// Create a request for `path`, relative to the API prefix
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            headers: HeaderMap::new(),
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append query pairs
    #[must_use]
    pub fn query(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Set a JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Add an extra header
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether this request has already been replayed after a refresh
    pub fn is_retried(&self) -> bool {
        self.retried
    }

    /// Login and refresh calls are never recovered by a refresh
    pub fn is_auth_request(&self) -> bool {
        self.path.contains(LOGIN_PATH) || self.path.contains(REFRESH_PATH)
    }
}

type PendingRefresh = Shared<BoxFuture<'static, Option<String>>>;

/// Cheap-to-clone handle; clones share the session and the refresh slot
#[derive(Clone)]
pub struct Gateway {
    inner: Arc<GatewayInner>,
}

struct GatewayInner {
    http: Client,
    api_url: String,
    session: Arc<SessionStore>,
    pending_refresh: Mutex<Option<PendingRefresh>>,
}

impl fmt::Debug for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway")
            .field("api_url", &self.inner.api_url)
            .field("authenticated", &self.inner.session.is_authenticated())
            .field(
                "refresh_in_flight",
                &self
                    .inner
                    .pending_refresh
                    .try_lock()
                    .map(|slot| slot.is_some())
                    .unwrap_or(true),
            )
            .finish()
    }
}

impl Gateway {
    /// `api_url` is the base URL with the API prefix already applied
    pub fn new(http: Client, api_url: impl Into<String>, session: Arc<SessionStore>) -> Self {
        Self {
            inner: Arc::new(GatewayInner {
                http,
                api_url: api_url.into(),
                session,
                pending_refresh: Mutex::new(None),
            }),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.inner.api_url
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.inner.session
    }

    /// Send a request, recovering once from an expired access token
    ///
    /// Errors are returned exactly as the transport or server produced them.
    pub async fn send(&self, mut request: ApiRequest) -> Result<Response> {
        let token = self.inner.session.access_token();
        let error = match self.dispatch(&request, token.as_deref()).await {
            Ok(response) => return Ok(response),
            Err(error) => error,
        };

        if !error.is_unauthorized() || request.retried || request.is_auth_request() {
            return Err(error);
        }

        request.retried = true;
        let Some(new_token) = self.refresh_access_token().await else {
            return Err(error);
        };

        debug!(method = %request.method, path = %request.path, "Replaying request with refreshed token");
        self.dispatch(&request, Some(&new_token)).await
    }

    /// Obtain a new access token, sharing one refresh call among all callers
    ///
    /// Returns `None` when no refresh token is held or the refresh failed; in
    /// both cases the session has been cleared.
    pub async fn refresh_access_token(&self) -> Option<String> {
        let Some(refresh_token) = self.inner.session.refresh_token() else {
            debug!("No refresh token held, clearing session");
            self.inner.session.clear_session();
            return None;
        };

        let pending = {
            let mut slot = self.inner.pending_refresh.lock().await;
            slot.get_or_insert_with(|| self.start_refresh(refresh_token))
                .clone()
        };

        pending.await
    }

    fn start_refresh(&self, refresh_token: String) -> PendingRefresh {
        let gateway = self.clone();

        async move {
            info!("Access token rejected, refreshing session");

            let token = match gateway.exchange_refresh_token(refresh_token).await {
                Ok(auth) => {
                    info!(user = %auth.user.login, "Session refreshed");
                    let access_token = auth.access_token.clone();
                    gateway
                        .inner
                        .session
                        .set_session(auth.access_token, auth.refresh_token, auth.user);
                    Some(access_token)
                }
                Err(e) => {
                    warn!("Token refresh failed, clearing session: {e}");
                    gateway.inner.session.clear_session();
                    None
                }
            };

            gateway.inner.pending_refresh.lock().await.take();
            token
        }
        .boxed()
        .shared()
    }

    async fn exchange_refresh_token(&self, refresh_token: String) -> Result<AuthResponse> {
        let request = ApiRequest::post(REFRESH_PATH).json(&RefreshRequest { refresh_token })?;
        let token = self.inner.session.access_token();
        let response = self.dispatch(&request, token.as_deref()).await?;
        Ok(response.json().await?)
    }

    /// One round trip, no recovery
    async fn dispatch(&self, request: &ApiRequest, token: Option<&str>) -> Result<Response> {
        let url = format!("{}{}", self.inner.api_url, request.path);

        let mut headers = request.headers.clone();
        if token.is_some() {
            headers.remove(AUTHORIZATION);
        }

        let mut builder = self
            .inner
            .http
            .request(request.method.clone(), url)
            .headers(headers);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }

        debug!(
            method = %request.method,
            path = %request.path,
            retried = request.retried,
            "Sending request"
        );

        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response)
        } else {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            debug!(%status, path = %request.path, "Request rejected");
            Err(ClientError::from_status(status, message))
        }
    }
}
