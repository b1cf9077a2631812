//! Authentication API client methods

use super::AdminClient;
use crate::error::{ClientError, Result};
use crate::gateway::{ApiRequest, LOGIN_PATH, LOGOUT_PATH, ME_PATH};
use crate::types::{AuthResponse, LoginRequest, LogoutRequest, User};
use tracing::{debug, info};

impl AdminClient {
    /// Log in and store the issued token pair in the session
    pub async fn login(
        &self,
        login: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<User> {
        let request = ApiRequest::post(LOGIN_PATH).json(&LoginRequest {
            login: login.into(),
            password: password.into(),
        })?;

        let auth: AuthResponse = self.execute(request).await?;
        info!(user = %auth.user.login, role = %auth.user.role, "Logged in");

        self.session()
            .set_session(auth.access_token, auth.refresh_token, auth.user.clone());
        Ok(auth.user)
    }

    /// Revoke the refresh token server-side and clear the session
    ///
    /// Best effort: the server call may fail, the session is cleared regardless.
    pub async fn logout(&self) {
        let body = LogoutRequest {
            refresh_token: self.session().refresh_token(),
        };

        let result = match ApiRequest::post(LOGOUT_PATH).json(&body) {
            Ok(request) => self.gateway().send(request).await.map(drop),
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            debug!("Ignoring logout failure: {e}");
        }

        self.session().clear_session();
        info!("Logged out");
    }

    /// Fetch the current identity; a failure invalidates the session
    pub async fn me(&self) -> Result<User> {
        match self.execute::<User>(ApiRequest::get(ME_PATH)).await {
            Ok(user) => {
                self.session().set_user(Some(user.clone()));
                Ok(user)
            }
            Err(e) => {
                debug!("Identity check failed, clearing session: {e}");
                self.session().clear_session();
                Err(e)
            }
        }
    }

    /// The cached identity, fetched from the server if only tokens are held
    pub async fn ensure_user(&self) -> Result<User> {
        let session = self.session().snapshot();
        if !session.is_authenticated() {
            return Err(ClientError::AuthenticationFailed("not logged in".into()));
        }

        match session.user {
            Some(user) => Ok(user),
            None => self.me().await,
        }
    }
}
