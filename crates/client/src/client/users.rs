//! User management client methods (admin only)

use super::AdminClient;
use crate::error::Result;
use crate::gateway::ApiRequest;
use crate::types::{User, UserCreate, UserToggleResponse, UserUpdate};

impl AdminClient {
    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.execute(ApiRequest::get("/users")).await
    }

    pub async fn create_user(&self, user: &UserCreate) -> Result<User> {
        self.execute(ApiRequest::post("/users").json(user)?).await
    }

    pub async fn update_user(&self, id: i64, update: &UserUpdate) -> Result<User> {
        self.execute(ApiRequest::put(format!("/users/{id}")).json(update)?)
            .await
    }

    /// Flip the active flag of a user
    pub async fn toggle_user(&self, id: i64) -> Result<User> {
        let response: UserToggleResponse = self
            .execute(ApiRequest::patch(format!("/users/{id}/toggle")))
            .await?;
        Ok(response.user)
    }
}
