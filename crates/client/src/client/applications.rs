//! Lead application client methods

use super::AdminClient;
use crate::error::Result;
use crate::gateway::ApiRequest;
use crate::types::{Application, ApplicationDeleteResponse, ApplicationFilters, ApplicationUpdate};

impl AdminClient {
    /// List applications, newest first, narrowed by `filters`
    pub async fn list_applications(&self, filters: &ApplicationFilters) -> Result<Vec<Application>> {
        self.execute(ApiRequest::get("/applications").query(filters.to_query()))
            .await
    }

    /// Set status and revenue of an application
    pub async fn update_application(
        &self,
        id: i64,
        update: &ApplicationUpdate,
    ) -> Result<Application> {
        self.execute(ApiRequest::put(format!("/applications/{id}")).json(update)?)
            .await
    }

    pub async fn delete_application(&self, id: i64) -> Result<ApplicationDeleteResponse> {
        self.execute(ApiRequest::delete(format!("/applications/{id}")))
            .await
    }
}
