//! Campaign management client methods

use super::AdminClient;
use crate::error::Result;
use crate::gateway::ApiRequest;
use crate::types::{
    Campaign, CampaignCreate, CampaignDeleteResponse, CampaignStatus, CampaignStatusUpdate,
    CampaignUpdate,
};

impl AdminClient {
    /// List campaigns visible to the current user
    pub async fn list_campaigns(&self) -> Result<Vec<Campaign>> {
        self.execute(ApiRequest::get("/campaigns")).await
    }

    pub async fn create_campaign(&self, campaign: &CampaignCreate) -> Result<Campaign> {
        self.execute(ApiRequest::post("/campaigns").json(campaign)?)
            .await
    }

    pub async fn update_campaign(&self, id: i64, update: &CampaignUpdate) -> Result<Campaign> {
        self.execute(ApiRequest::put(format!("/campaigns/{id}")).json(update)?)
            .await
    }

    /// Pause or resume a campaign
    pub async fn set_campaign_status(&self, id: i64, status: CampaignStatus) -> Result<Campaign> {
        let request =
            ApiRequest::patch(format!("/campaigns/{id}/status")).json(&CampaignStatusUpdate { status })?;
        self.execute(request).await
    }

    /// Delete a campaign together with its applications
    pub async fn delete_campaign(&self, id: i64) -> Result<CampaignDeleteResponse> {
        self.execute(ApiRequest::delete(format!("/campaigns/{id}")))
            .await
    }
}
