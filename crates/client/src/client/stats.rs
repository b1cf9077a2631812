//! Statistics client methods

use super::AdminClient;
use crate::error::Result;
use crate::gateway::ApiRequest;
use crate::types::{CampaignStatsResponse, DashboardResponse};

impl AdminClient {
    /// Totals, per-campaign metrics and revenue timeline
    pub async fn dashboard(&self) -> Result<DashboardResponse> {
        self.execute(ApiRequest::get("/stats/dashboard")).await
    }

    pub async fn campaign_stats(&self, campaign_id: i64) -> Result<CampaignStatsResponse> {
        self.execute(ApiRequest::get(format!("/stats/campaign/{campaign_id}")))
            .await
    }
}
