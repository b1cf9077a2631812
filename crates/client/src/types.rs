//! Wire types exchanged with the admin API

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Investor,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => f.write_str("admin"),
            Self::Investor => f.write_str("investor"),
        }
    }
}

/// Identity record returned by the auth and user endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub login: String,
    pub name: String,
    pub role: Role,
    /// Investor profit share in percent; always null for admins
    pub percent: Option<f64>,
    pub is_active: bool,
    pub created_at: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Login request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

/// Refresh request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Logout request body; an empty object when no refresh token is held
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogoutRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// Token pair issued by login and refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Create user request (admin only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub login: String,
    pub password: String,
    pub name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
}

/// Partial user update; unset fields are left untouched by the server
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
}

/// Response of the toggle-active endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserToggleResponse {
    pub success: bool,
    pub user: User,
}

/// Campaign run state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    #[default]
    Active,
    Paused,
}

impl CampaignStatus {
    /// The state a pause/resume toggle moves to
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Paused,
            Self::Paused => Self::Active,
        }
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => f.write_str("active"),
            Self::Paused => f.write_str("paused"),
        }
    }
}

/// Advertising campaign owned by an investor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: i64,
    pub investor_id: i64,
    #[serde(default)]
    pub investor_login: Option<String>,
    #[serde(default)]
    pub investor_name: Option<String>,
    pub name: String,
    pub budget: f64,
    pub status: CampaignStatus,
    pub created_at: String,
}

/// Create campaign request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignCreate {
    /// Owning investor; investors creating their own campaign leave this unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investor_id: Option<i64>,
    pub name: String,
    pub budget: f64,
    #[serde(default)]
    pub status: CampaignStatus,
}

/// Partial campaign update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investor_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CampaignStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignStatusUpdate {
    pub status: CampaignStatus,
}

/// Lead processing state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    New,
    InProgress,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in_progress",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Courier lead collected by the recruiting bot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: i64,
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub phone: String,
    pub age: i64,
    pub citizenship: String,
    pub source: Option<String>,
    pub contacted: bool,
    pub submitted_at: String,
    pub campaign_id: Option<i64>,
    pub campaign_name: Option<String>,
    /// Raw status; older rows may carry values outside [`ApplicationStatus`]
    pub status: Option<String>,
    pub revenue: Option<f64>,
}

/// Application update; `revenue` is always sent so that null clears it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ApplicationStatus>,
    pub revenue: Option<f64>,
}

/// Query filters for the application list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationFilters {
    pub campaign: Option<i64>,
    pub status: Option<ApplicationStatus>,
    /// Inclusive lower bound, `YYYY-MM-DD`
    pub date_from: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD`
    pub date_to: Option<String>,
}

impl ApplicationFilters {
    /// Query pairs for the filters that are set, in a stable order
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(campaign) = self.campaign {
            query.push(("campaign".to_string(), campaign.to_string()));
        }
        if let Some(status) = self.status {
            query.push(("status".to_string(), status.as_str().to_string()));
        }
        if let Some(date_from) = self.date_from.as_deref().filter(|d| !d.is_empty()) {
            query.push(("date_from".to_string(), date_from.to_string()));
        }
        if let Some(date_to) = self.date_to.as_deref().filter(|d| !d.is_empty()) {
            query.push(("date_to".to_string(), date_to.to_string()));
        }
        query
    }
}

/// Aggregated figures across all visible campaigns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardTotals {
    pub campaigns: i64,
    pub total_budget: f64,
    pub total_revenue: f64,
    pub net_profit: f64,
    pub investor_profit: f64,
    pub admin_profit: f64,
    pub roi: f64,
}

/// Per-campaign profit breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignMetric {
    pub campaign_id: i64,
    pub campaign_name: String,
    pub investor_id: i64,
    pub investor_name: Option<String>,
    pub status: String,
    pub budget: f64,
    pub percent: f64,
    pub applications_count: i64,
    pub total_revenue: f64,
    pub net_profit: f64,
    pub investor_profit: f64,
    pub admin_profit: f64,
    pub roi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub date: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub totals: DashboardTotals,
    pub campaigns: Vec<CampaignMetric>,
    pub timeline: Vec<TimelinePoint>,
    pub generated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignStatsResponse {
    pub campaign: CampaignMetric,
    pub applications_by_status: BTreeMap<String, i64>,
    pub timeline: Vec<TimelinePoint>,
    pub generated_at: String,
}

/// Campaign deletion result; the campaign's applications go with it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignDeleteResponse {
    pub success: bool,
    pub deleted_campaign_id: i64,
    #[serde(default)]
    pub deleted_applications: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationDeleteResponse {
    pub success: bool,
    pub deleted_application_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_application_update_always_sends_revenue() {
        let update = ApplicationUpdate {
            status: Some(ApplicationStatus::InProgress),
            revenue: None,
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, json!({"status": "in_progress", "revenue": null}));
    }

    #[test]
    fn test_logout_request_without_token_is_empty_object() {
        let value = serde_json::to_value(LogoutRequest::default()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_filters_skip_unset_and_empty_dates() {
        let filters = ApplicationFilters {
            campaign: Some(7),
            status: Some(ApplicationStatus::Approved),
            date_from: Some(String::new()),
            date_to: Some("2026-01-31".into()),
        };
        assert_eq!(
            filters.to_query(),
            vec![
                ("campaign".to_string(), "7".to_string()),
                ("status".to_string(), "approved".to_string()),
                ("date_to".to_string(), "2026-01-31".to_string()),
            ]
        );
        assert!(ApplicationFilters::default().to_query().is_empty());
    }

    #[test]
    fn test_auth_response_defaults_token_type() {
        let response: AuthResponse = serde_json::from_value(json!({
            "access_token": "a",
            "refresh_token": "r",
            "expires_in": 900,
            "user": {
                "id": 1,
                "login": "root",
                "name": "Root",
                "role": "admin",
                "percent": null,
                "is_active": true,
                "created_at": "2026-01-01 00:00:00"
            }
        }))
        .unwrap();
        assert_eq!(response.token_type, "bearer");
        assert!(response.user.is_admin());
    }

    #[test]
    fn test_campaign_status_toggle() {
        assert_eq!(CampaignStatus::Active.toggled(), CampaignStatus::Paused);
        assert_eq!(CampaignStatus::Paused.toggled(), CampaignStatus::Active);
    }
}
