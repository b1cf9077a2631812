//! CLI commands

use adpanel_client::AdminClient;
use adpanel_client::types::{
    ApplicationFilters, ApplicationStatus, ApplicationUpdate, CampaignCreate, CampaignStatus,
    CampaignUpdate, Role, UserCreate, UserUpdate,
};
use anyhow::{Result, bail};
use clap::{Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and persist the session
    Login {
        /// Account login
        login: String,

        /// Account password
        #[arg(long, env = "ADPANEL_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Revoke the session on the server and forget it locally
    Logout,

    /// Show the logged-in account
    Whoami,

    /// Campaign management
    Campaigns {
        #[command(subcommand)]
        command: CampaignCommands,
    },

    /// User management (admin only)
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Courier applications
    Applications {
        #[command(subcommand)]
        command: ApplicationCommands,
    },

    /// Profit statistics
    Stats {
        #[command(subcommand)]
        command: StatsCommands,
    },
}

#[derive(Subcommand)]
pub enum CampaignCommands {
    /// List visible campaigns
    List,

    /// Create a campaign
    Create {
        name: String,

        budget: f64,

        /// Owning investor (admins only; investors always own their campaigns)
        #[arg(long)]
        investor: Option<i64>,

        /// Create the campaign paused
        #[arg(long)]
        paused: bool,
    },

    /// Change campaign fields
    Update {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        budget: Option<f64>,

        #[arg(long)]
        investor: Option<i64>,

        #[arg(long)]
        status: Option<CampaignStatusArg>,
    },

    /// Pause or resume a campaign; toggles when no status is given
    Status {
        id: i64,

        status: Option<CampaignStatusArg>,
    },

    /// Delete a campaign together with its applications
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// List all accounts
    List,

    /// Create an account
    Create {
        login: String,

        name: String,

        #[arg(long, env = "ADPANEL_NEW_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(long, default_value = "investor")]
        role: RoleArg,

        /// Investor profit share in percent
        #[arg(long)]
        percent: Option<f64>,
    },

    /// Change account fields
    Update {
        id: i64,

        #[arg(long)]
        login: Option<String>,

        #[arg(long)]
        password: Option<String>,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        role: Option<RoleArg>,

        #[arg(long)]
        percent: Option<f64>,
    },

    /// Enable or disable an account
    Toggle { id: i64 },
}

#[derive(Subcommand)]
pub enum ApplicationCommands {
    /// List applications, newest first
    List {
        #[arg(long)]
        campaign: Option<i64>,

        #[arg(long)]
        status: Option<ApplicationStatusArg>,

        /// Earliest submission date, YYYY-MM-DD
        #[arg(long)]
        from: Option<String>,

        /// Latest submission date, YYYY-MM-DD
        #[arg(long)]
        to: Option<String>,
    },

    /// Set status and revenue of an application
    Update {
        id: i64,

        #[arg(long)]
        status: Option<ApplicationStatusArg>,

        /// Revenue earned from the lead; omitting it clears the stored value
        #[arg(long)]
        revenue: Option<f64>,
    },

    /// Delete an application
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum StatsCommands {
    /// Totals, per-campaign profit and revenue timeline
    Dashboard,

    /// Detailed statistics for one campaign
    Campaign { id: i64 },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CampaignStatusArg {
    Active,
    Paused,
}

impl From<CampaignStatusArg> for CampaignStatus {
    fn from(status: CampaignStatusArg) -> Self {
        match status {
            CampaignStatusArg::Active => Self::Active,
            CampaignStatusArg::Paused => Self::Paused,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum RoleArg {
    Admin,
    Investor,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Admin => Self::Admin,
            RoleArg::Investor => Self::Investor,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ApplicationStatusArg {
    New,
    InProgress,
    Approved,
    Rejected,
}

impl From<ApplicationStatusArg> for ApplicationStatus {
    fn from(status: ApplicationStatusArg) -> Self {
        match status {
            ApplicationStatusArg::New => Self::New,
            ApplicationStatusArg::InProgress => Self::InProgress,
            ApplicationStatusArg::Approved => Self::Approved,
            ApplicationStatusArg::Rejected => Self::Rejected,
        }
    }
}

impl Commands {
    pub async fn execute(self, client: &AdminClient) -> Result<()> {
        match self {
            Self::Login { login, password } => {
                let user = client.login(login, password).await?;
                print_json(&user)
            }
            Self::Logout => {
                client.logout().await;
                println!("Logged out");
                Ok(())
            }
            Self::Whoami => {
                let user = client.ensure_user().await?;
                print_json(&user)
            }
            Self::Campaigns { command } => command.execute(client).await,
            Self::Users { command } => command.execute(client).await,
            Self::Applications { command } => command.execute(client).await,
            Self::Stats { command } => command.execute(client).await,
        }
    }
}

impl CampaignCommands {
    pub async fn execute(self, client: &AdminClient) -> Result<()> {
        match self {
            Self::List => print_json(&client.list_campaigns().await?),
            Self::Create {
                name,
                budget,
                investor,
                paused,
            } => {
                let status = if paused {
                    CampaignStatus::Paused
                } else {
                    CampaignStatus::Active
                };
                let campaign = client
                    .create_campaign(&CampaignCreate {
                        investor_id: investor,
                        name,
                        budget,
                        status,
                    })
                    .await?;
                info!(id = campaign.id, "Campaign created");
                print_json(&campaign)
            }
            Self::Update {
                id,
                name,
                budget,
                investor,
                status,
            } => {
                let update = CampaignUpdate {
                    investor_id: investor,
                    name,
                    budget,
                    status: status.map(Into::into),
                };
                print_json(&client.update_campaign(id, &update).await?)
            }
            Self::Status { id, status } => {
                let status = match status {
                    Some(status) => status.into(),
                    None => {
                        let campaigns = client.list_campaigns().await?;
                        let Some(campaign) = campaigns.iter().find(|c| c.id == id) else {
                            bail!("Campaign {id} not found");
                        };
                        campaign.status.toggled()
                    }
                };
                print_json(&client.set_campaign_status(id, status).await?)
            }
            Self::Delete { id } => print_json(&client.delete_campaign(id).await?),
        }
    }
}

impl UserCommands {
    pub async fn execute(self, client: &AdminClient) -> Result<()> {
        match self {
            Self::List => print_json(&client.list_users().await?),
            Self::Create {
                login,
                name,
                password,
                role,
                percent,
            } => {
                let user = client
                    .create_user(&UserCreate {
                        login,
                        password,
                        name,
                        role: role.into(),
                        percent,
                    })
                    .await?;
                info!(id = user.id, login = %user.login, "User created");
                print_json(&user)
            }
            Self::Update {
                id,
                login,
                password,
                name,
                role,
                percent,
            } => {
                let update = UserUpdate {
                    login,
                    password,
                    name,
                    role: role.map(Into::into),
                    percent,
                };
                print_json(&client.update_user(id, &update).await?)
            }
            Self::Toggle { id } => print_json(&client.toggle_user(id).await?),
        }
    }
}

impl ApplicationCommands {
    pub async fn execute(self, client: &AdminClient) -> Result<()> {
        match self {
            Self::List {
                campaign,
                status,
                from,
                to,
            } => {
                let filters = ApplicationFilters {
                    campaign,
                    status: status.map(Into::into),
                    date_from: from,
                    date_to: to,
                };
                print_json(&client.list_applications(&filters).await?)
            }
            Self::Update {
                id,
                status,
                revenue,
            } => {
                let update = ApplicationUpdate {
                    status: status.map(Into::into),
                    revenue,
                };
                print_json(&client.update_application(id, &update).await?)
            }
            Self::Delete { id } => print_json(&client.delete_application(id).await?),
        }
    }
}

impl StatsCommands {
    pub async fn execute(self, client: &AdminClient) -> Result<()> {
        match self {
            Self::Dashboard => print_json(&client.dashboard().await?),
            Self::Campaign { id } => print_json(&client.campaign_stats(id).await?),
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
