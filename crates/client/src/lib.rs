//! Client for the adpanel admin API
//!
//! - [`SessionStore`] holds the token pair and identity, persisted through a
//!   [`SessionStorage`] backend
//! - [`Gateway`] attaches bearer credentials and recovers from expired access
//!   tokens with a single shared refresh
//! - [`AdminClient`] exposes the auth, campaign, user, application and
//!   statistics endpoints

pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod session;
pub mod state_dir;
pub mod storage;
pub mod types;

pub use client::{AdminClient, AdminClientBuilder};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use gateway::{ApiRequest, Gateway};
pub use session::{Session, SessionStore};
pub use state_dir::StateDir;
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
