#![allow(dead_code)]

use adpanel_client::AdminClient;
use adpanel_client::types::{Role, User};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;
use wiremock::MockServer;

/// Route client logs to the test output; set `RUST_LOG` to see them
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn admin_user() -> User {
    User {
        id: 1,
        login: "admin".into(),
        name: "Main Admin".into(),
        role: Role::Admin,
        percent: None,
        is_active: true,
        created_at: "2026-01-10 09:00:00".into(),
    }
}

pub fn user_json() -> Value {
    serde_json::to_value(admin_user()).unwrap()
}

pub fn auth_body(access_token: &str, refresh_token: &str) -> Value {
    json!({
        "access_token": access_token,
        "refresh_token": refresh_token,
        "token_type": "bearer",
        "expires_in": 900,
        "user": user_json(),
    })
}

pub fn campaign_json(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "investor_id": 2,
        "investor_login": "investor1",
        "investor_name": "Ivan",
        "name": format!("Campaign {id}"),
        "budget": 15000.0,
        "status": status,
        "created_at": "2026-02-01 12:00:00",
    })
}

/// Client against `server` with an already established session
pub fn logged_in_client(server: &MockServer, access_token: &str, refresh_token: &str) -> AdminClient {
    let client = AdminClient::new(server.uri()).unwrap();
    client
        .session()
        .set_session(access_token, refresh_token, admin_user());
    client
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
