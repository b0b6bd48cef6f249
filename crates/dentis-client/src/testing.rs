//! Shared helpers for wiremock-backed client tests.

use dentis_core::{Role, Session, SessionContext};
use jiff::{Timestamp, ToSpan};
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::transport::HttpTransport;

/// Builds a config with every service routed to the given mock server.
pub fn config(server_uri: &str) -> ClientConfig {
    ClientConfig::builder()
        .with_auth_base_url(format!("{server_uri}/api/auth/"))
        .with_patient_base_url(format!("{server_uri}/api/patients/"))
        .with_lab_base_url(format!("{server_uri}/api/lab/"))
        .with_inventory_base_url(format!("{server_uri}/api/inventory/"))
        .build()
        .expect("valid test config")
}

/// An unexpired admin session carrying the bearer token `test-token`.
pub fn session() -> Session {
    let now = Timestamp::now();
    Session {
        access_token: "test-token".into(),
        account_id: Uuid::new_v4(),
        role: Role::Admin {
            admin_id: Uuid::new_v4(),
        },
        issued_at: now,
        expires_at: now.checked_add(1.hour()).expect("in range"),
    }
}

/// A transport with an active session, routed to the given mock server.
pub fn transport(server_uri: &str) -> HttpTransport {
    let context = SessionContext::new();
    context.login(session());
    HttpTransport::new(config(server_uri), context).expect("transport")
}

/// A transport with no active session.
pub fn transport_without_session(server_uri: &str) -> HttpTransport {
    HttpTransport::new(config(server_uri), SessionContext::new()).expect("transport")
}
