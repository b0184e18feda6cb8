use axum::{Json, Router, extract::State, routing::get};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    adapters::http::app_state::AppState, application::ports::contact_sync::ContactConnection,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/brevo/status", get(brevo_status))
}

#[derive(Serialize)]
struct BrevoStatusResponse {
    timestamp: DateTime<Utc>,
    brevo: ContactConnection,
    /// `null` when contact sync is disabled.
    list_id: Option<i64>,
}

/// GET /api/brevo/status
/// Account details of the configured mailing list, for monitoring.
async fn brevo_status(State(app_state): State<AppState>) -> Json<BrevoStatusResponse> {
    tracing::info!("Brevo status check requested");

    let brevo = app_state.waitlist_use_cases.contacts_status().await;
    let list_id = app_state.config.brevo.as_ref().map(|b| b.list_id);

    Json(BrevoStatusResponse {
        timestamp: Utc::now(),
        brevo,
        list_id,
    })
}
