use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
    domain::entities::contact_sync_status::ContactSyncStatus,
    use_cases::waitlist::{AddOutcome, WaitlistSubmission},
};

const JOINED_MESSAGE: &str = "You've been added to the waitlist!";
const ALREADY_JOINED_MESSAGE: &str = "You're already on the waitlist!";
const SYNC_DELAYED_NOTE: &str = " (Note: email confirmation may be delayed)";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/waitlist", post(join_waitlist))
        .route("/waitlist/count", get(waitlist_count))
}

#[derive(Deserialize)]
struct JoinWaitlistPayload {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    referral_source: Option<String>,
}

#[derive(Serialize)]
struct JoinWaitlistResponse {
    success: bool,
    message: String,
    data: JoinWaitlistData,
}

#[derive(Serialize)]
struct JoinWaitlistData {
    email: String,
    position: i64,
    registered_at: DateTime<Utc>,
    already_existed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    contact_sync_status: Option<ContactSyncStatus>,
}

impl From<AddOutcome> for JoinWaitlistResponse {
    fn from(outcome: AddOutcome) -> Self {
        let message = if outcome.already_existed {
            ALREADY_JOINED_MESSAGE.to_string()
        } else if outcome.contact_sync.is_some_and(|s| s.is_failed()) {
            format!("{JOINED_MESSAGE}{SYNC_DELAYED_NOTE}")
        } else {
            JOINED_MESSAGE.to_string()
        };

        Self {
            success: true,
            message,
            data: JoinWaitlistData {
                email: outcome.entry.email,
                position: outcome.position,
                registered_at: outcome.entry.created_at,
                already_existed: outcome.already_existed,
                contact_sync_status: outcome.contact_sync,
            },
        }
    }
}

/// POST /api/waitlist
/// Adds an email to the waitlist; resubmitting a known email is a success.
async fn join_waitlist(
    State(app_state): State<AppState>,
    payload: Result<Json<JoinWaitlistPayload>, JsonRejection>,
) -> AppResult<Json<JoinWaitlistResponse>> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::InvalidInput(format!("invalid request body: {}", rejection.body_text()))
    })?;

    let outcome = app_state
        .waitlist_use_cases
        .add(WaitlistSubmission {
            email: payload.email.unwrap_or_default(),
            name: payload.name,
            referral_source: payload.referral_source,
        })
        .await?;

    Ok(Json(outcome.into()))
}

#[derive(Serialize)]
struct WaitlistCountResponse {
    success: bool,
    count: i64,
}

/// GET /api/waitlist/count
/// Feeds a display counter, so storage failures degrade to `count: 0` instead of erroring.
async fn waitlist_count(State(app_state): State<AppState>) -> Json<WaitlistCountResponse> {
    match app_state.waitlist_use_cases.count().await {
        Ok(count) => Json(WaitlistCountResponse {
            success: true,
            count,
        }),
        Err(err) => {
            tracing::warn!(error = %err, "Waitlist count unavailable, reporting zero");
            Json(WaitlistCountResponse {
                success: false,
                count: 0,
            })
        }
    }
}
