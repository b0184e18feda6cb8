use axum::{Json, Router, extract::State, routing::get};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    adapters::http::app_state::AppState, application::ports::contact_sync::ContactConnection,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: DateTime<Utc>,
    version: &'static str,
    services: HealthServices,
}

#[derive(Serialize)]
struct HealthServices {
    database: DatabaseHealth,
    contacts: ContactConnection,
}

#[derive(Serialize)]
struct DatabaseHealth {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    waitlist_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// GET /api/health
/// Always 200; `status` is "degraded" when a dependency is unreachable.
async fn health_check(State(app_state): State<AppState>) -> Json<HealthResponse> {
    let use_cases = &app_state.waitlist_use_cases;

    let database = match use_cases.count().await {
        Ok(count) => DatabaseHealth {
            status: "healthy",
            waitlist_count: Some(count),
            error: None,
        },
        Err(err) => {
            tracing::error!(error = %err, "Database health check failed");
            DatabaseHealth {
                status: "unhealthy",
                waitlist_count: None,
                error: Some(err.to_string()),
            }
        }
    };

    let contacts = use_cases.contacts_status().await;

    let degraded = database.error.is_some() || !contacts.is_healthy();

    Json(HealthResponse {
        status: if degraded { "degraded" } else { "healthy" },
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION"),
        services: HealthServices { database, contacts },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum_test::TestServer;
    use serde_json::Value;

    use crate::test_utils::{RecordingContactSync, TestAppStateBuilder, create_test_entry};

    async fn health(app_state: AppState) -> Value {
        let server = TestServer::new(router().with_state(app_state)).unwrap();
        let response = server.get("/health").await;
        response.assert_status_ok();
        response.json()
    }

    #[tokio::test]
    async fn healthy_with_sync_disabled() {
        let body = health(
            TestAppStateBuilder::new()
                .with_entry(create_test_entry(|_| {}))
                .build(),
        )
        .await;

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["services"]["database"]["status"], "healthy");
        assert_eq!(body["services"]["database"]["waitlist_count"], 1);
        assert_eq!(body["services"]["contacts"]["enabled"], false);
    }

    #[tokio::test]
    async fn degraded_when_storage_is_down() {
        let body = health(TestAppStateBuilder::new().with_unavailable_storage().build()).await;

        assert_eq!(body["status"], "degraded");
        assert_eq!(body["services"]["database"]["status"], "unhealthy");
        assert!(body["services"]["database"]["error"].is_string());
    }

    #[tokio::test]
    async fn degraded_when_contact_sync_unreachable() {
        let app_state = TestAppStateBuilder::new()
            .with_contact_sync(Arc::new(RecordingContactSync::failing()))
            .build();

        let body = health(app_state).await;

        assert_eq!(body["status"], "degraded");
        assert_eq!(body["services"]["contacts"]["connected"], false);
    }

    #[tokio::test]
    async fn healthy_when_contact_sync_connected() {
        let app_state = TestAppStateBuilder::new()
            .with_contact_sync(Arc::new(RecordingContactSync::succeeding()))
            .build();

        let body = health(app_state).await;

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["services"]["contacts"]["account_email"], "owner@example.com");
    }
}
