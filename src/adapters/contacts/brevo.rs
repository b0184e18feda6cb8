use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    application::ports::contact_sync::{
        ContactConnection, ContactRequest, ContactSync, ContactSyncReport,
    },
    infra::InfraError,
};

/// Pushes new signups into a Brevo contact list. Adding a contact to the list
/// triggers the welcome automation configured in Brevo.
#[derive(Clone)]
pub struct BrevoContactSync {
    client: Client,
    api_key: SecretString,
    list_id: i64,
    contacts_url: Url,
    account_url: Url,
}

impl BrevoContactSync {
    pub fn new(
        client: Client,
        api_key: SecretString,
        list_id: i64,
        base_url: &Url,
    ) -> Result<Self, InfraError> {
        let endpoint = |path: &str| {
            base_url.join(path).map_err(|e| InfraError::ConfigInvalid {
                var: "BREVO_BASE_URL",
                reason: e.to_string(),
            })
        };

        Ok(Self {
            client,
            api_key,
            list_id,
            contacts_url: endpoint("v3/contacts")?,
            account_url: endpoint("v3/account")?,
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateContactReq<'a> {
    email: &'a str,
    attributes: ContactAttributes<'a>,
    list_ids: [i64; 1],
    update_enabled: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct ContactAttributes<'a> {
    signup_date: String,
    waitlist_position: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    firstname: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lastname: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    referral_source: Option<&'a str>,
}

#[derive(Deserialize)]
struct CreateContactResp {
    id: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResp {
    email: Option<String>,
    company_name: Option<String>,
    #[serde(default)]
    plan: Vec<AccountPlan>,
}

#[derive(Deserialize)]
struct AccountPlan {
    #[serde(rename = "type")]
    plan_type: Option<String>,
}

impl From<AccountResp> for ContactConnection {
    fn from(account: AccountResp) -> Self {
        ContactConnection {
            enabled: true,
            connected: true,
            account_email: account.email,
            company_name: account.company_name,
            plan_type: account.plan.into_iter().next().and_then(|p| p.plan_type),
            error: None,
        }
    }
}

fn create_contact_body(contact: &ContactRequest, list_id: i64) -> CreateContactReq<'_> {
    let (firstname, lastname) = contact.name_parts();
    CreateContactReq {
        email: &contact.email,
        attributes: ContactAttributes {
            signup_date: contact.signup_date.format("%Y-%m-%d").to_string(),
            waitlist_position: contact.position,
            firstname,
            lastname,
            referral_source: contact.referral_source.as_deref(),
        },
        list_ids: [list_id],
        update_enabled: true,
    }
}

/// Maps a non-2xx answer from the contacts endpoint to a sync report.
fn classify_failure(status: StatusCode, body: &str) -> ContactSyncReport {
    match status {
        StatusCode::BAD_REQUEST if body.contains("Contact already exist") => {
            ContactSyncReport::success(None, "Contact already exists in Brevo")
        }
        StatusCode::UNAUTHORIZED => {
            ContactSyncReport::failed("BREVO_AUTH_FAILED", "Authentication failed")
        }
        StatusCode::NOT_FOUND => ContactSyncReport::failed("BREVO_LIST_NOT_FOUND", "List not found"),
        other => ContactSyncReport::failed(
            "BREVO_API_ERROR",
            format!(
                "API error: {}",
                other.canonical_reason().unwrap_or(other.as_str())
            ),
        ),
    }
}

#[async_trait]
impl ContactSync for BrevoContactSync {
    async fn add_contact(&self, contact: &ContactRequest) -> ContactSyncReport {
        let body = create_contact_body(contact, self.list_id);

        let response = match self
            .client
            .post(self.contacts_url.clone())
            .header("api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                return ContactSyncReport::failed(
                    "BREVO_UNEXPECTED_ERROR",
                    format!("Request failed: {e}"),
                );
            }
        };

        let status = response.status();
        if status.is_success() {
            // 201 carries the new id, 204 means an existing contact was updated.
            let contact_id = response
                .json::<CreateContactResp>()
                .await
                .ok()
                .and_then(|r| r.id)
                .map(|id| id.to_string());
            return ContactSyncReport::success(contact_id, "Contact added and automation triggered");
        }

        let body = response.text().await.unwrap_or_default();
        classify_failure(status, &body)
    }

    async fn check_connection(&self) -> ContactConnection {
        let result = self
            .client
            .get(self.account_url.clone())
            .header("api-key", self.api_key.expose_secret())
            .send()
            .await
            .and_then(|r| r.error_for_status());

        match result {
            Ok(response) => match response.json::<AccountResp>().await {
                Ok(account) => account.into(),
                // Reachable and authorized, the account details just did not parse.
                Err(e) => {
                    tracing::warn!(error = %e, "Unexpected Brevo account payload");
                    ContactConnection {
                        enabled: true,
                        connected: true,
                        ..Default::default()
                    }
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "Brevo connection check failed");
                ContactConnection {
                    enabled: true,
                    connected: false,
                    error: Some(e.to_string()),
                    ..Default::default()
                }
            }
        }
    }
}
