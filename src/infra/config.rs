use std::{net::SocketAddr, path::PathBuf};

use axum::http::HeaderValue;
use env_helpers::get_env_default;
use secrecy::SecretString;
use url::Url;

use super::InfraError;

const DEFAULT_CORS_ORIGINS: &str =
    "http://localhost:5173,http://localhost:3000,http://127.0.0.1:5173";
const DEFAULT_BREVO_BASE_URL: &str = "https://api.brevo.com";

/// Credentials for the Brevo mailing list that new signups are pushed to.
#[derive(Debug)]
pub struct BrevoConfig {
    pub api_key: SecretString,
    pub list_id: i64,
    pub base_url: Url,
}

pub struct AppConfig {
    pub database_url: SecretString,
    pub db_max_connections: u32,
    pub bind_addr: SocketAddr,
    /// Browser origins allowed to call the API. Empty means no CORS headers at all.
    pub cors_origins: Vec<HeaderValue>,
    /// `None` disables contact sync.
    pub brevo: Option<BrevoConfig>,
    /// Directory holding a built frontend (`index.html` + assets), served for non-API paths.
    pub static_dir: Option<PathBuf>,
    pub log_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, InfraError> {
        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or(InfraError::ConfigMissing {
                var: "DATABASE_URL",
            })?;

        let db_max_connections: u32 = get_env_default("DB_MAX_CONNECTIONS", 5);
        let bind_addr: SocketAddr =
            get_env_default("BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 8000)));

        let cors_raw: String = get_env_default("CORS_ORIGINS", DEFAULT_CORS_ORIGINS.to_string());
        let frontend_url = std::env::var("FRONTEND_URL").ok();
        let cors_origins = parse_cors_origins(&cors_raw, frontend_url.as_deref())?;

        let brevo_list_id: i64 = get_env_default("BREVO_WAITLIST_ID", 0);
        let brevo_base_url: String =
            get_env_default("BREVO_BASE_URL", DEFAULT_BREVO_BASE_URL.to_string());
        let brevo = brevo_config(
            std::env::var("BREVO_API_KEY").ok().as_deref(),
            brevo_list_id,
            &brevo_base_url,
        )?;

        let static_dir = std::env::var("STATIC_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        let log_dir: String = get_env_default("LOG_DIR", "logs".to_string());

        Ok(Self {
            database_url: SecretString::new(database_url.into()),
            db_max_connections,
            bind_addr,
            cors_origins,
            brevo,
            static_dir,
            log_dir: PathBuf::from(log_dir),
        })
    }
}

/// Comma-separated origins plus an optional frontend URL. Blank items are dropped,
/// duplicates keep their first occurrence.
pub fn parse_cors_origins(
    raw: &str,
    frontend_url: Option<&str>,
) -> Result<Vec<HeaderValue>, InfraError> {
    let mut origins: Vec<HeaderValue> = Vec::new();
    let candidates = raw.split(',').chain(frontend_url);

    for origin in candidates.map(|o| o.trim().trim_end_matches('/')) {
        if origin.is_empty() {
            continue;
        }
        let value = HeaderValue::from_str(origin).map_err(|e| InfraError::ConfigInvalid {
            var: "CORS_ORIGINS",
            reason: format!("contains an invalid origin {origin:?}: {e}"),
        })?;
        if !origins.contains(&value) {
            origins.push(value);
        }
    }

    Ok(origins)
}

/// API keys pasted into `.env` files often carry quotes or trailing whitespace.
pub fn clean_api_key(raw: &str) -> Option<String> {
    let key = raw.trim().trim_matches(|c| c == '"' || c == '\'').trim();
    (!key.is_empty()).then(|| key.to_string())
}

pub fn brevo_config(
    api_key: Option<&str>,
    list_id: i64,
    base_url: &str,
) -> Result<Option<BrevoConfig>, InfraError> {
    let Some(api_key) = api_key.and_then(clean_api_key) else {
        return Ok(None);
    };

    if list_id <= 0 {
        return Err(InfraError::ConfigInvalid {
            var: "BREVO_WAITLIST_ID",
            reason: "must be a positive list id when BREVO_API_KEY is set".to_string(),
        });
    }

    let base_url = Url::parse(base_url).map_err(|e| InfraError::ConfigInvalid {
        var: "BREVO_BASE_URL",
        reason: e.to_string(),
    })?;

    Ok(Some(BrevoConfig {
        api_key: SecretString::new(api_key.into()),
        list_id,
        base_url,
    }))
}
