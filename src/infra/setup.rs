use crate::{
    adapters::{contacts::brevo::BrevoContactSync, http::app_state::AppState},
    application::{
        ports::contact_sync::{ContactSync, DisabledContactSync},
        use_cases::waitlist::{WaitlistRepo, WaitlistUseCases},
    },
    infra::{InfraError, config::AppConfig, http_client, postgres_persistence},
};
use secrecy::{ExposeSecret, SecretString};
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

pub async fn init_app_state(config: AppConfig) -> Result<AppState, InfraError> {
    if config.cors_origins.is_empty() {
        tracing::warn!("No CORS origins configured; browsers on other origins cannot call the API");
    }

    let postgres_arc = Arc::new(postgres_persistence(&config).await?);
    let contacts = init_contact_sync(&config)?;

    let connection = contacts.check_connection().await;
    match (connection.enabled, connection.connected) {
        (false, _) => tracing::info!("Contact sync disabled (BREVO_API_KEY not set)"),
        (true, true) => tracing::info!(
            account = ?connection.account_email,
            "Brevo connected"
        ),
        (true, false) => tracing::error!(
            error = ?connection.error,
            "Brevo connection failed; signups will be stored without contact sync"
        ),
    }

    let waitlist_use_cases =
        WaitlistUseCases::new(postgres_arc.clone() as Arc<dyn WaitlistRepo>, contacts);

    Ok(AppState {
        config: Arc::new(config),
        waitlist_use_cases: Arc::new(waitlist_use_cases),
    })
}

fn init_contact_sync(config: &AppConfig) -> Result<Arc<dyn ContactSync>, InfraError> {
    let Some(brevo) = &config.brevo else {
        return Ok(Arc::new(DisabledContactSync));
    };

    let api_key = brevo.api_key.expose_secret();
    tracing::info!(
        key = %mask_secret(api_key),
        len = api_key.len(),
        list_id = brevo.list_id,
        "Loaded Brevo key"
    );

    let client = http_client::try_build_client().map_err(InfraError::HttpClient)?;
    let sync = BrevoContactSync::new(
        client,
        SecretString::new(api_key.into()),
        brevo.list_id,
        &brevo.base_url,
    )?;
    Ok(Arc::new(sync))
}

/// Shows only the edges of a secret, enough to tell two keys apart in logs.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 10 {
        return "***".to_string();
    }
    let head: String = chars[..5].iter().collect();
    let tail: String = chars[chars.len() - 5..].iter().collect();
    format!("{head}...{tail}")
}

/// Console logs plus JSON files under `log_dir`: `app.log` gets everything the
/// filter lets through, `error.log` only errors.
pub fn init_tracing(log_dir: &Path) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "waitlist_api=info,tower_http=info".into());

    // Console (human-readable logs)
    let console_layer = fmt::layer()
        .with_target(false) // don’t show target (module path)
        .with_level(true);

    let (app_file, error_file, file_error) = match open_log_files(log_dir) {
        Ok((app, error)) => (Some(app), Some(error), None),
        Err(err) => (None, None, Some(err)),
    };

    // File (structured JSON logs)
    let json_layer = app_file.map(|file| {
        fmt::layer()
            .json()
            .with_writer(Arc::new(file))
            .with_current_span(true)
            .with_span_list(true)
    });
    let error_layer = error_file.map(|file| {
        fmt::layer()
            .json()
            .with_writer(Arc::new(file))
            .with_current_span(true)
            .with_filter(LevelFilter::ERROR)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .with(error_layer)
        .try_init()
        .ok();

    if let Some(err) = file_error {
        tracing::warn!(
            log_dir = %log_dir.display(),
            error = %err,
            "Cannot open log files, logging to console only"
        );
    }
}

fn open_log_files(log_dir: &Path) -> std::io::Result<(File, File)> {
    std::fs::create_dir_all(log_dir)?;
    let open = |name: &str| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_dir.join(name))
    };
    Ok((open("app.log")?, open("error.log")?))
}
