pub mod contacts;
pub mod health;
pub mod waitlist;

use axum::Router;

use crate::{adapters::http::app_state::AppState, app_error::AppError};

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(waitlist::router())
        .merge(health::router())
        .merge(contacts::router())
        .fallback(api_not_found)
}

async fn api_not_found() -> AppError {
    AppError::NotFound
}
