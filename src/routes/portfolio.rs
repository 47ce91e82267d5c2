use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use tracing::{error, info};

use crate::errors::AppError;
use crate::services::portfolio_service;
use crate::session::CurrentUser;
use crate::state::AppState;
use crate::views;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(index))
        .route("/history", get(history))
}

pub async fn index(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Html<String>, AppError> {
    info!("GET / - Portfolio for {}", user.username);
    let summary = portfolio_service::summary(&state.pool, state.quote_provider.as_ref(), user.id)
        .await
        .map_err(|e| {
            error!("Failed to build portfolio for user {}: {}", user.id, e);
            e
        })?;
    Ok(Html(views::index_page(&summary)))
}

pub async fn history(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Html<String>, AppError> {
    info!("GET /history - Transactions for {}", user.username);
    let transactions = portfolio_service::history(&state.pool, user.id).await?;
    Ok(Html(views::history_page(&transactions)))
}
