use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Form, Router};
use tracing::info;

use crate::errors::AppError;
use crate::models::QuoteForm;
use crate::services::quote_service;
use crate::session::CurrentUser;
use crate::state::AppState;
use crate::views;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/quote", get(quote_form).post(quote))
}

pub async fn quote_form(_user: CurrentUser) -> Html<String> {
    info!("GET /quote");
    Html(views::quote_page())
}

pub async fn quote(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<QuoteForm>,
) -> Result<Html<String>, AppError> {
    info!("POST /quote - {} asked for {:?}", user.username, form.symbol);
    let symbol = quote_service::normalize_symbol(form.symbol.as_deref())?;
    let quote = quote_service::lookup(state.quote_provider.as_ref(), &symbol).await?;
    Ok(Html(views::quoted_page(&quote)))
}
