use axum::extract::State;
use axum::response::{Html, Redirect};
use axum::routing::get;
use axum::{Form, Router};
use tracing::info;

use crate::errors::AppError;
use crate::models::TradeForm;
use crate::services::{portfolio_service, trade_service};
use crate::session::CurrentUser;
use crate::state::AppState;
use crate::views;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/buy", get(buy_form).post(buy))
        .route("/sell", get(sell_form).post(sell))
}

pub async fn buy_form(_user: CurrentUser) -> Html<String> {
    info!("GET /buy");
    Html(views::buy_page())
}

pub async fn buy(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<TradeForm>,
) -> Result<Redirect, AppError> {
    info!("POST /buy - {} {:?} x {:?}", user.username, form.shares, form.symbol);
    trade_service::buy(&state.pool, state.quote_provider.as_ref(), user.id, form).await?;
    Ok(Redirect::to("/"))
}

pub async fn sell_form(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Html<String>, AppError> {
    info!("GET /sell");
    let symbols = portfolio_service::held_symbols(&state.pool, user.id).await?;
    Ok(Html(views::sell_page(&symbols)))
}

pub async fn sell(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<TradeForm>,
) -> Result<Redirect, AppError> {
    info!("POST /sell - {} {:?} x {:?}", user.username, form.shares, form.symbol);
    trade_service::sell(&state.pool, state.quote_provider.as_ref(), user.id, form).await?;
    Ok(Redirect::to("/"))
}
