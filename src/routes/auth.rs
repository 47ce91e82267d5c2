use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use tracing::info;

use crate::errors::AppError;
use crate::models::{LoginForm, RegisterForm};
use crate::services::auth_service;
use crate::session::{cleared_cookie, session_cookie};
use crate::state::AppState;
use crate::views;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
        .route("/register", get(register_form).post(register))
}

// Visiting the login page forgets any current session.
pub async fn login_form() -> Response {
    info!("GET /login");
    ([(SET_COOKIE, cleared_cookie())], Html(views::login_page())).into_response()
}

pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    info!("POST /login");
    let user = auth_service::login(&state.pool, form).await?;
    let token = state.sessions.issue(user.id, &user.username)?;
    Ok(([(SET_COOKIE, session_cookie(&token)?)], Redirect::to("/")).into_response())
}

pub async fn logout() -> Response {
    info!("GET /logout");
    ([(SET_COOKIE, cleared_cookie())], Redirect::to("/")).into_response()
}

pub async fn register_form() -> Html<String> {
    info!("GET /register");
    Html(views::register_page())
}

/// Creates the account and logs the new user straight in.
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    info!("POST /register");
    let user = auth_service::register(&state.pool, form).await?;
    let token = state.sessions.issue(user.id, &user.username)?;
    Ok(([(SET_COOKIE, session_cookie(&token)?)], Redirect::to("/")).into_response())
}
