use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use thiserror::Error;
use tracing::error;

use crate::session::SessionError;
use crate::views;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("invalid username and/or password")]
    InvalidCredentials,
    #[error("username already exists")]
    UsernameTaken,
    #[error("invalid symbol")]
    InvalidSymbol,
    #[error("can't afford")]
    InsufficientFunds,
    #[error("too many shares")]
    InsufficientShares,
    #[error("not found")]
    NotFound,
    #[error("login required")]
    Unauthorized,
    #[error("Database error: {0}")]
    Db(sqlx::Error),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::UsernameTaken
            | AppError::InvalidSymbol
            | AppError::InsufficientFunds
            | AppError::InsufficientShares => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) | AppError::InvalidCredentials => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::SEE_OTHER,
            AppError::Db(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::Unauthorized => Redirect::to("/login").into_response(),
            AppError::Db(e) => {
                error!("Database error: {}", e);
                (status, Html(views::apology_page(status, "internal server error"))).into_response()
            }
            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (status, Html(views::apology_page(status, "internal server error"))).into_response()
            }
            other => (status, Html(views::apology_page(status, &other.to_string()))).into_response(),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(value: sqlx::Error) -> Self {
        AppError::Db(value)
    }
}

impl From<SessionError> for AppError {
    fn from(value: SessionError) -> Self {
        AppError::Internal(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::LOCATION;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::Validation("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::UsernameTaken.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InsufficientFunds.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InsufficientShares.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidCredentials.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::Forbidden("must provide username".into()).status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Internal("boom".into()).status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(AppError::Db(sqlx::Error::RowNotFound).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_unauthorized_redirects_to_login() {
        let resp = AppError::Unauthorized.into_response();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(LOCATION).unwrap(), "/login");
    }

    #[test]
    fn test_internal_errors_render_generic_page() {
        let resp = AppError::Internal("secret detail".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
