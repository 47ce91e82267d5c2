use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::db;
use crate::errors::AppError;
use crate::models::{LoginForm, RegisterForm, User};

#[derive(Debug, PartialEq)]
pub struct Registration {
    pub username: String,
    pub password: String,
}

pub fn validate_registration(form: &RegisterForm) -> Result<Registration, AppError> {
    let username = form.username.as_deref().map(str::trim).unwrap_or_default();
    if username.is_empty() {
        return Err(AppError::Validation("must provide username".into()));
    }
    let password = form.password.as_deref().unwrap_or_default();
    if password.is_empty() {
        return Err(AppError::Validation("must provide password".into()));
    }
    let confirmation = form.confirmation.as_deref().unwrap_or_default();
    if confirmation.is_empty() {
        return Err(AppError::Validation("must confirm password".into()));
    }
    if password != confirmation {
        return Err(AppError::Validation("passwords do not match".into()));
    }
    Ok(Registration {
        username: username.to_string(),
        password: password.to_string(),
    })
}

fn validate_login(form: &LoginForm) -> Result<(&str, &str), AppError> {
    let username = form.username.as_deref().map(str::trim).unwrap_or_default();
    if username.is_empty() {
        return Err(AppError::Forbidden("must provide username".into()));
    }
    let password = form.password.as_deref().unwrap_or_default();
    if password.is_empty() {
        return Err(AppError::Forbidden("must provide password".into()));
    }
    Ok((username, password))
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("password hashing failed: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

pub async fn register(pool: &PgPool, form: RegisterForm) -> Result<User, AppError> {
    let registration = validate_registration(&form)?;

    if db::user_queries::find_by_username(pool, &registration.username).await?.is_some() {
        warn!("Registration rejected, username {} taken", registration.username);
        return Err(AppError::UsernameTaken);
    }

    let password = registration.password;
    let hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    // The unique index still decides if two registrations race.
    let user = db::user_queries::create(pool, &registration.username, &hash)
        .await
        .map_err(create_error)?;

    info!("Registered user {} ({})", user.username, user.id);
    Ok(user)
}

fn create_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::UsernameTaken;
        }
    }
    AppError::Db(e)
}

pub async fn login(pool: &PgPool, form: LoginForm) -> Result<User, AppError> {
    let (username, password) = validate_login(&form)?;

    let user = match db::user_queries::find_by_username(pool, username).await? {
        Some(user) => user,
        None => {
            warn!("Login failed, unknown user {}", username);
            return Err(AppError::InvalidCredentials);
        }
    };

    let password = password.to_string();
    let hash = user.hash.clone();
    let valid = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        warn!("Login failed, wrong password for {}", username);
        return Err(AppError::InvalidCredentials);
    }

    info!("User {} logged in", user.username);
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(username: &str, password: &str, confirmation: &str) -> RegisterForm {
        let opt = |s: &str| if s.is_empty() { None } else { Some(s.to_string()) };
        RegisterForm {
            username: opt(username),
            password: opt(password),
            confirmation: opt(confirmation),
        }
    }

    fn message(err: AppError) -> String {
        err.to_string()
    }

    #[test]
    fn test_registration_requires_every_field() {
        assert_eq!(message(validate_registration(&form("", "pw", "pw")).unwrap_err()), "must provide username");
        assert_eq!(message(validate_registration(&form("bob", "", "pw")).unwrap_err()), "must provide password");
        assert_eq!(message(validate_registration(&form("bob", "pw", "")).unwrap_err()), "must confirm password");
    }

    #[test]
    fn test_registration_rejects_mismatched_confirmation() {
        let err = validate_registration(&form("bob", "hunter2", "hunter3")).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "passwords do not match"));
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_registration_trims_username() {
        let reg = validate_registration(&form("  bob ", "pw", "pw")).unwrap();
        assert_eq!(
            reg,
            Registration {
                username: "bob".into(),
                password: "pw".into()
            }
        );
    }

    #[test]
    fn test_login_missing_fields_are_forbidden() {
        let err = validate_login(&LoginForm { username: None, password: Some("pw".into()) }).unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::FORBIDDEN);

        let err = validate_login(&LoginForm { username: Some("bob".into()), password: None }).unwrap_err();
        assert_eq!(err.to_string(), "must provide password");
    }

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
    }

    #[test]
    fn test_verify_against_garbage_hash() {
        assert!(!verify_password("pw", "not-a-phc-string"));
    }

    fn credentials(username: &str, password: &str) -> LoginForm {
        LoginForm {
            username: Some(username.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_register_then_login(pool: PgPool) {
        let user = register(&pool, form("  carol ", "s3cret", "s3cret")).await.unwrap();
        assert_eq!(user.username, "carol");
        assert_eq!(user.cash, "10000.00".parse::<bigdecimal::BigDecimal>().unwrap());
        assert!(user.hash.starts_with("$argon2"));

        let logged_in = login(&pool, credentials("carol", "s3cret")).await.unwrap();
        assert_eq!(logged_in.id, user.id);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_register_rejects_taken_username(pool: PgPool) {
        register(&pool, form("carol", "one", "one")).await.unwrap();

        let err = register(&pool, form("carol", "two", "two")).await.unwrap_err();
        assert!(matches!(err, AppError::UsernameTaken));
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_unique_violation_maps_to_username_taken(pool: PgPool) {
        db::user_queries::create(&pool, "dave", "hash").await.unwrap();

        let err = db::user_queries::create(&pool, "dave", "hash").await.unwrap_err();
        assert!(matches!(create_error(err), AppError::UsernameTaken));
        assert!(matches!(create_error(sqlx::Error::RowNotFound), AppError::Db(_)));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_login_rejects_bad_credentials(pool: PgPool) {
        register(&pool, form("erin", "right", "right")).await.unwrap();

        let err = login(&pool, credentials("erin", "wrong")).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
        assert_eq!(err.status(), axum::http::StatusCode::FORBIDDEN);

        let err = login(&pool, credentials("nobody", "right")).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }
}
