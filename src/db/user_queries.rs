use bigdecimal::BigDecimal;
use sqlx::{PgConnection, PgPool};
use crate::models::User;

pub async fn fetch_one(pool: &PgPool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, username, hash, cash
         FROM users
         WHERE id = $1"
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, username, hash, cash
         FROM users
         WHERE username = $1"
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

/// Inserts a user with the schema's starting cash. A taken username
/// surfaces as a unique-violation database error.
pub async fn create(pool: &PgPool, username: &str, hash: &str) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (username, hash)
         VALUES ($1, $2)
         RETURNING id, username, hash, cash"
    )
    .bind(username)
    .bind(hash)
    .fetch_one(pool)
    .await
}

/// Reads cash and row-locks the user until the surrounding transaction ends.
pub async fn lock_cash(conn: &mut PgConnection, id: i64) -> Result<Option<BigDecimal>, sqlx::Error> {
    sqlx::query_scalar::<_, BigDecimal>("SELECT cash FROM users WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
}

pub async fn update_cash(conn: &mut PgConnection, id: i64, cash: &BigDecimal) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE users SET cash = $1 WHERE id = $2")
        .bind(cash)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}
