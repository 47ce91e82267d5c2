use sqlx::{PgConnection, PgPool, Postgres};
use crate::models::{CreateTransaction, Holding, Transaction};

pub async fn insert(
    conn: &mut PgConnection,
    user_id: i64,
    data: &CreateTransaction,
) -> Result<Transaction, sqlx::Error> {
    sqlx::query_as::<_, Transaction>(
        "INSERT INTO stocks (user_id, symbol, name, shares, price, total_cost, transaction_type)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING id, user_id, symbol, name, shares, price, total_cost, transaction_type, lastmodified"
    )
    .bind(user_id)
    .bind(&data.symbol)
    .bind(&data.name)
    .bind(data.shares)
    .bind(&data.price)
    .bind(&data.total_cost)
    .bind(data.transaction_type.as_str())
    .fetch_one(&mut *conn)
    .await
}

pub async fn fetch_history(pool: &PgPool, user_id: i64) -> Result<Vec<Transaction>, sqlx::Error> {
    sqlx::query_as::<_, Transaction>(
        "SELECT id, user_id, symbol, name, shares, price, total_cost, transaction_type, lastmodified
         FROM stocks
         WHERE user_id = $1
         ORDER BY lastmodified ASC, id ASC"
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Current positions: signed share counts summed per symbol, positive totals only.
pub async fn fetch_holdings<'e, E>(executor: E, user_id: i64) -> Result<Vec<Holding>, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    sqlx::query_as::<_, Holding>(
        "SELECT symbol, MAX(name) AS name, SUM(shares)::BIGINT AS shares
         FROM stocks
         WHERE user_id = $1
         GROUP BY symbol
         HAVING SUM(shares) > 0
         ORDER BY symbol"
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
}

pub async fn fetch_held_shares(
    conn: &mut PgConnection,
    user_id: i64,
    symbol: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COALESCE(SUM(shares), 0)::BIGINT
         FROM stocks
         WHERE user_id = $1 AND symbol = $2"
    )
    .bind(user_id)
    .bind(symbol)
    .fetch_one(&mut *conn)
    .await
}
