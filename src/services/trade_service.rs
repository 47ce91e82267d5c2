use bigdecimal::BigDecimal;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::db;
use crate::errors::AppError;
use crate::external::quote_provider::QuoteProvider;
use crate::models::{CreateTransaction, TradeForm, Transaction};
use crate::services::quote_service;

/// Parses the `shares` field: a whole number of at least one.
pub fn parse_shares(raw: Option<&str>) -> Result<i64, AppError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(AppError::Validation("must provide shares".into()));
    }
    match raw.parse::<i64>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(AppError::Validation("shares must be a positive integer".into())),
    }
}

/// `shares` x `price`, rounded to cents once on the total.
pub fn trade_value(price: &BigDecimal, shares: i64) -> BigDecimal {
    (price * &BigDecimal::from(shares)).round(2)
}

/// Money changing hands for a trade. A total that rounds to nothing is refused.
pub fn trade_cost(price: &BigDecimal, shares: i64) -> Result<BigDecimal, AppError> {
    let cost = trade_value(price, shares);
    if cost <= BigDecimal::from(0) {
        return Err(AppError::Validation("trade value rounds to $0.00".into()));
    }
    Ok(cost)
}

/// Returns the cash left after paying `cost`.
pub fn check_purchase(cash: &BigDecimal, cost: &BigDecimal) -> Result<BigDecimal, AppError> {
    if cost > cash {
        return Err(AppError::InsufficientFunds);
    }
    Ok(cash - cost)
}

pub fn check_sale(held: i64, shares: i64) -> Result<(), AppError> {
    if shares > held {
        return Err(AppError::InsufficientShares);
    }
    Ok(())
}

pub async fn buy(
    pool: &PgPool,
    provider: &dyn QuoteProvider,
    user_id: i64,
    form: TradeForm,
) -> Result<Transaction, AppError> {
    let symbol = quote_service::normalize_symbol(form.symbol.as_deref())?;
    let shares = parse_shares(form.shares.as_deref())?;
    let quote = quote_service::lookup(provider, &symbol).await?;
    let cost = trade_cost(&quote.price, shares)?;

    let mut tx = pool.begin().await?;

    let cash = db::user_queries::lock_cash(&mut *tx, user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let remaining = check_purchase(&cash, &cost).map_err(|e| {
        warn!("User {} cannot afford {} x {} ({} > {})", user_id, shares, symbol, cost, cash);
        e
    })?;

    db::user_queries::update_cash(&mut *tx, user_id, &remaining).await?;
    let record = db::transaction_queries::insert(
        &mut *tx,
        user_id,
        &CreateTransaction::purchase(quote.symbol, quote.name, shares, quote.price, cost),
    )
    .await?;

    tx.commit().await?;

    info!("User {} bought {} x {} for {}", user_id, shares, record.symbol, record.total_cost);
    Ok(record)
}

pub async fn sell(
    pool: &PgPool,
    provider: &dyn QuoteProvider,
    user_id: i64,
    form: TradeForm,
) -> Result<Transaction, AppError> {
    let symbol = quote_service::normalize_symbol(form.symbol.as_deref())?;
    let shares = parse_shares(form.shares.as_deref())?;
    let quote = quote_service::lookup(provider, &symbol).await?;
    let proceeds = trade_cost(&quote.price, shares)?;

    let mut tx = pool.begin().await?;

    // Locking the user row first serializes concurrent sells of the same holding.
    let cash = db::user_queries::lock_cash(&mut *tx, user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;
    let held = db::transaction_queries::fetch_held_shares(&mut *tx, user_id, &quote.symbol).await?;

    check_sale(held, shares).map_err(|e| {
        warn!("User {} tried to sell {} x {} holding {}", user_id, shares, quote.symbol, held);
        e
    })?;

    let remaining = &cash + &proceeds;
    db::user_queries::update_cash(&mut *tx, user_id, &remaining).await?;
    let record = db::transaction_queries::insert(
        &mut *tx,
        user_id,
        &CreateTransaction::sale(quote.symbol, quote.name, shares, quote.price, proceeds),
    )
    .await?;

    tx.commit().await?;

    info!("User {} sold {} x {} for {}", user_id, shares, record.symbol, record.total_cost);
    Ok(record)
}
