use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Purchase,
    Sale,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Purchase => "purchase",
            TransactionType::Sale => "sale",
        }
    }
}

// One executed buy or sell. `shares` is negative for sales; holdings are
// the per-symbol sum of this column.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub symbol: String,
    pub name: String,
    pub shares: i64,
    pub price: BigDecimal,
    pub total_cost: BigDecimal,
    pub transaction_type: String,
    pub lastmodified: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateTransaction {
    pub symbol: String,
    pub name: String,
    pub shares: i64,
    pub price: BigDecimal,
    pub total_cost: BigDecimal,
    pub transaction_type: TransactionType,
}

impl CreateTransaction {
    pub fn purchase(symbol: String, name: String, shares: i64, price: BigDecimal, total_cost: BigDecimal) -> Self {
        Self {
            symbol,
            name,
            shares,
            price,
            total_cost,
            transaction_type: TransactionType::Purchase,
        }
    }

    pub fn sale(symbol: String, name: String, shares: i64, price: BigDecimal, total_cost: BigDecimal) -> Self {
        Self {
            symbol,
            name,
            shares: -shares,
            price,
            total_cost,
            transaction_type: TransactionType::Sale,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TradeForm {
    pub symbol: Option<String>,
    pub shares: Option<String>,
}
