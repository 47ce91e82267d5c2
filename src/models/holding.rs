use bigdecimal::BigDecimal;
use serde::Serialize;
use sqlx::FromRow;

// Net position in one symbol, aggregated from the transaction log.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Holding {
    pub symbol: String,
    pub name: String,
    pub shares: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValuedHolding {
    pub symbol: String,
    pub name: String,
    pub shares: i64,
    pub price: BigDecimal,
    pub total: BigDecimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioSummary {
    pub holdings: Vec<ValuedHolding>,
    pub cash: BigDecimal,
    pub grand_total: BigDecimal,
}
