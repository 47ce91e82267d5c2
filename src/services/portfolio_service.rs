use bigdecimal::BigDecimal;
use futures::future::try_join_all;
use sqlx::PgPool;
use tracing::error;

use crate::db;
use crate::errors::AppError;
use crate::external::quote_provider::QuoteProvider;
use crate::models::{Holding, PortfolioSummary, Quote, Transaction, ValuedHolding};
use crate::services::{quote_service, trade_service};

/// Prices every holding; the grand total is cash plus the sum of
/// shares x current price.
pub fn value_holdings(cash: BigDecimal, priced: Vec<(Holding, Quote)>) -> PortfolioSummary {
    let holdings: Vec<ValuedHolding> = priced
        .into_iter()
        .map(|(holding, quote)| ValuedHolding {
            total: trade_service::trade_value(&quote.price, holding.shares),
            symbol: holding.symbol,
            name: holding.name,
            shares: holding.shares,
            price: quote.price,
        })
        .collect();

    let grand_total = holdings.iter().fold(cash.clone(), |acc, h| acc + &h.total);

    PortfolioSummary {
        holdings,
        cash,
        grand_total,
    }
}

pub async fn summary(
    pool: &PgPool,
    provider: &dyn QuoteProvider,
    user_id: i64,
) -> Result<PortfolioSummary, AppError> {
    let user = db::user_queries::fetch_one(pool, user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;
    let holdings = db::transaction_queries::fetch_holdings(pool, user_id).await?;

    let priced = try_join_all(holdings.into_iter().map(|holding| async move {
        match quote_service::lookup(provider, &holding.symbol).await {
            Ok(quote) => Ok((holding, quote)),
            Err(_) => {
                error!("No current price for held symbol {}", holding.symbol);
                Err(AppError::Internal(format!("quote unavailable for {}", holding.symbol)))
            }
        }
    }))
    .await?;

    Ok(value_holdings(user.cash, priced))
}

pub async fn held_symbols(pool: &PgPool, user_id: i64) -> Result<Vec<String>, AppError> {
    let holdings = db::transaction_queries::fetch_holdings(pool, user_id).await?;
    Ok(holdings.into_iter().map(|h| h.symbol).collect())
}

pub async fn history(pool: &PgPool, user_id: i64) -> Result<Vec<Transaction>, AppError> {
    let transactions = db::transaction_queries::fetch_history(pool, user_id).await?;
    Ok(transactions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> BigDecimal {
        s.parse().unwrap()
    }

    fn holding(symbol: &str, shares: i64) -> Holding {
        Holding {
            symbol: symbol.into(),
            name: format!("{} Corp", symbol),
            shares,
        }
    }

    fn quote(symbol: &str, price: &str) -> Quote {
        Quote {
            symbol: symbol.into(),
            name: format!("{} Corp", symbol),
            price: dec(price),
        }
    }

    #[test]
    fn test_grand_total_is_cash_plus_positions() {
        let summary = value_holdings(
            dec("9000.00"),
            vec![
                (holding("AAPL", 4), quote("AAPL", "150.00")),
                (holding("TSLA", 2), quote("TSLA", "250.75")),
            ],
        );

        assert_eq!(summary.holdings.len(), 2);
        assert_eq!(summary.holdings[0].total, dec("600.00"));
        assert_eq!(summary.holdings[1].total, dec("501.50"));
        assert_eq!(summary.cash, dec("9000.00"));
        assert_eq!(summary.grand_total, dec("10101.50"));
    }

    #[test]
    fn test_empty_portfolio_is_just_cash() {
        let summary = value_holdings(dec("10000.00"), Vec::new());
        assert!(summary.holdings.is_empty());
        assert_eq!(summary.grand_total, dec("10000.00"));
    }

    mod with_database {
        use super::*;
        use crate::external::mock::MockProvider;
        use crate::models::TradeForm;

        fn order(symbol: &str, shares: &str) -> TradeForm {
            TradeForm {
                symbol: Some(symbol.to_string()),
                shares: Some(shares.to_string()),
            }
        }

        #[sqlx::test(migrations = "./migrations")]
        async fn test_summary_prices_holdings(pool: PgPool) {
            let provider = MockProvider::new();
            let user = db::user_queries::create(&pool, "alice", "unused-hash").await.unwrap();
            trade_service::buy(&pool, &provider, user.id, order("TSLA", "2")).await.unwrap();
            trade_service::buy(&pool, &provider, user.id, order("AAPL", "4")).await.unwrap();

            let summary = summary(&pool, &provider, user.id).await.unwrap();
            let symbols: Vec<&str> = summary.holdings.iter().map(|h| h.symbol.as_str()).collect();
            assert_eq!(symbols, ["AAPL", "TSLA"]);
            assert_eq!(summary.cash, dec("8898.50"));
            assert_eq!(summary.grand_total, dec("10000.00"));
        }

        #[sqlx::test(migrations = "./migrations")]
        async fn test_fully_sold_symbol_leaves_sell_list(pool: PgPool) {
            let provider = MockProvider::new();
            let user = db::user_queries::create(&pool, "alice", "unused-hash").await.unwrap();
            trade_service::buy(&pool, &provider, user.id, order("AAPL", "2")).await.unwrap();
            trade_service::buy(&pool, &provider, user.id, order("TSLA", "1")).await.unwrap();
            trade_service::sell(&pool, &provider, user.id, order("AAPL", "2")).await.unwrap();

            assert_eq!(held_symbols(&pool, user.id).await.unwrap(), vec!["TSLA".to_string()]);

            let rows = history(&pool, user.id).await.unwrap();
            let entries: Vec<(&str, i64)> = rows.iter().map(|t| (t.symbol.as_str(), t.shares)).collect();
            assert_eq!(entries, [("AAPL", 2), ("TSLA", 1), ("AAPL", -2)]);
        }
    }
}
