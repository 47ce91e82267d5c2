mod holding;
mod quote;
mod transaction;
mod user;

pub use holding::{Holding, PortfolioSummary, ValuedHolding};
pub use quote::{Quote, QuoteForm};
pub use transaction::{CreateTransaction, TradeForm, Transaction, TransactionType};
pub use user::{LoginForm, RegisterForm, User};
