pub(crate) mod auth;
pub(crate) mod health;
pub(crate) mod portfolio;
pub(crate) mod quote;
pub(crate) mod trade;
