mod apology;
mod layout;
mod pages;

pub use apology::apology_page;
pub use pages::{
    buy_page, history_page, index_page, login_page, quote_page, quoted_page, register_page, sell_page,
};
