use super::layout::{form_field, layout, Nav};
use crate::models::{PortfolioSummary, Quote, Transaction};
use crate::utils::format::usd;
use crate::utils::html::escape;

pub fn login_page() -> String {
    let main = format!(
        r#"<form action="/login" method="post">
        {}
        {}
        <button class="btn btn-primary" type="submit">Log In</button>
    </form>"#,
        form_field("username", "text", "Username", true),
        form_field("password", "password", "Password", false),
    );
    layout("Log In", Nav::Guest, &main)
}

pub fn register_page() -> String {
    let main = format!(
        r#"<form action="/register" method="post">
        {}
        {}
        {}
        <button class="btn btn-primary" type="submit">Register</button>
    </form>"#,
        form_field("username", "text", "Username", true),
        form_field("password", "password", "Password", false),
        form_field("confirmation", "password", "Password (again)", false),
    );
    layout("Register", Nav::Guest, &main)
}

pub fn index_page(summary: &PortfolioSummary) -> String {
    let rows: String = summary
        .holdings
        .iter()
        .map(|h| {
            format!(
                r#"<tr><td class="text-start">{}</td><td class="text-start">{}</td><td class="text-end">{}</td><td class="text-end">{}</td><td class="text-end">{}</td></tr>"#,
                escape(&h.symbol),
                escape(&h.name),
                h.shares,
                usd(&h.price),
                usd(&h.total),
            )
        })
        .collect();

    let main = format!(
        r#"<table class="table table-striped">
        <thead>
            <tr>
                <th class="text-start">Symbol</th>
                <th class="text-start">Name</th>
                <th class="text-end">Shares</th>
                <th class="text-end">Price</th>
                <th class="text-end">TOTAL</th>
            </tr>
        </thead>
        <tbody>{rows}</tbody>
        <tfoot>
            <tr><td class="border-0 fw-bold text-end" colspan="4">Cash</td><td class="border-0 text-end">{cash}</td></tr>
            <tr><td class="border-0 fw-bold text-end" colspan="4">TOTAL</td><td class="border-0 fw-bold text-end">{total}</td></tr>
        </tfoot>
    </table>"#,
        rows = rows,
        cash = usd(&summary.cash),
        total = usd(&summary.grand_total),
    );
    layout("Portfolio", Nav::Member, &main)
}

pub fn buy_page() -> String {
    let main = format!(
        r#"<form action="/buy" method="post">
        {}
        <div class="mb-3"><input autocomplete="off" class="form-control mx-auto w-auto" min="1" name="shares" placeholder="Shares" type="number"></div>
        <button class="btn btn-primary" type="submit">Buy</button>
    </form>"#,
        form_field("symbol", "text", "Symbol", true),
    );
    layout("Buy", Nav::Member, &main)
}

pub fn sell_page(symbols: &[String]) -> String {
    let options: String = symbols
        .iter()
        .map(|s| format!(r#"<option value="{0}">{0}</option>"#, escape(s)))
        .collect();
    let main = format!(
        r#"<form action="/sell" method="post">
        <div class="mb-3">
            <select class="form-select mx-auto w-auto" name="symbol">
                <option disabled selected value="">Symbol</option>
                {options}
            </select>
        </div>
        <div class="mb-3"><input autocomplete="off" class="form-control mx-auto w-auto" min="1" name="shares" placeholder="Shares" type="number"></div>
        <button class="btn btn-primary" type="submit">Sell</button>
    </form>"#,
        options = options,
    );
    layout("Sell", Nav::Member, &main)
}

pub fn quote_page() -> String {
    let main = format!(
        r#"<form action="/quote" method="post">
        {}
        <button class="btn btn-primary" type="submit">Quote</button>
    </form>"#,
        form_field("symbol", "text", "Symbol", true),
    );
    layout("Quote", Nav::Member, &main)
}

pub fn quoted_page(quote: &Quote) -> String {
    let main = format!(
        "<p>A share of {} ({}) costs {}.</p>",
        escape(&quote.name),
        escape(&quote.symbol),
        usd(&quote.price),
    );
    layout("Quoted", Nav::Member, &main)
}

pub fn history_page(transactions: &[Transaction]) -> String {
    let rows: String = transactions
        .iter()
        .map(|t| {
            format!(
                r#"<tr><td class="text-start">{}</td><td class="text-start">{}</td><td class="text-end">{}</td><td class="text-end">{}</td><td class="text-end">{}</td></tr>"#,
                escape(&t.symbol),
                escape(&t.transaction_type),
                t.shares,
                usd(&t.price),
                t.lastmodified.format("%Y-%m-%d %H:%M:%S"),
            )
        })
        .collect();

    let main = format!(
        r#"<table class="table table-striped">
        <thead>
            <tr>
                <th class="text-start">Symbol</th>
                <th class="text-start">Type</th>
                <th class="text-end">Shares</th>
                <th class="text-end">Price</th>
                <th class="text-end">Transacted</th>
            </tr>
        </thead>
        <tbody>{}</tbody>
    </table>"#,
        rows
    );
    layout("History", Nav::Member, &main)
}
