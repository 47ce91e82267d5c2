use axum::http::StatusCode;

use super::layout::{layout, Nav};
use crate::utils::html::escape;

const MEMEGEN_BASE: &str = "https://api.memegen.link/images/custom";
const MEMEGEN_BACKGROUND: &str = "https://i.imgur.com/CsCgN7Ll.png";

/// Encodes text for a memegen.link path segment: memegen's own escapes
/// first, then percent-encoding for whatever is left.
fn memegen_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '-' => out.push_str("--"),
            ' ' => out.push('-'),
            '_' => out.push_str("__"),
            '?' => out.push_str("~q"),
            '%' => out.push_str("~p"),
            '#' => out.push_str("~h"),
            '/' => out.push_str("~s"),
            '"' => out.push_str("''"),
            _ => out.push(ch),
        }
    }
    url::form_urlencoded::byte_serialize(out.as_bytes()).collect()
}

pub fn apology_page(status: StatusCode, message: &str) -> String {
    let src = format!(
        "{}/{}/{}.jpg?background={}",
        MEMEGEN_BASE,
        status.as_u16(),
        memegen_escape(message),
        MEMEGEN_BACKGROUND
    );
    let main = format!(
        r#"<img alt="{code}" class="border img-fluid" src="{src}" title="{code}">
    <p class="mt-3">{message}</p>"#,
        code = status.as_u16(),
        src = escape(&src),
        message = escape(message),
    );
    layout("Apology", Nav::Guest, &main)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memegen_escape() {
        assert_eq!(memegen_escape("must provide username"), "must-provide-username");
        assert_eq!(memegen_escape("50% off? #1 a/b"), "50%7Ep-off%7Eq-%7Eh1-a%7Esb");
        assert_eq!(memegen_escape(r#"say "hi"-_"#), "say-%27%27hi%27%27--__");
    }

    #[test]
    fn test_memegen_escape_percent_encodes_the_rest() {
        assert_eq!(memegen_escape("can't afford"), "can%27t-afford");
        assert_eq!(memegen_escape("AT&T+co"), "AT%26T%2Bco");
        assert_eq!(memegen_escape("café"), "caf%C3%A9");
    }

    #[test]
    fn test_apology_page_embeds_code_and_message() {
        let page = apology_page(StatusCode::FORBIDDEN, "invalid username and/or password");
        assert!(page.contains("/403/invalid-username-and%7Esor-password.jpg"));
        assert!(page.contains("invalid username and/or password"));
    }
}
