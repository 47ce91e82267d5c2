use bigdecimal::BigDecimal;

/// Formats money as `$1,234.56`, negatives as `-$1,234.56`.
pub fn usd(value: &BigDecimal) -> String {
    let rendered = value.round(2).with_scale(2).to_string();
    let (negative, digits) = match rendered.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, rendered.as_str()),
    };
    let (whole, cents) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let is_zero = whole.chars().all(|c| c == '0') && cents.chars().all(|c| c == '0');
    let sign = if negative && !is_zero { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}
