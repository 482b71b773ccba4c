//! Human-readable money formatting.

/// Display symbol for well-known codes; others are prefixed with the code.
fn symbol(code: &str) -> Option<&'static str> {
    match code {
        "COP" | "USD" | "MXN" => Some("$"),
        "EUR" => Some("€"),
        "BRL" => Some("R$"),
        "GBP" => Some("£"),
        _ => None,
    }
}

/// `<symbol><amount> <CODE>` with exactly `decimals` fraction digits.
///
/// Values that round to zero print unsigned.
pub fn money(amount: f64, code: &str, decimals: u32) -> String {
    let decimals = decimals as usize;
    let mut digits = format!("{amount:.decimals$}");
    if digits.starts_with('-') && digits[1..].chars().all(|c| c == '0' || c == '.') {
        digits.remove(0);
    }
    match symbol(code) {
        Some(sym) => format!("{sym}{digits} {code}"),
        None => format!("{code} {digits} {code}"),
    }
}

/// Like [`money`], with an explicit `+` for positive balances.
pub fn signed_money(amount: f64, code: &str, decimals: u32) -> String {
    let text = money(amount, code, decimals);
    let rounds_to_zero = !text.chars().any(|c| c.is_ascii_digit() && c != '0');
    if amount > 0.0 && !rounds_to_zero {
        format!("+{text}")
    } else {
        text
    }
}
