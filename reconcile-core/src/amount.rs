//! Amount coercion for statement numerals.

/// Parse a statement amount like `"-$1,234.50"` into a signed number.
///
/// Everything except digits, `.` and `-` is stripped first (currency
/// symbols, thousands separators, a leading `+`). A numeral that still
/// fails to parse becomes `0.0` instead of failing the line.
pub fn coerce_amount(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    match cleaned.parse::<f64>() {
        Ok(v) => v,
        Err(_) => {
            tracing::debug!(raw, "unparsable amount, using 0.0");
            0.0
        }
    }
}
