//! Number formatting for canonical CDC output.

/// Format a parameter value in CDC scientific notation, e.g. `8.3E+01`.
///
/// Infinite values are written as `inf`/`-inf`, which the tokenizer reads
/// back as numbers.
pub fn format_value(value: f64, decimals: usize) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    // No signed zero in the output.
    let value = if value == 0.0 { 0.0 } else { value };
    let text = format!("{:.*e}", decimals, value);
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}E{}{:02}", mantissa, sign, exponent.abs())
        }
        None => text,
    }
}
