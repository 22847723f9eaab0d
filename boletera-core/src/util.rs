/// Formats a monetary amount the way the es-CO locale renders COP:
/// no decimals, `.` as the thousands separator, `$` with a space.
pub fn format_currency(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if rounded < 0 { "-" } else { "" };
    format!("{}$ {}", sign, grouped)
}
