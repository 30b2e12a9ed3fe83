use super::errors::SinpeError;

/// Turn what the user typed ("₡1.500", "1,500", "2000") into colones.
///
/// Currency symbols, thousands delimiters and spaces are dropped. A minus
/// before the first digit is kept; positivity is checked by the transfer.
pub fn normalize_amount(input: &str) -> Result<i64, SinpeError> {
    let invalid = || SinpeError::Validation(format!("'{}' is not a valid amount", input.trim()));

    let negative = input
        .trim()
        .chars()
        .take_while(|c| !c.is_ascii_digit())
        .any(|c| c == '-');
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(invalid());
    }

    let value: i64 = digits.parse().map_err(|_| invalid())?;
    Ok(if negative { -value } else { value })
}

/// "₡5.000" style display, thousands delimited with '.'
pub fn format_colones(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    if amount < 0 {
        format!("-₡{}", grouped)
    } else {
        format!("₡{}", grouped)
    }
}
