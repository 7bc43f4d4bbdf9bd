//! Display formatters for raw directory fields.
//!
//! Everything here is pure: a raw value goes in, a display string comes out.
//! Input that does not match the expected shape is passed through rather
//! than rejected.

/// Format a phone number for display.
///
/// - 10 digits: `(965) 431-3024`
/// - `+CC` followed by 10 national digits: `+81 (965) 431-3024`
/// - 11 digits starting with `1`: `+1 (965) 431-3024`
///
/// Anything else is returned trimmed.
#[must_use]
pub fn format_phone_number(raw: &str) -> String {
    let trimmed = raw.trim();
    let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();

    match digits.len() {
        10 => national(&digits),
        n if n > 10 && trimmed.starts_with('+') => {
            let (country, rest) = digits.split_at(n - 10);
            format!("+{} {}", country, national(rest))
        }
        11 if digits.starts_with('1') => format!("+1 {}", national(&digits[1..])),
        _ => trimmed.to_string(),
    }
}

fn national(digits: &str) -> String {
    format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..])
}

/// Last `n` characters of `value`
fn tail(value: &str, n: usize) -> String {
    let count = value.chars().count();
    value.chars().skip(count.saturating_sub(n)).collect()
}

/// `**** **** **** 1815`
#[must_use]
pub fn masked_card_number(card_number: &str) -> String {
    format!("**** **** **** {}", tail(card_number.trim(), 4))
}

/// `***-**-0289`; only the digits of the SSN are considered
#[must_use]
pub fn masked_ssn(ssn: &str) -> String {
    let digits: String = ssn.chars().filter(char::is_ascii_digit).collect();
    format!("***-**-{}", tail(&digits, 4))
}

/// Birth dates are served as `YYYY-M-D`; shown as `M/D/YYYY`.
#[must_use]
pub fn format_birth_date(raw: &str) -> String {
    let parts: Vec<&str> = raw.trim().split('-').collect();
    if let [year, month, day] = parts.as_slice() {
        if let (Ok(year), Ok(month), Ok(day)) =
            (year.parse::<u32>(), month.parse::<u32>(), day.parse::<u32>())
        {
            if (1..=12).contains(&month) && (1..=31).contains(&day) {
                return format!("{}/{}/{}", month, day, year);
            }
        }
    }
    raw.to_string()
}

/// Upper-case the first character
#[must_use]
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
