//! # Shared Utility Functions
//!
//! Display and parsing helpers used by both the backend and the dashboard client.
//!
//! ## Phone Numbers
//!
//! - [`digits_only`] - Strip everything except ASCII digits
//! - [`format_phone`] - Render an 11-digit number as `+7 (999) 123-45-67`
//! - [`parse_phone_list`] - Extract valid numbers from pasted text, one per line
//!
//! ## Money and Minutes
//!
//! - [`format_currency`] - Whole rubles with thousands separators
//! - [`format_minutes`] - Compact minute counts (`2.0k min`)
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::format_phone;
//!
//! assert_eq!(format_phone("79991234567"), "+7 (999) 123-45-67");
//! ```

/// Keep only the ASCII digits of `input`.
pub fn digits_only(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Format a phone number as `+7 (XXX) XXX-XX-XX`.
///
/// Input that does not reduce to exactly 11 digits is returned unchanged.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_phone;
///
/// assert_eq!(format_phone("8 (999) 123 45 67"), "+8 (999) 123-45-67");
/// assert_eq!(format_phone("12345"), "12345");
/// ```
pub fn format_phone(phone: &str) -> String {
    let digits = digits_only(phone);
    if digits.len() != 11 {
        return phone.to_string();
    }

    // Slicing is safe: all characters are ASCII digits
    format!(
        "+{} ({}) {}-{}-{}",
        &digits[..1],
        &digits[1..4],
        &digits[4..7],
        &digits[7..9],
        &digits[9..11]
    )
}

/// Parse pasted text into a list of normalized phone numbers.
///
/// One number per line; separators are ignored. Lines that do not reduce to an
/// 11-digit number starting with `7` are dropped.
pub fn parse_phone_list(text: &str) -> Vec<String> {
    text.trim()
        .lines()
        .map(digits_only)
        .filter(|digits| digits.len() == 11 && digits.starts_with('7'))
        .collect()
}

/// Format whole rubles, e.g. `1490` -> `1 490 ₽`.
pub fn format_currency(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    if amount < 0 {
        format!("-{} ₽", grouped)
    } else {
        format!("{} ₽", grouped)
    }
}

/// Format a minute count, abbreviating thousands.
pub fn format_minutes(minutes: u32) -> String {
    if minutes >= 1000 {
        format!("{:.1}k min", minutes as f64 / 1000.0)
    } else {
        format!("{} min", minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone("79991234567"), "+7 (999) 123-45-67");
        assert_eq!(format_phone("+7 (999) 123-45-67"), "+7 (999) 123-45-67");
        assert_eq!(format_phone("799912345"), "799912345");
    }

    #[test]
    fn test_parse_phone_list() {
        let text = "+7 (999) 123-45-67\n\n89991234567\n7 999 765 43 21\nnot a phone\n";
        assert_eq!(
            parse_phone_list(text),
            vec!["79991234567".to_string(), "79997654321".to_string()]
        );
        assert!(parse_phone_list("").is_empty());
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0), "0 ₽");
        assert_eq!(format_currency(490), "490 ₽");
        assert_eq!(format_currency(1490), "1 490 ₽");
        assert_eq!(format_currency(1234567), "1 234 567 ₽");
        assert_eq!(format_currency(-150), "-150 ₽");
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(500), "500 min");
        assert_eq!(format_minutes(2000), "2.0k min");
        assert_eq!(format_minutes(10000), "10.0k min");
    }
}
