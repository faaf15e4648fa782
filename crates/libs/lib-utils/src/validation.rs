//! # Validation Utilities
//!
//! Input rules shared by the backend handlers and the dashboard client.
//!
//! Every rule is a pure function returning `Ok` or a human-readable message.
//! [`validate_phone`] additionally returns the normalized digits, which is the
//! form stored in the database and sent over the wire.

use url::Url;

pub const PHONE_DIGITS: usize = 11;
pub const SMS_CODE_LEN: usize = 4;
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_KNOWLEDGE_TEXT_LEN: usize = 10;
pub const MAX_CONCURRENT_CALLS: u32 = 50;

/// Validate that a string is not empty.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate minimum length in characters.
pub fn validate_min_length(value: &str, min: usize, field_name: &str) -> Result<(), String> {
    if value.chars().count() < min {
        Err(format!("{} must be at least {} characters", field_name, min))
    } else {
        Ok(())
    }
}

/// Validate a Russian mobile number and return its normalized digits.
///
/// Non-digits are stripped first; the rest must be exactly 11 digits starting with `7`.
///
/// # Examples
///
/// ```rust
/// use lib_utils::validation::validate_phone;
///
/// assert_eq!(validate_phone("+7 (999) 123-45-67").unwrap(), "79991234567");
/// assert!(validate_phone("89991234567").is_err());
/// ```
pub fn validate_phone(phone: &str) -> Result<String, String> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() != PHONE_DIGITS {
        return Err("Phone number must contain 11 digits".to_string());
    }
    if !digits.starts_with('7') {
        return Err("Phone number must start with 7".to_string());
    }

    Ok(digits)
}

/// Validate a 4-digit SMS code.
pub fn validate_sms_code(code: &str) -> Result<(), String> {
    if code.chars().count() != SMS_CODE_LEN {
        return Err("Code must be 4 digits".to_string());
    }
    if !code.chars().all(|c| c.is_ascii_digit()) {
        return Err("Code must contain only digits".to_string());
    }
    Ok(())
}

/// Validate a new account password.
///
/// At least 8 characters with one lowercase letter, one uppercase letter and one digit.
pub fn validate_password(password: &str) -> Result<(), String> {
    validate_min_length(password, MIN_PASSWORD_LEN, "Password")?;

    if !password.chars().any(|c| c.is_lowercase()) {
        return Err("Password must contain a lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        return Err("Password must contain an uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain a digit".to_string());
    }
    Ok(())
}

/// Login only checks presence; strength rules apply at registration.
pub fn validate_login_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        Err("Enter your password".to_string())
    } else {
        Ok(())
    }
}

/// Validate free text submitted to the knowledge base.
pub fn validate_knowledge_text(text: &str) -> Result<(), String> {
    validate_min_length(text.trim(), MIN_KNOWLEDGE_TEXT_LEN, "Text")
}

/// Validate integration credentials: non-empty API key and an absolute http(s) URL.
pub fn validate_integration(api_key: &str, url: &str) -> Result<(), String> {
    validate_not_empty(api_key, "API key")?;

    let parsed = Url::parse(url.trim()).map_err(|_| "Enter a valid URL".to_string())?;
    match parsed.scheme() {
        "http" | "https" if parsed.has_host() => Ok(()),
        _ => Err("Enter a valid URL".to_string()),
    }
}

/// Validate a 24-hour `HH:MM` time.
pub fn validate_time_of_day(value: &str, field_name: &str) -> Result<(), String> {
    let invalid = || format!("{} must be in HH:MM format", field_name);

    let (hours, minutes) = value.split_once(':').ok_or_else(invalid)?;
    if hours.len() != 2 || minutes.len() != 2 {
        return Err(invalid());
    }

    let hours: u8 = hours.parse().map_err(|_| invalid())?;
    let minutes: u8 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(())
}

/// Validate the concurrent call limit (1..=50).
pub fn validate_max_concurrent_calls(value: u32) -> Result<(), String> {
    if (1..=MAX_CONCURRENT_CALLS).contains(&value) {
        Ok(())
    } else {
        Err(format!(
            "Concurrent calls must be between 1 and {}",
            MAX_CONCURRENT_CALLS
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_accepts_formatted_input() {
        assert_eq!(validate_phone("79991234567").unwrap(), "79991234567");
        assert_eq!(validate_phone("+7 (999) 123-45-67").unwrap(), "79991234567");
    }

    #[test]
    fn test_phone_property_over_leading_digit() {
        // Every 11-digit string passes iff it starts with 7
        for lead in 0..10u8 {
            let phone = format!("{}9991234567", lead);
            assert_eq!(validate_phone(&phone).is_ok(), lead == 7, "phone {phone}");
        }
    }

    #[test]
    fn test_phone_rejects_wrong_length() {
        let mut phone = String::from("7");
        for len in 1..=15 {
            assert_eq!(validate_phone(&phone).is_ok(), len == PHONE_DIGITS, "len {len}");
            phone.push('1');
        }
        assert!(validate_phone("").is_err());
    }

    #[test]
    fn test_sms_code() {
        for code in ["0000", "1234", "9999"] {
            assert!(validate_sms_code(code).is_ok(), "{code}");
        }
        for code in ["", "123", "12345", "12a4", "abcd", " 123", "１２３４"] {
            assert!(validate_sms_code(code).is_err(), "{code}");
        }
    }

    #[test]
    fn test_password_requires_every_class() {
        assert!(validate_password("Passw0rd").is_ok());
        assert!(validate_password("Abcdefg1").is_ok());

        assert!(validate_password("short").is_err());
        assert!(validate_password("Pass0rd").is_err()); // 7 chars
        assert!(validate_password("passw0rd").is_err()); // no upper
        assert!(validate_password("PASSW0RD").is_err()); // no lower
        assert!(validate_password("Password").is_err()); // no digit
    }

    #[test]
    fn test_login_password() {
        assert!(validate_login_password("x").is_ok());
        assert!(validate_login_password("").is_err());
    }

    #[test]
    fn test_knowledge_text_trims() {
        assert!(validate_knowledge_text("Question?\nAnswer.").is_ok());
        assert!(validate_knowledge_text("   short   ").is_err());
    }

    #[test]
    fn test_integration() {
        assert!(validate_integration("key", "https://crm.example.com/hook").is_ok());
        assert!(validate_integration("key", "http://localhost:8080").is_ok());

        assert!(validate_integration("", "https://crm.example.com").is_err());
        assert!(validate_integration("key", "not a url").is_err());
        assert!(validate_integration("key", "ftp://files.example.com").is_err());
        assert!(validate_integration("key", "mailto:sales@example.com").is_err());
    }

    #[test]
    fn test_time_of_day() {
        for time in ["00:00", "08:00", "22:00", "23:59"] {
            assert!(validate_time_of_day(time, "Start").is_ok(), "{time}");
        }
        for time in ["24:00", "12:60", "8:00", "0800", "", "ab:cd"] {
            assert!(validate_time_of_day(time, "Start").is_err(), "{time}");
        }
    }

    #[test]
    fn test_max_concurrent_calls_bounds() {
        assert!(validate_max_concurrent_calls(0).is_err());
        assert!(validate_max_concurrent_calls(1).is_ok());
        assert!(validate_max_concurrent_calls(50).is_ok());
        assert!(validate_max_concurrent_calls(51).is_err());
    }
}
