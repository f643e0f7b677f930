//! Credential format validation.

use simpanan_shared::{AppError, AppResult};

/// Validates the PIN format: exactly 4 ASCII digits.
///
/// # Errors
///
/// Returns `AppError::Validation` if the format is wrong.
pub fn validate_pin(pin: &str) -> AppResult<()> {
    if pin.len() == 4 && pin.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(AppError::Validation(
            "password must be exactly 4 digits".to_string(),
        ))
    }
}

/// Validates a member phone number: exactly 10 digits with the local
/// "08" mobile prefix.
///
/// # Errors
///
/// Returns `AppError::Validation` if the format is wrong.
pub fn validate_phone_number(phone: &str) -> AppResult<()> {
    if phone.len() == 10 && phone.bytes().all(|b| b.is_ascii_digit()) && phone.starts_with("08") {
        Ok(())
    } else {
        Err(AppError::Validation(
            "phone number must be 10 digits starting with 08".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1234")]
    #[case("0000")]
    #[case("9876")]
    fn test_valid_pins(#[case] pin: &str) {
        assert!(validate_pin(pin).is_ok());
    }

    #[rstest]
    #[case("123")]
    #[case("12345")]
    #[case("12a4")]
    #[case("")]
    #[case("١٢٣٤")] // non-ASCII digits
    fn test_invalid_pins(#[case] pin: &str) {
        assert!(matches!(validate_pin(pin), Err(AppError::Validation(_))));
    }

    #[rstest]
    #[case("0812345678")]
    #[case("0899999999")]
    fn test_valid_phone_numbers(#[case] phone: &str) {
        assert!(validate_phone_number(phone).is_ok());
    }

    #[rstest]
    #[case("081234567")] // too short
    #[case("08123456789")] // too long
    #[case("0712345678")] // wrong prefix
    #[case("08123a5678")]
    #[case("+628123456")]
    fn test_invalid_phone_numbers(#[case] phone: &str) {
        assert!(matches!(
            validate_phone_number(phone),
            Err(AppError::Validation(_))
        ));
    }
}
