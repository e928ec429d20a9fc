//! Common validation utilities.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Local or international Iranian mobile number: optional `98`, `+98`,
    /// `0098` or `0` prefix, then `9` and nine more digits.
    static ref MOBILE_NUMBER_REGEX: Regex =
        Regex::new(r"^(?:98|\+98|0098|0)?9[0-9]{9}$").unwrap();
}

/// Message returned when a mobile number fails validation.
pub const INVALID_MOBILE_NUMBER_MESSAGE: &str = "mobile number format is not valid";

/// Returns true if `mobile_number` has the shape of a mobile number.
pub fn is_valid_mobile_number(mobile_number: &str) -> bool {
    MOBILE_NUMBER_REGEX.is_match(mobile_number)
}

/// Validator-compatible wrapper around [`is_valid_mobile_number`].
pub fn validate_mobile_number(mobile_number: &str) -> Result<(), ValidationError> {
    if is_valid_mobile_number(mobile_number) {
        Ok(())
    } else {
        let mut err = ValidationError::new("mobile_number_format");
        err.message = Some(INVALID_MOBILE_NUMBER_MESSAGE.into());
        Err(err)
    }
}
