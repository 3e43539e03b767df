//! Amount validation for mint and transfer.
//!
//! Amounts arrive either as signed integers from typed callers or as text
//! from the hosting platform. Text is first parsed into an integer, then
//! every amount goes through [`validate_amount`], which rejects negatives.
//! Zero is a valid amount.

use crate::error::TypeError;

/// Accept a signed amount if it is non-negative.
pub fn validate_amount(amount: i64) -> Result<u64, TypeError> {
    u64::try_from(amount).map_err(|_| TypeError::NegativeAmount(amount))
}

/// Parse a textual amount argument into an integer.
///
/// Plain integer literals are accepted, as are decimal literals whose
/// fractional part is all zeros (`"5.0"`). Anything else, including
/// `"1.5"`, `"1e3"` and the empty string, is rejected. The sign is left
/// for [`validate_amount`].
pub fn parse_amount(text: &str) -> Result<i64, TypeError> {
    let trimmed = text.trim();
    let integral = match trimmed.split_once('.') {
        Some((whole, fraction))
            if !whole.is_empty()
                && !fraction.is_empty()
                && fraction.bytes().all(|b| b == b'0') =>
        {
            whole
        }
        Some(_) => return Err(TypeError::NotAnInteger(text.to_string())),
        None => trimmed,
    };
    integral
        .parse()
        .map_err(|_| TypeError::NotAnInteger(text.to_string()))
}
