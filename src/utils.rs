// Utility functions shared by the renderers and the HTTP layer

use crate::error::TextualError;

const DENOM_MIN_LEN: usize = 3;
const DENOM_MAX_LEN: usize = 128;

/// Check a base denomination against the bank module charset:
/// `[a-zA-Z][a-zA-Z0-9/:._-]{2,127}`.
pub fn validate_denom(denom: &str) -> Result<(), TextualError> {
    let mut chars = denom.chars();
    let leading_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | ':' | '.' | '_' | '-'));

    if leading_ok && rest_ok && (DENOM_MIN_LEN..=DENOM_MAX_LEN).contains(&denom.len()) {
        Ok(())
    } else {
        Err(TextualError::InvalidDenomination(denom.to_string()))
    }
}

/// Serde adapter carrying a `Natural` as a base-10 string, the way amounts
/// appear in chain JSON.
pub mod amount_string {
    use malachite::Natural;
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(value: &Natural, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Natural, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(de::Error::custom(format!("invalid amount {:?}", raw)));
        }
        Natural::from_str(&raw).map_err(|_| de::Error::custom(format!("invalid amount {:?}", raw)))
    }
}
