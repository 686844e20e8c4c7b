use crate::error::{ResolveError, TextualError};
use crate::utils::{amount_string, validate_denom};
use malachite::Natural;
use serde::{Deserialize, Serialize};

/// A single (denomination, amount) pair expressed in base units.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Coin {
    pub denom: String,
    #[serde(with = "amount_string")]
    pub amount: Natural,
}

impl Coin {
    /// Build a coin, checking the denomination charset.
    pub fn new(denom: impl Into<String>, amount: Natural) -> Result<Self, TextualError> {
        let denom = denom.into();
        validate_denom(&denom)?;
        Ok(Self { denom, amount })
    }
}

/// Largest display exponent accepted from metadata.
pub const MAX_EXPONENT: u32 = 255;

/// How a base denomination maps to its display denomination:
/// `display_amount = base_amount / 10^exponent`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DenomMetadata {
    pub base: String,
    pub display: String,
    pub exponent: u32,
}

impl DenomMetadata {
    pub fn new(base: impl Into<String>, display: impl Into<String>, exponent: u32) -> Self {
        Self {
            base: base.into(),
            display: display.into(),
            exponent,
        }
    }

    /// Reject entries whose rendered text could not be parsed back, or
    /// whose exponent would blow up the rendered amount.
    pub fn validate(&self) -> Result<(), ResolveError> {
        let display_ok = !self.display.is_empty()
            && !self
                .display
                .chars()
                .any(|c| c.is_whitespace() || c == ',');
        if !display_ok {
            return Err(ResolveError::InvalidMetadata(format!(
                "display denomination {:?} of {} is not a single word",
                self.display, self.base
            )));
        }
        if self.exponent > MAX_EXPONENT {
            return Err(ResolveError::InvalidMetadata(format!(
                "exponent {} of {} exceeds {}",
                self.exponent, self.base, MAX_EXPONENT
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DenomUnit {
    pub denom: String,
    pub exponent: u32,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Denomination metadata as stored by the bank module.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BankMetadata {
    #[serde(default)]
    pub description: String,
    pub denom_units: Vec<DenomUnit>,
    pub base: String,
    pub display: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
}

impl TryFrom<BankMetadata> for DenomMetadata {
    type Error = ResolveError;

    fn try_from(metadata: BankMetadata) -> Result<Self, Self::Error> {
        let base_unit = metadata
            .denom_units
            .iter()
            .find(|unit| unit.denom == metadata.base);
        if let Some(unit) = base_unit {
            if unit.exponent != 0 {
                return Err(ResolveError::InvalidMetadata(format!(
                    "base unit {} has exponent {}",
                    metadata.base, unit.exponent
                )));
            }
        }

        let display_unit = metadata
            .denom_units
            .iter()
            .find(|unit| unit.denom == metadata.display)
            .ok_or_else(|| {
                ResolveError::InvalidMetadata(format!(
                    "display unit {} missing from {}",
                    metadata.display, metadata.base
                ))
            })?;

        let converted = DenomMetadata {
            exponent: display_unit.exponent,
            base: metadata.base,
            display: metadata.display,
        };
        converted.validate()?;
        Ok(converted)
    }
}

/// One unit of reviewable output.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Screen {
    pub text: String,
    #[serde(default)]
    pub indent: u32,
    #[serde(default)]
    pub expert: bool,
}

impl Screen {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            indent: 0,
            expert: false,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct FormatCoinsRequest {
    pub coins: Vec<Coin>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct FormatCoinsResponse {
    pub screens: Vec<Screen>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ParseCoinsRequest {
    pub screens: Vec<Screen>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ParseCoinsResponse {
    pub coins: Vec<Coin>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
