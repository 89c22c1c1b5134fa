//! Amount types: native drops and issued tokens.
//!
//! Native amounts keep two exact string forms: the integer drops count and the
//! decimal display value (1 XRP = 10^6 drops). Every conversion runs through
//! `rust_decimal`, so binary floating point never touches a balance.

use crate::address::is_account_id;
use crate::error::ValidationError;
use crate::params::{CURRENCY_MAX_LEN, DEFAULT_SCALE};
use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Largest scale the 96-bit decimal mantissa can carry as a 10^scale factor.
const MAX_SCALE: u32 = 28;

/// Native ledger amount.
///
/// Holds drops and display forms together so neither side is ever recomputed
/// with rounding. Construction fails rather than truncate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Amount {
    drops: String,
    display: String,
    scale: u32,
}

impl Amount {
    /// Builds from whichever form `value` is in: a fractional part means the
    /// display form, a whole number is taken as drops.
    pub fn new(value: &str, scale: u32) -> Result<Self, ValidationError> {
        if value.contains('.') {
            Self::from_display_scaled(value, scale)
        } else {
            Self::from_drops_scaled(value, scale)
        }
    }

    /// Integer drops string, default scale.
    pub fn from_drops(drops: &str) -> Result<Self, ValidationError> {
        Self::from_drops_scaled(drops, DEFAULT_SCALE)
    }

    pub fn from_drops_scaled(drops: &str, scale: u32) -> Result<Self, ValidationError> {
        if drops.contains('.') {
            return Err(ValidationError::MalformedAmount(format!(
                "drops must be a whole number: {drops}"
            )));
        }
        let parsed = parse_unsigned_decimal(drops)?;
        let display = parsed
            .checked_div(scale_factor(scale)?)
            .ok_or_else(|| ValidationError::MalformedAmount(drops.to_string()))?;
        Ok(Self {
            drops: parsed.normalize().to_string(),
            display: display.normalize().to_string(),
            scale,
        })
    }

    /// Decimal display string, default scale.
    pub fn from_display(display: &str) -> Result<Self, ValidationError> {
        Self::from_display_scaled(display, DEFAULT_SCALE)
    }

    pub fn from_display_scaled(display: &str, scale: u32) -> Result<Self, ValidationError> {
        let parsed = parse_unsigned_decimal(display)?;
        let drops = parsed
            .checked_mul(scale_factor(scale)?)
            .ok_or_else(|| ValidationError::MalformedAmount(display.to_string()))?;
        if !drops.fract().is_zero() {
            return Err(ValidationError::MalformedAmount(format!(
                "{display} has more than {scale} decimal places"
            )));
        }
        Ok(Self {
            drops: drops.normalize().to_string(),
            display: parsed.normalize().to_string(),
            scale,
        })
    }

    /// Integer drops string, no leading zeros.
    pub fn drops(&self) -> &str {
        &self.drops
    }

    /// Decimal display string, no trailing zeros or point.
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.drops == "0"
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display)
    }
}

/// Wire form: native amounts travel as the drops string.
impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.drops)
    }
}

/// Issued-token amount: currency / value / issuer.
///
/// Decoded results keep whichever parts pass their grammar and leave the rest
/// unset. The strict constructor is for amounts we author ourselves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IssuedAmount {
    currency: Option<String>,
    value: Option<String>,
    issuer: Option<String>,
}

impl IssuedAmount {
    /// Strict form: all three parts present and valid.
    pub fn new(currency: &str, value: &str, issuer: &str) -> Result<Self, ValidationError> {
        if !is_currency_code(currency) {
            return Err(ValidationError::InvalidCurrency(currency.to_string()));
        }
        if !is_token_value(value) {
            return Err(ValidationError::InvalidIssuedValue(value.to_string()));
        }
        if !is_account_id(issuer) {
            return Err(ValidationError::InvalidAddress(issuer.to_string()));
        }
        Ok(Self {
            currency: Some(currency.to_string()),
            value: Some(value.to_string()),
            issuer: Some(issuer.to_string()),
        })
    }

    /// Lenient form for decoded documents: parts failing their grammar are
    /// dropped instead of failing the whole result.
    pub fn from_parts(currency: Option<&str>, value: Option<&str>, issuer: Option<&str>) -> Self {
        Self {
            currency: currency.filter(|c| is_currency_code(c)).map(str::to_string),
            value: value.filter(|v| is_token_value(v)).map(str::to_string),
            issuer: issuer.filter(|i| is_account_id(i)).map(str::to_string),
        }
    }

    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn issuer(&self) -> Option<&str> {
        self.issuer.as_deref()
    }

    /// True when currency, value and issuer are all set.
    pub fn is_complete(&self) -> bool {
        self.currency.is_some() && self.value.is_some() && self.issuer.is_some()
    }
}

/// Wire form: an object carrying only the parts that are set.
impl Serialize for IssuedAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let present = [&self.currency, &self.value, &self.issuer]
            .iter()
            .filter(|part| part.is_some())
            .count();
        let mut map = serializer.serialize_map(Some(present))?;
        if let Some(currency) = &self.currency {
            map.serialize_entry("currency", currency)?;
        }
        if let Some(value) = &self.value {
            map.serialize_entry("value", value)?;
        }
        if let Some(issuer) = &self.issuer {
            map.serialize_entry("issuer", issuer)?;
        }
        map.end()
    }
}

/// Either form a transaction amount takes on the wire: a drops string for the
/// native currency, an object for issued tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnyAmount {
    Native(Amount),
    Issued(IssuedAmount),
}

impl From<Amount> for AnyAmount {
    fn from(amount: Amount) -> Self {
        Self::Native(amount)
    }
}

impl From<IssuedAmount> for AnyAmount {
    fn from(amount: IssuedAmount) -> Self {
        Self::Issued(amount)
    }
}

impl Serialize for AnyAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Native(amount) => amount.serialize(serializer),
            Self::Issued(issued) => issued.serialize(serializer),
        }
    }
}

/// Currency codes: 1..=16 chars of letters, digits, whitespace and a small
/// symbol set.
pub fn is_currency_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= CURRENCY_MAX_LEN
        && code.chars().all(|c| {
            c.is_ascii_alphanumeric() || c.is_ascii_whitespace() || "_!#@$()[]%&^".contains(c)
        })
}

/// Issued-token values: unsigned decimal, `123` or `123.456`.
pub fn is_token_value(value: &str) -> bool {
    is_decimal_string(value)
}

fn is_decimal_string(value: &str) -> bool {
    let (int_part, frac_part) = match value.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (value, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(int_part) && frac_part.is_none_or(all_digits)
}

fn parse_unsigned_decimal(value: &str) -> Result<Decimal, ValidationError> {
    if value.starts_with('-') {
        return Err(ValidationError::MalformedAmount(format!(
            "negative amount: {value}"
        )));
    }
    if !is_decimal_string(value) {
        return Err(ValidationError::MalformedAmount(value.to_string()));
    }
    Decimal::from_str(value).map_err(|_| ValidationError::MalformedAmount(value.to_string()))
}

fn scale_factor(scale: u32) -> Result<Decimal, ValidationError> {
    if scale > MAX_SCALE {
        return Err(ValidationError::MalformedAmount(format!(
            "scale {scale} unsupported"
        )));
    }
    Ok(Decimal::from_i128_with_scale(10_i128.pow(scale), 0))
}
