use std::sync::LazyLock;

use basil_shared::Country;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::TaxError;

static GSTIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][1-9A-Z]Z[0-9A-Z]$").unwrap());

static NL_VAT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^NL[0-9]{9}B[0-9]{2}$").unwrap());

static DE_VAT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^DE[1-9][0-9]{8}$").unwrap());

/// A validated Indian GST registration number.
///
/// 15 characters: 2-digit state code, the registrant's 10-character PAN,
/// an entity code, the literal `Z`, and a mod-36 check digit.
/// Deserialization routes through [`validate_gstin`], so a `Gstin` read
/// from JSON carries the same guarantees as one validated by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct Gstin(String);

impl TryFrom<String> for Gstin {
    type Error = TaxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_gstin(&value)
    }
}

impl Gstin {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Two-digit state code prefix.
    pub fn state_code(&self) -> &str {
        &self.0[..2]
    }

    /// The embedded PAN of the registrant.
    pub fn pan(&self) -> &str {
        &self.0[2..12]
    }
}

/// A validated EU VAT identification number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VatId {
    pub country: Country,
    pub value: String,
}

/// Validate a GSTIN: format, state code range, then check digit.
///
/// Input is trimmed and uppercased first; shopkeepers type these by hand.
pub fn validate_gstin(raw: &str) -> Result<Gstin, TaxError> {
    let normalized = raw.trim().to_ascii_uppercase();

    if !GSTIN_RE.is_match(&normalized) {
        return Err(TaxError::MalformedGstin(normalized));
    }

    let state: u8 = normalized[..2]
        .parse()
        .map_err(|_| TaxError::UnknownStateCode(normalized[..2].to_string()))?;
    if !(1..=38).contains(&state) {
        return Err(TaxError::UnknownStateCode(normalized[..2].to_string()));
    }

    let bytes = normalized.as_bytes();
    let expected = check_digit(&bytes[..14]);
    let actual = bytes[14] as char;
    if expected != actual {
        return Err(TaxError::GstinCheckDigit { expected, actual });
    }

    Ok(Gstin(normalized))
}

/// Validate a VAT ID against the country's national format.
///
/// Separator characters (spaces, dots) are stripped before matching.
/// India uses GSTIN, not VAT IDs.
pub fn validate_vat_id(country: Country, raw: &str) -> Result<VatId, TaxError> {
    let normalized: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .collect::<String>()
        .to_ascii_uppercase();

    let re = match country {
        Country::India => return Err(TaxError::WrongScheme(Country::India)),
        Country::Netherlands => &NL_VAT_RE,
        Country::Germany => &DE_VAT_RE,
    };

    if !re.is_match(&normalized) {
        return Err(TaxError::MalformedVatId {
            country,
            value: normalized,
        });
    }

    Ok(VatId {
        country,
        value: normalized,
    })
}

const CHARSET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

fn char_value(c: u8) -> u32 {
    match c {
        b'0'..=b'9' => (c - b'0') as u32,
        _ => (c - b'A') as u32 + 10,
    }
}

/// Mod-36 check digit over the first 14 characters: factors alternate 1/2,
/// each product contributes quotient + remainder base 36.
fn check_digit(payload: &[u8]) -> char {
    let mut sum = 0u32;
    for (i, &c) in payload.iter().enumerate() {
        let factor = if i % 2 == 0 { 1 } else { 2 };
        let product = char_value(c) * factor;
        sum += product / 36 + product % 36;
    }
    CHARSET[((36 - sum % 36) % 36) as usize] as char
}
