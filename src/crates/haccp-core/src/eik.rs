//! EIK (unified identification code) validation
//!
//! A Bulgarian company EIK is 9 digits; branches carry a 13-digit form whose
//! first 9 digits are the parent company's code. Both forms end in a mod-11
//! check digit computed with a primary and a fallback weighting pass.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const PRIMARY_WEIGHTS_9: [u32; 8] = [1, 2, 3, 4, 5, 6, 7, 8];
const FALLBACK_WEIGHTS_9: [u32; 8] = [3, 4, 5, 6, 7, 8, 9, 10];
const PRIMARY_WEIGHTS_13: [u32; 4] = [2, 7, 3, 5];
const FALLBACK_WEIGHTS_13: [u32; 4] = [4, 9, 5, 7];

/// Reasons an EIK fails validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EikError {
    #[error("EIK is empty")]
    Empty,

    #[error("EIK must have 9 or 13 digits, got {0}")]
    InvalidLength(usize),

    #[error("EIK must contain digits only")]
    NonDigit,

    #[error("EIK checksum does not match")]
    ChecksumMismatch,
}

impl EikError {
    /// Machine-readable reason used in API responses
    pub fn reason(&self) -> &'static str {
        match self {
            EikError::Empty => "empty",
            EikError::InvalidLength(_) => "invalid_length",
            EikError::NonDigit => "non_digit",
            EikError::ChecksumMismatch => "checksum_mismatch",
        }
    }
}

/// A validated EIK
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Eik(String);

impl Eik {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the 13-digit branch form
    pub fn is_branch(&self) -> bool {
        self.0.len() == 13
    }

    /// The parent company's 9-digit code
    pub fn company_code(&self) -> &str {
        &self.0[..9]
    }
}

impl fmt::Display for Eik {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Eik {
    type Err = EikError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_eik(s)
    }
}

impl TryFrom<String> for Eik {
    type Error = EikError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_eik(&value)
    }
}

impl From<Eik> for String {
    fn from(eik: Eik) -> Self {
        eik.0
    }
}

/// Check whether `input` is a valid 9- or 13-digit EIK
pub fn is_valid_eik(input: &str) -> bool {
    validate_eik(input).is_ok()
}

/// Validate `input` and wrap it as an [`Eik`]
///
/// Shape checks (emptiness, digits only, length) run before any checksum
/// work. Surrounding whitespace is not accepted.
pub fn validate_eik(input: &str) -> Result<Eik, EikError> {
    if input.is_empty() {
        return Err(EikError::Empty);
    }
    if !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EikError::NonDigit);
    }

    let digits: Vec<u32> = input.bytes().map(|b| u32::from(b - b'0')).collect();
    match digits.len() {
        9 => {
            check_company_digits(&digits)?;
        }
        13 => {
            check_company_digits(&digits[..9])?;
            let expected = check_digit(&digits[8..12], &PRIMARY_WEIGHTS_13, &FALLBACK_WEIGHTS_13);
            if expected != digits[12] {
                return Err(EikError::ChecksumMismatch);
            }
        }
        n => return Err(EikError::InvalidLength(n)),
    }

    Ok(Eik(input.to_string()))
}

fn check_company_digits(digits: &[u32]) -> Result<(), EikError> {
    let expected = check_digit(&digits[..8], &PRIMARY_WEIGHTS_9, &FALLBACK_WEIGHTS_9);
    if expected == digits[8] {
        Ok(())
    } else {
        Err(EikError::ChecksumMismatch)
    }
}

/// Mod-11 weighted checksum; a remainder of 10 triggers the fallback
/// weights, and a second 10 yields 0.
fn check_digit(digits: &[u32], primary: &[u32], fallback: &[u32]) -> u32 {
    let weighted = |weights: &[u32]| -> u32 {
        digits
            .iter()
            .zip(weights)
            .map(|(d, w)| d * w)
            .sum::<u32>()
            % 11
    };

    match weighted(primary) {
        10 => match weighted(fallback) {
            10 => 0,
            r => r,
        },
        r => r,
    }
}
