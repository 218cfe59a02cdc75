//! EIK lookup response

use haccp_core::validate_eik;
use serde::{Deserialize, Serialize};

/// Result of checking an identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EikCheckResponse {
    pub eik: String,
    pub valid: bool,
    /// Why the identifier was rejected
    pub reason: Option<String>,
}

impl EikCheckResponse {
    pub fn check(eik: &str) -> Self {
        match validate_eik(eik) {
            Ok(valid) => Self {
                eik: valid.to_string(),
                valid: true,
                reason: None,
            },
            Err(e) => Self {
                eik: eik.to_string(),
                valid: false,
                reason: Some(e.reason().to_string()),
            },
        }
    }
}
