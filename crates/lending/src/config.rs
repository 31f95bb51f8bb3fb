//! Lending configuration
//!
//! Every field has a serde default, so a partial JSON document is enough to
//! override a single policy.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Policies and display settings for a [`crate::Bank`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LendingConfig {
    /// Symbol printed in front of amounts in log messages
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Reject repayments of zero or less with `InvalidAmount`
    #[serde(default = "default_reject_non_positive_repayments")]
    pub reject_non_positive_repayments: bool,

    /// Accept loans issued at a negative interest rate
    #[serde(default = "default_allow_negative_interest")]
    pub allow_negative_interest: bool,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_reject_non_positive_repayments() -> bool {
    true
}

fn default_allow_negative_interest() -> bool {
    true
}

impl Default for LendingConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            reject_non_positive_repayments: default_reject_non_positive_repayments(),
            allow_negative_interest: default_allow_negative_interest(),
        }
    }
}

impl LendingConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Parse configuration from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self, std::io::Error> {
        serde_json::from_str(content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
