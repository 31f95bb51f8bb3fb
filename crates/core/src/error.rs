//! Loan arithmetic errors

use rust_decimal::Decimal;
use thiserror::Error;

/// Amounts whose arithmetic does not fit in a `Decimal`.
///
/// The record is left unchanged whenever one of these is returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanError {
    #[error("Debt out of range: principal {principal} at rate {interest_rate}")]
    DebtOutOfRange {
        principal: Decimal,
        interest_rate: Decimal,
    },

    #[error("Repayment out of range: {0}")]
    RepaymentOutOfRange(Decimal),
}
