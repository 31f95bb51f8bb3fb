//! Lending errors

use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;

/// Registry operation that needs an existing customer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    IssueLoan,
    ReceiveRepayment,
    Status,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::IssueLoan => "issue loan",
            Operation::ReceiveRepayment => "receive repayment",
            Operation::Status => "report status",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors returned by registry operations. None of them is fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LendingError {
    #[error("Customer '{0}' already exists")]
    DuplicateCustomer(String),

    #[error("Customer '{name}' does not exist. Cannot {operation}.")]
    CustomerNotFound { name: String, operation: Operation },

    #[error("Invalid amount for {operation}: {amount} (must be positive)")]
    InvalidAmount { operation: Operation, amount: Decimal },

    #[error("Amount out of range for {operation}: {amount}")]
    AmountOutOfRange { operation: Operation, amount: Decimal },

    #[error("Invalid interest rate: {0} (must not be negative)")]
    InvalidInterestRate(Decimal),
}

/// Result type alias for lending operations
pub type LendingResult<T> = Result<T, LendingError>;

impl LendingError {
    pub fn not_found(name: &str, operation: Operation) -> Self {
        Self::CustomerNotFound {
            name: name.to_string(),
            operation,
        }
    }

    pub fn invalid_amount(operation: Operation, amount: Decimal) -> Self {
        Self::InvalidAmount { operation, amount }
    }

    pub fn out_of_range(operation: Operation, amount: Decimal) -> Self {
        Self::AmountOutOfRange { operation, amount }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LendingError::CustomerNotFound { .. })
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, LendingError::DuplicateCustomer(_))
    }
}
