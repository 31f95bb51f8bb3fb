//! Lendbook Lending - customer registry
//!
//! The [`Bank`] owns every customer record keyed by name and applies the
//! lending and repayment policies on top of `lendbook_core::Customer`.
//! [`SharedBank`] serializes all operations behind one lock for callers that
//! need to share a registry across threads.

pub mod bank;
pub mod config;
pub mod error;
pub mod shared;

pub use bank::{Bank, Repayment, RepaymentKind};
pub use config::LendingConfig;
pub use error::{LendingError, LendingResult, Operation};
pub use shared::SharedBank;

pub use lendbook_core::{Customer, CustomerProfile, LoanStatus};
