//! Lendbook Core - Domain types
//!
//! This crate contains the fundamental types used across Lendbook:
//! - `money`: decimal rounding and display helpers for monetary values
//! - `LoanError`: arithmetic overflow while fixing debt or adding repayments
//! - `Customer`: a customer profile together with its single simple-interest loan

pub mod customer;
pub mod error;
pub mod money;

pub use customer::{Customer, CustomerProfile, LoanStatus};
pub use error::LoanError;
pub use money::{format_currency, format_rate, round_money, MONEY_SCALE};
