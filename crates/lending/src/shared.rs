//! Thread-safe handle to a [`Bank`]
//!
//! `lend` reads a customer and rewrites its loan in one step, so every
//! operation runs under a single registry-wide lock.

use crate::bank::{Bank, Repayment};
use crate::error::LendingResult;
use lendbook_core::{Customer, CustomerProfile, LoanStatus};
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable, lock-protected registry
#[derive(Debug, Clone, Default)]
pub struct SharedBank {
    inner: Arc<Mutex<Bank>>,
}

impl SharedBank {
    pub fn new(bank: Bank) -> Self {
        Self {
            inner: Arc::new(Mutex::new(bank)),
        }
    }

    // Records compute new values before assigning any field, so a poisoned lock still holds a consistent registry.
    fn lock(&self) -> MutexGuard<'_, Bank> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn create_customer(&self, profile: CustomerProfile) -> LendingResult<Customer> {
        self.lock().create_customer(profile).cloned()
    }

    pub fn customer_exists(&self, name: &str) -> bool {
        self.lock().customer_exists(name)
    }

    pub fn lend(&self, name: &str, amount: Decimal, interest_rate: Decimal) -> LendingResult<Customer> {
        self.lock().lend(name, amount, interest_rate).cloned()
    }

    pub fn receive_repayment(&self, name: &str, amount: Decimal) -> LendingResult<Repayment> {
        self.lock().receive_repayment(name, amount)
    }

    pub fn customer_status(&self, name: &str) -> LendingResult<LoanStatus> {
        self.lock().customer_status(name)
    }

    pub fn customer(&self, name: &str) -> Option<Customer> {
        self.lock().customer(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Run several operations as one atomic step
    pub fn with<R>(&self, f: impl FnOnce(&mut Bank) -> R) -> R {
        f(&mut self.lock())
    }
}

impl From<Bank> for SharedBank {
    fn from(bank: Bank) -> Self {
        Self::new(bank)
    }
}
