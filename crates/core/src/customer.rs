//! Customer - profile data and the single loan it carries
//!
//! A customer holds exactly one loan at a time. Its total debt is fixed with
//! simple interest when the loan is issued and is never recomputed afterwards.

use crate::error::LoanError;
use crate::money::round_money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Profile fields of a customer. Opaque strings, not validated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomerProfile {
    /// Unique key inside a registry
    pub name: String,
    pub nationality: String,
    pub email: String,
    pub national_id: String,
}

impl CustomerProfile {
    /// Profile with only a name, remaining fields empty
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_nationality(mut self, nationality: impl Into<String>) -> Self {
        self.nationality = nationality.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_national_id(mut self, national_id: impl Into<String>) -> Self {
        self.national_id = national_id.into();
        self
    }
}

/// Repayment progress of a loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanStatus {
    pub total_repayments: Decimal,
    pub outstanding_debt: Decimal,
}

/// A customer record with its current loan.
///
/// # Invariant
/// `total_debt_owed == round(principal_amount * (1 + interest_rate), 2)`,
/// set by [`Customer::new`] or [`Customer::issue_loan`] and never touched otherwise.
///
/// # Example
/// ```
/// use lendbook_core::{Customer, CustomerProfile};
/// use rust_decimal::Decimal;
///
/// let customer = Customer::new(
///     CustomerProfile::new("Alice"),
///     Decimal::new(200, 0),
///     Decimal::new(10, 2),
/// )
/// .unwrap();
/// assert_eq!(customer.total_debt_owed(), Decimal::new(220, 0));
/// assert_eq!(customer.outstanding_debt(), Decimal::new(220, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    profile: CustomerProfile,
    principal_amount: Decimal,
    interest_rate: Decimal,
    total_debt_owed: Decimal,
    total_repayments: Decimal,
}

impl Customer {
    /// Create a record carrying a loan of `principal_amount` at `interest_rate`.
    ///
    /// No policy checks happen here; those belong to the registry. Fails only
    /// when the debt does not fit in a `Decimal`.
    pub fn new(
        profile: CustomerProfile,
        principal_amount: Decimal,
        interest_rate: Decimal,
    ) -> Result<Self, LoanError> {
        Ok(Self {
            profile,
            principal_amount,
            interest_rate,
            total_debt_owed: Self::debt_for(principal_amount, interest_rate)?,
            total_repayments: Decimal::ZERO,
        })
    }

    /// Create a record with no loan (principal 0, rate 0)
    pub fn without_loan(profile: CustomerProfile) -> Self {
        Self {
            profile,
            principal_amount: Decimal::ZERO,
            interest_rate: Decimal::ZERO,
            total_debt_owed: Decimal::ZERO,
            total_repayments: Decimal::ZERO,
        }
    }

    fn debt_for(principal_amount: Decimal, interest_rate: Decimal) -> Result<Decimal, LoanError> {
        Decimal::ONE
            .checked_add(interest_rate)
            .and_then(|factor| principal_amount.checked_mul(factor))
            .map(round_money)
            .ok_or(LoanError::DebtOutOfRange {
                principal: principal_amount,
                interest_rate,
            })
    }

    /// Replace the current loan with a new one.
    ///
    /// Principal, rate and total debt are reset for the new loan and the
    /// repayment history of the previous loan is discarded. Profile fields stay.
    /// On error the current loan is kept as it was.
    pub fn issue_loan(
        &mut self,
        principal_amount: Decimal,
        interest_rate: Decimal,
    ) -> Result<(), LoanError> {
        let total_debt_owed = Self::debt_for(principal_amount, interest_rate)?;

        self.principal_amount = principal_amount;
        self.interest_rate = interest_rate;
        self.total_debt_owed = total_debt_owed;
        self.total_repayments = Decimal::ZERO;
        Ok(())
    }

    /// Add an accepted payment to the repayment total.
    ///
    /// Callers decide how much of an attempted payment is accepted. The total
    /// is left unchanged if it, or the debt left over, would not fit.
    pub fn record_repayment(&mut self, amount: Decimal) -> Result<(), LoanError> {
        let total_repayments = self
            .total_repayments
            .checked_add(amount)
            .filter(|total| self.total_debt_owed.checked_sub(*total).is_some())
            .ok_or(LoanError::RepaymentOutOfRange(amount))?;

        self.total_repayments = total_repayments;
        Ok(())
    }

    /// Total debt minus repayments, rounded to cents
    pub fn outstanding_debt(&self) -> Decimal {
        round_money(self.total_debt_owed - self.total_repayments)
    }

    pub fn status(&self) -> LoanStatus {
        LoanStatus {
            total_repayments: self.total_repayments,
            outstanding_debt: self.outstanding_debt(),
        }
    }

    pub fn is_settled(&self) -> bool {
        self.outstanding_debt() <= Decimal::ZERO
    }

    // === Accessors ===

    pub fn profile(&self) -> &CustomerProfile {
        &self.profile
    }

    pub fn name(&self) -> &str {
        &self.profile.name
    }

    pub fn nationality(&self) -> &str {
        &self.profile.nationality
    }

    pub fn email(&self) -> &str {
        &self.profile.email
    }

    pub fn national_id(&self) -> &str {
        &self.profile.national_id
    }

    pub fn principal_amount(&self) -> Decimal {
        self.principal_amount
    }

    pub fn interest_rate(&self) -> Decimal {
        self.interest_rate
    }

    pub fn total_debt_owed(&self) -> Decimal {
        self.total_debt_owed
    }

    pub fn total_repayments(&self) -> Decimal {
        self.total_repayments
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (repaid {}, outstanding {})",
            self.profile.name,
            self.total_repayments,
            self.outstanding_debt()
        )
    }
}
