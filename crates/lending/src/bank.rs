//! Bank - registry of customers keyed by name
//!
//! Owns every [`Customer`] record and applies the lending policies:
//! - a loan needs an existing customer and a positive amount
//! - a new loan replaces the previous one, repayment history included
//! - repayments are clipped to the outstanding debt and rejected once it is settled

use crate::config::LendingConfig;
use crate::error::{LendingError, LendingResult, Operation};
use lendbook_core::{format_currency, format_rate, Customer, CustomerProfile, LoanStatus};
use rust_decimal::Decimal;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::{debug, error, info, warn};

/// How much of an attempted repayment was taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepaymentKind {
    /// Whole payment accepted
    Full,
    /// Payment exceeded the outstanding debt, only the debt was accepted
    Clipped,
    /// Debt was already settled, nothing accepted
    AlreadySettled,
}

/// Outcome of [`Bank::receive_repayment`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Repayment {
    pub attempted: Decimal,
    pub accepted: Decimal,
    pub kind: RepaymentKind,
}

impl Repayment {
    fn full(amount: Decimal) -> Self {
        Self {
            attempted: amount,
            accepted: amount,
            kind: RepaymentKind::Full,
        }
    }

    fn clipped(attempted: Decimal, accepted: Decimal) -> Self {
        Self {
            attempted,
            accepted,
            kind: RepaymentKind::Clipped,
        }
    }

    fn already_settled(attempted: Decimal) -> Self {
        Self {
            attempted,
            accepted: Decimal::ZERO,
            kind: RepaymentKind::AlreadySettled,
        }
    }

    pub fn is_clipped(&self) -> bool {
        self.kind == RepaymentKind::Clipped
    }

    pub fn is_already_settled(&self) -> bool {
        self.kind == RepaymentKind::AlreadySettled
    }
}

/// In-memory customer registry
#[derive(Debug, Default)]
pub struct Bank {
    customers: HashMap<String, Customer>,
    config: LendingConfig,
}

impl Bank {
    /// Create an empty registry with default policies
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with custom policies
    pub fn with_config(config: LendingConfig) -> Self {
        Self {
            customers: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &LendingConfig {
        &self.config
    }

    /// Register a customer profile with no loan.
    ///
    /// Fails with `DuplicateCustomer` when the name is taken; the existing
    /// record is left untouched.
    pub fn create_customer(&mut self, profile: CustomerProfile) -> LendingResult<&Customer> {
        match self.customers.entry(profile.name.clone()) {
            Entry::Occupied(slot) => {
                error!(customer = %slot.key(), "Customer already exists");
                Err(LendingError::DuplicateCustomer(slot.key().clone()))
            }
            Entry::Vacant(slot) => {
                info!(customer = %slot.key(), "Customer profile created");
                Ok(&*slot.insert(Customer::without_loan(profile)))
            }
        }
    }

    /// Register a customer with an empty profile apart from the name
    pub fn create_customer_named(&mut self, name: &str) -> LendingResult<&Customer> {
        self.create_customer(CustomerProfile::new(name))
    }

    /// Quiet existence check: a missing name is only logged at debug level
    pub fn customer_exists(&self, name: &str) -> bool {
        let exists = self.customers.contains_key(name);
        if !exists {
            debug!(customer = name, "Customer not registered");
        }
        exists
    }

    fn require_customer<'a>(
        customers: &'a mut HashMap<String, Customer>,
        name: &str,
        operation: Operation,
    ) -> LendingResult<&'a mut Customer> {
        match customers.get_mut(name) {
            Some(customer) => Ok(customer),
            None => {
                error!(customer = name, %operation, "Customer does not exist");
                Err(LendingError::not_found(name, operation))
            }
        }
    }

    /// Issue a loan, replacing whatever loan the customer had.
    ///
    /// The previous loan's repayments are discarded; profile fields are kept.
    pub fn lend(
        &mut self,
        name: &str,
        amount: Decimal,
        interest_rate: Decimal,
    ) -> LendingResult<&Customer> {
        let customer = Self::require_customer(&mut self.customers, name, Operation::IssueLoan)?;

        if amount <= Decimal::ZERO {
            error!(customer = name, %amount, "Loan amount must be positive");
            return Err(LendingError::invalid_amount(Operation::IssueLoan, amount));
        }

        if interest_rate < Decimal::ZERO && !self.config.allow_negative_interest {
            error!(customer = name, %interest_rate, "Negative interest rate rejected");
            return Err(LendingError::InvalidInterestRate(interest_rate));
        }

        customer.issue_loan(amount, interest_rate).map_err(|err| {
            error!(customer = name, %err, "Loan rejected");
            LendingError::out_of_range(Operation::IssueLoan, amount)
        })?;

        let symbol = &self.config.currency_symbol;
        info!(
            customer = name,
            amount = %format_currency(amount, symbol),
            interest = %format_rate(interest_rate),
            total_debt = %format_currency(customer.total_debt_owed(), symbol),
            "Loan granted"
        );

        Ok(&*customer)
    }

    /// Take a repayment from a customer.
    ///
    /// Returns the accepted amount: the full payment, the outstanding debt
    /// when the payment exceeds it, or zero when the debt is already settled.
    pub fn receive_repayment(&mut self, name: &str, amount: Decimal) -> LendingResult<Repayment> {
        let customer =
            Self::require_customer(&mut self.customers, name, Operation::ReceiveRepayment)?;

        if amount <= Decimal::ZERO && self.config.reject_non_positive_repayments {
            error!(customer = name, %amount, "Repayment amount must be positive");
            return Err(LendingError::invalid_amount(
                Operation::ReceiveRepayment,
                amount,
            ));
        }

        let symbol = &self.config.currency_symbol;
        let outstanding = customer.outstanding_debt();

        if outstanding <= Decimal::ZERO {
            warn!(
                customer = name,
                "Customer has already settled their outstanding debt. Payment rejected"
            );
            return Ok(Repayment::already_settled(amount));
        }

        let repayment = if amount > outstanding {
            Repayment::clipped(amount, outstanding)
        } else {
            Repayment::full(amount)
        };

        customer.record_repayment(repayment.accepted).map_err(|err| {
            error!(customer = name, %err, "Repayment rejected");
            LendingError::out_of_range(Operation::ReceiveRepayment, amount)
        })?;

        if repayment.is_clipped() {
            warn!(
                customer = name,
                attempted = %format_currency(amount, symbol),
                accepted = %format_currency(outstanding, symbol),
                "Payment exceeds outstanding debt, accepting only the amount owed"
            );
        } else {
            info!(
                customer = name,
                amount = %format_currency(amount, symbol),
                "Repayment received"
            );
        }

        Ok(repayment)
    }

    /// Total repayments and outstanding debt of a customer
    pub fn customer_status(&self, name: &str) -> LendingResult<LoanStatus> {
        match self.customers.get(name) {
            Some(customer) => Ok(customer.status()),
            None => {
                error!(customer = name, "Customer not found");
                Err(LendingError::not_found(name, Operation::Status))
            }
        }
    }

    // === Read access ===

    pub fn customer(&self, name: &str) -> Option<&Customer> {
        self.customers.get(name)
    }

    pub fn customers(&self) -> impl Iterator<Item = &Customer> {
        self.customers.values()
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bank_with_bob() -> Bank {
        let mut bank = Bank::new();
        bank.create_customer(
            CustomerProfile::new("Bob")
                .with_nationality("US")
                .with_email("bob@test.com")
                .with_national_id("112233"),
        )
        .unwrap();
        bank
    }

    #[test]
    fn test_customer_exists() {
        let bank = bank_with_bob();
        assert!(bank.customer_exists("Bob"));
        assert!(!bank.customer_exists("Noname"));
    }

    #[test]
    fn test_create_customer_successful() {
        let mut bank = bank_with_bob();
        let charlie = bank
            .create_customer(
                CustomerProfile::new("Charlie")
                    .with_nationality("UK")
                    .with_email("charlie@test.co.uk")
                    .with_national_id("C123"),
            )
            .unwrap();

        assert_eq!(charlie.nationality(), "UK");
        assert_eq!(charlie.total_debt_owed(), Decimal::ZERO);
        assert!(bank.customer_exists("Charlie"));
        assert_eq!(bank.len(), 2);
    }

    #[test]
    fn test_create_duplicate_customer() {
        let mut bank = bank_with_bob();
        let result = bank.create_customer(
            CustomerProfile::new("Bob")
                .with_nationality("AU")
                .with_email("new@bob.com"),
        );

        assert_eq!(result, Err(LendingError::DuplicateCustomer("Bob".into())));
        let bob = bank.customer("Bob").unwrap();
        assert_eq!(bob.nationality(), "US");
        assert_eq!(bob.email(), "bob@test.com");
        assert_eq!(bank.len(), 1);
    }

    #[test]
    fn test_lend_successful() {
        let mut bank = bank_with_bob();
        let bob = bank.lend("Bob", dec!(600.00), dec!(0.10)).unwrap();
        assert_eq!(bob.total_debt_owed(), dec!(660.00));

        let status = bank.customer_status("Bob").unwrap();
        assert_eq!(status.outstanding_debt, dec!(660.00));
        assert_eq!(status.total_repayments, Decimal::ZERO);
        assert_eq!(bank.customer("Bob").unwrap().nationality(), "US");
    }

    #[test]
    fn test_lend_non_existent_customer() {
        let mut bank = bank_with_bob();
        let err = bank.lend("Noname", dec!(100.00), dec!(0.10)).unwrap_err();
        assert_eq!(err, LendingError::not_found("Noname", Operation::IssueLoan));
        assert!(!bank.customer_exists("Noname"));
    }

    #[test]
    fn test_lend_zero_or_negative_amount() {
        let mut bank = bank_with_bob();
        assert!(matches!(
            bank.lend("Bob", dec!(0.00), dec!(0.10)),
            Err(LendingError::InvalidAmount { .. })
        ));
        assert!(matches!(
            bank.lend("Bob", dec!(-50.00), dec!(0.10)),
            Err(LendingError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_lend_zero_and_negative_rate_accepted_by_default() {
        let mut bank = bank_with_bob();
        let bob = bank.lend("Bob", dec!(100.00), dec!(0.0)).unwrap();
        assert_eq!(bob.total_debt_owed(), dec!(100.00));

        let bob = bank.lend("Bob", dec!(100.00), dec!(-0.10)).unwrap();
        assert_eq!(bob.total_debt_owed(), dec!(90.00));
    }

    #[test]
    fn test_lend_negative_rate_rejected_when_disallowed() {
        let config = LendingConfig {
            allow_negative_interest: false,
            ..LendingConfig::default()
        };
        let mut bank = Bank::with_config(config);
        bank.create_customer_named("Bob").unwrap();

        assert_eq!(
            bank.lend("Bob", dec!(100.00), dec!(-0.10)).unwrap_err(),
            LendingError::InvalidInterestRate(dec!(-0.10))
        );
        assert!(bank.lend("Bob", dec!(100.00), dec!(0.0)).is_ok());
    }

    #[test]
    fn test_receive_repayment_partial() {
        let mut bank = bank_with_bob();
        bank.lend("Bob", dec!(100.00), dec!(0.20)).unwrap();

        let repayment = bank.receive_repayment("Bob", dec!(50.00)).unwrap();
        assert_eq!(repayment.accepted, dec!(50.00));
        assert_eq!(repayment.kind, RepaymentKind::Full);

        let status = bank.customer_status("Bob").unwrap();
        assert_eq!(status.total_repayments, dec!(50.00));
        assert_eq!(status.outstanding_debt, dec!(70.00));
    }

    #[test]
    fn test_receive_repayment_overpayment_prevention() {
        let mut bank = bank_with_bob();
        bank.lend("Bob", dec!(100.00), dec!(0.20)).unwrap();

        let repayment = bank.receive_repayment("Bob", dec!(150.00)).unwrap();
        assert_eq!(repayment.accepted, dec!(120.00));
        assert_eq!(repayment.attempted, dec!(150.00));
        assert!(repayment.is_clipped());

        let status = bank.customer_status("Bob").unwrap();
        assert_eq!(status.outstanding_debt, dec!(0.00));
        assert_eq!(status.total_repayments, dec!(120.00));
    }

    #[test]
    fn test_repayment_on_zero_debt() {
        let mut bank = bank_with_bob();
        bank.lend("Bob", dec!(100.00), dec!(0.0)).unwrap();
        bank.receive_repayment("Bob", dec!(100.00)).unwrap();

        let repayment = bank.receive_repayment("Bob", dec!(10.00)).unwrap();
        assert_eq!(repayment.accepted, Decimal::ZERO);
        assert!(repayment.is_already_settled());

        let status = bank.customer_status("Bob").unwrap();
        assert_eq!(status.outstanding_debt, dec!(0.00));
        assert_eq!(status.total_repayments, dec!(100.00));
    }

    #[test]
    fn test_repayment_without_loan_is_already_settled() {
        let mut bank = bank_with_bob();
        let repayment = bank.receive_repayment("Bob", dec!(10.00)).unwrap();
        assert!(repayment.is_already_settled());
    }

    #[test]
    fn test_receive_repayment_non_existent_customer() {
        let mut bank = bank_with_bob();
        let err = bank.receive_repayment("Noname", dec!(10.00)).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_non_positive_repayment_rejected() {
        let mut bank = bank_with_bob();
        bank.lend("Bob", dec!(100.00), dec!(0.20)).unwrap();

        for amount in [dec!(0), dec!(-25.00)] {
            let err = bank.receive_repayment("Bob", amount).unwrap_err();
            assert_eq!(
                err,
                LendingError::invalid_amount(Operation::ReceiveRepayment, amount)
            );
        }
        assert_eq!(bank.customer("Bob").unwrap().total_repayments(), Decimal::ZERO);
    }

    #[test]
    fn test_non_positive_repayment_allowed_when_configured() {
        let config = LendingConfig {
            reject_non_positive_repayments: false,
            ..LendingConfig::default()
        };
        let mut bank = Bank::with_config(config);
        bank.create_customer_named("Bob").unwrap();
        bank.lend("Bob", dec!(100.00), dec!(0.20)).unwrap();

        let repayment = bank.receive_repayment("Bob", dec!(0)).unwrap();
        assert_eq!(repayment.accepted, Decimal::ZERO);
        assert_eq!(repayment.kind, RepaymentKind::Full);
    }

    #[test]
    fn test_lend_out_of_range_keeps_current_loan() {
        let mut bank = bank_with_bob();
        bank.lend("Bob", dec!(100.00), dec!(0.10)).unwrap();
        bank.receive_repayment("Bob", dec!(40.00)).unwrap();
        let before = bank.customer("Bob").unwrap().clone();

        let err = bank.lend("Bob", Decimal::MAX, dec!(0.10)).unwrap_err();
        assert_eq!(
            err,
            LendingError::out_of_range(Operation::IssueLoan, Decimal::MAX)
        );
        assert_eq!(bank.customer("Bob").unwrap(), &before);
        assert_eq!(bank.customer("Bob").unwrap().total_debt_owed(), dec!(110.00));
    }

    #[test]
    fn test_lend_at_huge_rate_out_of_range() {
        let mut bank = bank_with_bob();
        assert!(matches!(
            bank.lend("Bob", dec!(1), Decimal::MAX),
            Err(LendingError::AmountOutOfRange { .. })
        ));
        assert_eq!(bank.customer("Bob").unwrap().principal_amount(), Decimal::ZERO);
    }

    #[test]
    fn test_permissive_negative_repayment_out_of_range() {
        let config = LendingConfig {
            reject_non_positive_repayments: false,
            ..LendingConfig::default()
        };
        let mut bank = Bank::with_config(config);
        bank.create_customer_named("Bob").unwrap();
        bank.lend("Bob", dec!(100.00), dec!(0)).unwrap();

        let err = bank.receive_repayment("Bob", Decimal::MIN).unwrap_err();
        assert_eq!(
            err,
            LendingError::out_of_range(Operation::ReceiveRepayment, Decimal::MIN)
        );
        assert_eq!(
            bank.customer_status("Bob").unwrap().outstanding_debt,
            dec!(100.00)
        );
    }

    #[test]
    fn test_relend_resets_repayments() {
        let mut bank = bank_with_bob();
        bank.lend("Bob", dec!(100.00), dec!(0.20)).unwrap();
        bank.receive_repayment("Bob", dec!(80.00)).unwrap();

        bank.lend("Bob", dec!(50.00), dec!(0.10)).unwrap();
        let status = bank.customer_status("Bob").unwrap();
        assert_eq!(status.total_repayments, Decimal::ZERO);
        assert_eq!(status.outstanding_debt, dec!(55.00));

        let bob = bank.customer("Bob").unwrap();
        assert_eq!(bob.nationality(), "US");
        assert_eq!(bob.email(), "bob@test.com");
        assert_eq!(bob.national_id(), "112233");
    }

    #[test]
    fn test_get_customer_status_non_existent() {
        let bank = bank_with_bob();
        let err = bank.customer_status("Invisible").unwrap_err();
        assert_eq!(err, LendingError::not_found("Invisible", Operation::Status));
    }

    #[test]
    fn test_customers_iterator() {
        let mut bank = Bank::new();
        assert!(bank.is_empty());
        bank.create_customer_named("Ann").unwrap();
        bank.create_customer_named("Ben").unwrap();

        let mut names: Vec<&str> = bank.customers().map(|c| c.name()).collect();
        names.sort();
        assert_eq!(names, vec!["Ann", "Ben"]);
    }
}
