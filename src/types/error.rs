//! Error types for the transfer engine
//!
//! This module defines all error types that can occur while validating and
//! executing a money transfer. Every variant carries enough context (an
//! account id, or the two amounts involved) to render a user-facing message.
//!
//! # Error Categories
//!
//! - **Construction Errors**: negative money amounts, accounts rebuilt from
//!   incomplete storage rows
//! - **Validation Errors**: rejected at command construction, before the
//!   orchestrator starts
//! - **Domain Errors**: expected business outcomes of one transfer attempt
//!   (missing account, insufficient funds, amount over the configured limit)
//! - **Port Errors**: infrastructure failures from the loader, locker,
//!   updater, or unit-of-work; passed through unchanged, since the core
//!   does not decide whether they are retryable
//!
//! All errors are terminal for the current request; nothing is retried
//! internally.

use rust_decimal::Decimal;
use thiserror::Error;

use super::account::{Account, AccountId};
use super::money::Money;

/// Main error type for the transfer engine
#[derive(Debug, Error)]
pub enum TransferError {
    /// A money amount was constructed with a negative value
    #[error("Money amount {amount} can't be less than zero")]
    InvalidAmount {
        /// The offending amount
        amount: Decimal,
    },

    /// An account was reconstructed from storage with a missing field
    #[error("Account {argument} is required")]
    InvalidArgument {
        /// Name of the missing field
        argument: &'static str,
    },

    /// A command named an account by a non-positive id
    #[error("Account id {id} must be greater than zero")]
    AccountIdNotPositive {
        /// The raw id from the command
        id: i64,
    },

    /// A command asked to transfer a non-positive amount
    #[error("Transfer amount {amount} must be greater than zero")]
    AmountNotPositive {
        /// The raw amount from the command
        amount: Decimal,
    },

    /// A command named the same account as source and target
    ///
    /// Rejected up front: one orchestration must never take the same lock
    /// twice.
    #[error("Source and target account {id} must differ")]
    SameAccount {
        /// The duplicated id
        id: AccountId,
    },

    /// The loader found no account for the given id
    ///
    /// Raised during the load phase, before any lock is taken, so no
    /// compensation is needed.
    #[error("Account with id {id} does not exist")]
    AccountNotFound {
        /// The id that could not be loaded
        id: AccountId,
    },

    /// The source account balance does not cover the requested amount
    ///
    /// By the time the caller observes this error, the compensation path has
    /// already released and committed both locks.
    #[error("Account {} does not have sufficient funds", account.id())]
    InsufficientFunds {
        /// The source account, with its unchanged balance
        account: Account,
    },

    /// The requested amount exceeds the configured transaction limit
    #[error("Transaction amount {requested} is higher than maximum allowed amount {maximum}")]
    AmountOverdraw {
        /// The requested transfer amount
        requested: Money,
        /// The configured maximum
        maximum: Money,
    },

    /// Infrastructure failure from one of the output ports
    ///
    /// Propagated unchanged; locks already taken may remain held, and
    /// recovery is the lock port's own concern (expiry, fencing).
    #[error(transparent)]
    Port(#[from] anyhow::Error),
}

// Helper functions for creating common errors

impl TransferError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal) -> Self {
        TransferError::InvalidAmount { amount }
    }

    /// Create an InvalidArgument error
    pub fn invalid_argument(argument: &'static str) -> Self {
        TransferError::InvalidArgument { argument }
    }

    /// Create an AccountIdNotPositive error
    pub fn account_id_not_positive(id: i64) -> Self {
        TransferError::AccountIdNotPositive { id }
    }

    /// Create an AmountNotPositive error
    pub fn amount_not_positive(amount: Decimal) -> Self {
        TransferError::AmountNotPositive { amount }
    }

    /// Create a SameAccount error
    pub fn same_account(id: AccountId) -> Self {
        TransferError::SameAccount { id }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(id: AccountId) -> Self {
        TransferError::AccountNotFound { id }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: Account) -> Self {
        TransferError::InsufficientFunds { account }
    }

    /// Create an AmountOverdraw error
    pub fn amount_overdraw(requested: Money, maximum: Money) -> Self {
        TransferError::AmountOverdraw { requested, maximum }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn money(units: i64, scale: u32) -> Money {
        Money::of(Decimal::new(units, scale)).unwrap()
    }

    fn account(id: i64, balance: Money) -> Account {
        Account::existing_of(Some(AccountId::new(id)), Some(balance)).unwrap()
    }

    #[rstest]
    #[case::invalid_amount(
        TransferError::invalid_amount(Decimal::new(-1, 2)),
        "Money amount -0.01 can't be less than zero"
    )]
    #[case::invalid_argument(
        TransferError::invalid_argument("balance"),
        "Account balance is required"
    )]
    #[case::account_id_not_positive(
        TransferError::account_id_not_positive(0),
        "Account id 0 must be greater than zero"
    )]
    #[case::amount_not_positive(
        TransferError::amount_not_positive(Decimal::ZERO),
        "Transfer amount 0 must be greater than zero"
    )]
    #[case::same_account(
        TransferError::same_account(AccountId::new(7)),
        "Source and target account 7 must differ"
    )]
    #[case::account_not_found(
        TransferError::account_not_found(AccountId::new(42)),
        "Account with id 42 does not exist"
    )]
    fn test_error_display(#[case] error: TransferError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn test_insufficient_funds_names_the_account() {
        let error = TransferError::insufficient_funds(account(1, money(100, 0)));
        assert_eq!(error.to_string(), "Account 1 does not have sufficient funds");
    }

    #[test]
    fn test_amount_overdraw_shows_both_amounts() {
        let error = TransferError::amount_overdraw(money(1505, 1), money(1000, 0));
        assert_eq!(
            error.to_string(),
            "Transaction amount 150.5 is higher than maximum allowed amount 1000"
        );
    }

    #[test]
    fn test_port_errors_pass_through_unchanged() {
        let error: TransferError = anyhow::anyhow!("connection reset").into();
        assert_eq!(error.to_string(), "connection reset");
    }
}
