//! Input ports: the send-money use case and its command
//!
//! `SendMoneyCommand` is the only way into the orchestrator, and it is
//! validated at construction: a command that exists is a valid command.
//! Validation is independent of the orchestrator and runs no I/O.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::{AccountId, Money, TransferError};

/// The send-money use case
///
/// Invoked with a validated command; returns success or a typed failure.
/// At-most-once execution per call; a caller that retries a failed call is
/// creating a new, independent attempt.
#[async_trait]
pub trait SendMoney: Send + Sync {
    /// Execute one money transfer
    async fn send_money(&self, command: SendMoneyCommand) -> Result<(), TransferError>;
}

/// Provider of the maximum allowed transaction amount
///
/// Optional collaborator; when configured on the service it is queried once
/// per request, before any account is loaded or locked.
#[async_trait]
pub trait SendMoneyConfiguration: Send + Sync {
    /// The largest amount a single transfer may move
    async fn maximum_allowed_transaction_amount(&self) -> anyhow::Result<Money>;
}

/// Validated transfer request: source, target, and a positive amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendMoneyCommand {
    /// Account the amount is withdrawn from
    source_account_id: AccountId,

    /// Account the amount is deposited into
    target_account_id: AccountId,

    /// Amount to move; strictly positive
    amount: Money,
}

impl SendMoneyCommand {
    /// Build a command from raw request values
    ///
    /// # Returns
    ///
    /// * `Ok(SendMoneyCommand)` - If both ids are strictly positive, the ids
    ///   differ, and the amount is strictly positive
    /// * `Err(TransferError::AccountIdNotPositive)` - For a zero or negative id
    /// * `Err(TransferError::SameAccount)` - When source and target coincide
    /// * `Err(TransferError::AmountNotPositive)` - For a zero or negative amount
    pub fn new(
        source_account_id: i64,
        target_account_id: i64,
        amount: Decimal,
    ) -> Result<Self, TransferError> {
        if source_account_id <= 0 {
            return Err(TransferError::account_id_not_positive(source_account_id));
        }
        if target_account_id <= 0 {
            return Err(TransferError::account_id_not_positive(target_account_id));
        }
        if source_account_id == target_account_id {
            return Err(TransferError::same_account(AccountId::new(source_account_id)));
        }
        if amount <= Decimal::ZERO {
            return Err(TransferError::amount_not_positive(amount));
        }

        Ok(SendMoneyCommand {
            source_account_id: AccountId::new(source_account_id),
            target_account_id: AccountId::new(target_account_id),
            amount: Money::of(amount)?,
        })
    }

    /// The source account id
    pub fn source_account_id(&self) -> AccountId {
        self.source_account_id
    }

    /// The target account id
    pub fn target_account_id(&self) -> AccountId {
        self.target_account_id
    }

    /// The amount to transfer
    pub fn amount(&self) -> Money {
        self.amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_valid_command() {
        let command = SendMoneyCommand::new(1, 2, Decimal::new(105, 1)).unwrap();
        assert_eq!(command.source_account_id(), AccountId::new(1));
        assert_eq!(command.target_account_id(), AccountId::new(2));
        assert_eq!(command.amount(), Money::of(Decimal::new(105, 1)).unwrap());
    }

    #[rstest]
    #[case::zero_source(0, 2)]
    #[case::negative_source(-1, 2)]
    #[case::zero_target(1, 0)]
    #[case::negative_target(1, -7)]
    fn test_rejects_non_positive_ids(#[case] source: i64, #[case] target: i64) {
        let result = SendMoneyCommand::new(source, target, Decimal::new(100, 0));
        assert!(matches!(
            result,
            Err(TransferError::AccountIdNotPositive { .. })
        ));
    }

    #[rstest]
    #[case::zero(Decimal::ZERO)]
    #[case::negative(Decimal::new(-105, 1))]
    fn test_rejects_non_positive_amounts(#[case] amount: Decimal) {
        let result = SendMoneyCommand::new(1, 2, amount);
        assert!(matches!(
            result,
            Err(TransferError::AmountNotPositive { amount: a }) if a == amount
        ));
    }

    #[test]
    fn test_rejects_same_source_and_target() {
        let result = SendMoneyCommand::new(3, 3, Decimal::new(100, 0));
        assert!(matches!(
            result,
            Err(TransferError::SameAccount { id }) if id == AccountId::new(3)
        ));
    }
}
