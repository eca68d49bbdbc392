//! Account aggregate for the transfer engine
//!
//! This module defines the `AccountId` identifier and the `Account`
//! aggregate. An account couples an immutable identity with a balance that
//! is only ever mutated through `withdraw` and `deposit`, so every balance
//! change passes the aggregate's own rules.

use std::fmt;
use std::future::Future;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::error::TransferError;
use super::money::Money;

/// Account identifier
///
/// Opaque wrapper around an integer id, value-equal and totally ordered.
/// The ordering is what the orchestrator keys its canonical lock order on,
/// and the hash is what lock bookkeeping maps are keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(i64);

impl AccountId {
    /// Wrap a raw id value
    pub fn new(value: i64) -> Self {
        AccountId(value)
    }

    /// The raw id value
    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<AccountId> for i64 {
    fn from(id: AccountId) -> i64 {
        id.0
    }
}

/// Account aggregate: an identity plus a current balance
///
/// Two accounts are equal iff their ids are equal; the balance is state,
/// not identity. Instances are reconstructed by the loader port from a
/// balance snapshot, mutated in-memory during exactly one orchestration,
/// handed to the updater port, and then discarded. Instances are never
/// cached or shared across concurrent transfers, so the aggregate itself
/// carries no synchronization.
#[derive(Debug, Clone)]
pub struct Account {
    /// Identity, fixed at construction
    id: AccountId,

    /// Current balance; mutated only by `withdraw` and `deposit`
    balance: Money,
}

impl Account {
    /// Reconstruct an account from storage
    ///
    /// The loader reads id and balance as separate fields, either of which
    /// may be absent in a malformed row.
    ///
    /// # Returns
    ///
    /// * `Ok(Account)` - If both fields are present
    /// * `Err(TransferError::InvalidArgument)` - Naming the missing field
    pub fn existing_of(
        id: Option<AccountId>,
        balance: Option<Money>,
    ) -> Result<Self, TransferError> {
        let id = id.ok_or_else(|| TransferError::invalid_argument("id"))?;
        let balance = balance.ok_or_else(|| TransferError::invalid_argument("balance"))?;
        Ok(Account { id, balance })
    }

    /// The account's identity
    pub fn id(&self) -> AccountId {
        self.id
    }

    /// The current balance
    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Withdraw an amount, or fail after running the supplied compensation
    ///
    /// If the balance covers the amount, the balance is reduced and the
    /// withdrawal succeeds. Otherwise the compensation future is awaited to
    /// completion *before* the failure is returned, so the caller observing
    /// `InsufficientFunds` is guaranteed the compensation (typically lock
    /// release) has already finished. A compensation error takes precedence
    /// over the insufficient-funds failure.
    pub async fn withdraw<C, F>(
        &mut self,
        amount: Money,
        on_insufficient_funds: C,
    ) -> Result<(), TransferError>
    where
        C: FnOnce() -> F,
        F: Future<Output = Result<(), TransferError>>,
    {
        if amount > self.balance {
            on_insufficient_funds().await?;
            return Err(TransferError::insufficient_funds(self.clone()));
        }
        self.balance = self.balance - amount;
        Ok(())
    }

    /// Deposit an amount
    ///
    /// Total: the amount is non-negative by construction and addition cannot
    /// take the balance below zero, so deposits have no failure mode.
    pub fn deposit(&mut self, amount: Money) {
        self.balance = self.balance + amount;
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Account {}

impl Hash for Account {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Account {{ id: {} }}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::cell::Cell;

    fn money(units: i64, scale: u32) -> Money {
        Money::of(Decimal::new(units, scale)).unwrap()
    }

    fn account(id: i64, balance: Money) -> Account {
        Account::existing_of(Some(AccountId::new(id)), Some(balance)).unwrap()
    }

    #[test]
    fn test_existing_of_requires_id() {
        let result = Account::existing_of(None, Some(money(100, 0)));
        assert!(matches!(
            result,
            Err(TransferError::InvalidArgument { argument: "id" })
        ));
    }

    #[test]
    fn test_existing_of_requires_balance() {
        let result = Account::existing_of(Some(AccountId::new(1)), None);
        assert!(matches!(
            result,
            Err(TransferError::InvalidArgument { argument: "balance" })
        ));
    }

    #[test]
    fn test_equality_is_by_id_alone() {
        let a = account(1, money(100, 0));
        let b = account(1, money(9999, 0));
        let c = account(2, money(100, 0));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[tokio::test]
    async fn test_withdraw_reduces_balance() {
        let mut source = account(1, money(100, 0));

        source
            .withdraw(money(105, 1), || async { Ok(()) })
            .await
            .unwrap();

        assert_eq!(source.balance(), money(895, 1));
    }

    #[tokio::test]
    async fn test_withdraw_insufficient_funds_runs_compensation_first() {
        let mut source = account(1, money(100, 0));
        let compensated = Cell::new(false);

        let result = source
            .withdraw(money(1505, 1), || async {
                compensated.set(true);
                Ok(())
            })
            .await;

        assert!(compensated.get());
        match result {
            Err(TransferError::InsufficientFunds { account }) => {
                assert_eq!(account.id(), AccountId::new(1));
            }
            other => panic!("Expected InsufficientFunds, got {:?}", other),
        }
        // Balance untouched by the failed withdrawal
        assert_eq!(source.balance(), money(100, 0));
    }

    #[tokio::test]
    async fn test_withdraw_propagates_compensation_error() {
        let mut source = account(1, money(100, 0));

        let result = source
            .withdraw(money(200, 0), || async {
                Err(TransferError::Port(anyhow::anyhow!("release failed")))
            })
            .await;

        assert!(matches!(result, Err(TransferError::Port(_))));
    }

    #[tokio::test]
    async fn test_withdraw_exact_balance_succeeds() {
        let mut source = account(1, money(100, 0));

        source
            .withdraw(money(100, 0), || async { Ok(()) })
            .await
            .unwrap();

        assert_eq!(source.balance(), Money::ZERO);
    }

    #[test]
    fn test_deposit_increases_balance() {
        let mut target = account(2, money(150, 0));
        target.deposit(money(105, 1));
        assert_eq!(target.balance(), money(1605, 1));
    }

    #[test]
    fn test_deposit_on_zero_balance() {
        let mut target = account(2, Money::ZERO);
        target.deposit(money(50, 0));
        assert_eq!(target.balance(), money(50, 0));
    }
}
