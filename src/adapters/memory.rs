//! Thread-safe in-memory adapters for the output ports
//!
//! This module provides DashMap-backed implementations of account storage
//! and account locking, plus a no-op unit of work.
//!
//! # Thread Safety
//!
//! All adapters are safe to share across tasks behind an `Arc`. DashMap's
//! internal sharding lets operations on different accounts proceed in
//! parallel; the lock adapter's exclusion is real (tokio mutexes), so tests
//! driving concurrent transfers exercise the same protocol a production
//! lock service would.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::ports::output::{LoadAccount, LockAccount, UnitOfWork, UpdateAccountState};
use crate::types::{Account, AccountId, Money};

/// In-memory account store
///
/// Holds one current balance per account id and serves as both the loader
/// and the updater port. The baseline date is ignored: the store keeps no
/// history, so the snapshot it reconstructs is simply the current balance.
#[derive(Debug, Default)]
pub struct InMemoryAccounts {
    /// Current balance per account id
    balances: DashMap<AccountId, Money>,
}

impl InMemoryAccounts {
    /// Create an empty account store
    pub fn new() -> Self {
        Self {
            balances: DashMap::new(),
        }
    }

    /// Set (or overwrite) the stored balance for an account
    pub fn set_balance(&self, id: AccountId, balance: Money) {
        self.balances.insert(id, balance);
    }

    /// The stored balance for an account, if the account exists
    pub fn balance_of(&self, id: AccountId) -> Option<Money> {
        self.balances.get(&id).map(|balance| *balance)
    }
}

#[async_trait]
impl LoadAccount for InMemoryAccounts {
    async fn load_account(
        &self,
        id: AccountId,
        _baseline_date: DateTime<Utc>,
    ) -> anyhow::Result<Option<Account>> {
        match self.balance_of(id) {
            Some(balance) => Ok(Some(Account::existing_of(Some(id), Some(balance))?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl UpdateAccountState for InMemoryAccounts {
    async fn update(&self, account: &Account) -> anyhow::Result<()> {
        self.balances.insert(account.id(), account.balance());
        Ok(())
    }
}

/// In-memory account lock
///
/// One tokio mutex per account id, acquired as an owned guard so the lock
/// survives between the `lock` and `release` calls of one orchestration.
/// `lock` suspends until the mutex is available; `release` drops the held
/// guard and is idempotent when no guard is held.
#[derive(Debug, Default)]
pub struct InMemoryAccountLock {
    /// Lazily created mutex per account id
    mutexes: DashMap<AccountId, Arc<Mutex<()>>>,

    /// Guards currently held on behalf of in-flight transfers
    held: DashMap<AccountId, OwnedMutexGuard<()>>,
}

impl InMemoryAccountLock {
    /// Create a lock adapter with no locks held
    pub fn new() -> Self {
        Self {
            mutexes: DashMap::new(),
            held: DashMap::new(),
        }
    }

    /// Whether the lock for the given id is currently held
    pub fn is_locked(&self, id: AccountId) -> bool {
        self.held.contains_key(&id)
    }
}

#[async_trait]
impl LockAccount for InMemoryAccountLock {
    async fn lock(&self, id: AccountId) -> anyhow::Result<()> {
        // Clone the Arc out before awaiting so no DashMap shard guard is
        // held across the suspension point.
        let mutex = self
            .mutexes
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let guard = mutex.lock_owned().await;
        self.held.insert(id, guard);
        Ok(())
    }

    async fn release(&self, id: AccountId) -> anyhow::Result<()> {
        // Dropping the guard unlocks the mutex; absent guard means the lock
        // was already released.
        self.held.remove(&id);
        Ok(())
    }
}

/// Unit of work with nothing to flush
///
/// The in-memory adapters apply every operation immediately, so commit is a
/// no-op.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopUnitOfWork;

#[async_trait]
impl UnitOfWork for NoopUnitOfWork {
    async fn commit(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
