//! Output ports: the collaborators the orchestrator drives
//!
//! These contracts are everything the core knows about the outside world.
//! Implementations may be backed by a database, a distributed lock service,
//! or the in-memory adapters in [`crate::adapters`]. Infrastructure errors
//! are reported as `anyhow::Error` and the core passes them through without
//! wrapping or judging retryability.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::types::{Account, AccountId};

/// Reconstructs accounts from the system of record
#[async_trait]
pub trait LoadAccount: Send + Sync {
    /// Load the account with the given id, or `None` if it does not exist
    ///
    /// The balance is reconstructed as a snapshot relative to
    /// `baseline_date`; how the snapshot is computed is the adapter's
    /// concern. "Not found" is `Ok(None)`, never an error.
    async fn load_account(
        &self,
        id: AccountId,
        baseline_date: DateTime<Utc>,
    ) -> anyhow::Result<Option<Account>>;
}

/// Mutual exclusion keyed by account identity
///
/// The only guard over persisted balances: the orchestrator never mutates
/// shared state without holding both relevant locks.
#[async_trait]
pub trait LockAccount: Send + Sync {
    /// Acquire the lock for an account, suspending until it is available
    async fn lock(&self, id: AccountId) -> anyhow::Result<()>;

    /// Release the lock for an account
    ///
    /// Idempotent: releasing a lock that is not held is not an error.
    async fn release(&self, id: AccountId) -> anyhow::Result<()>;
}

/// Persists account snapshots
#[async_trait]
pub trait UpdateAccountState: Send + Sync {
    /// Persist the given account state, overwriting the stored balance
    async fn update(&self, account: &Account) -> anyhow::Result<()>;
}

/// Explicit durability flush point
///
/// After `commit` returns, the lock and persistence operations issued before
/// it are considered durable.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Flush pending lock and persistence operations
    async fn commit(&self) -> anyhow::Result<()>;
}
