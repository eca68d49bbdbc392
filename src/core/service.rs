//! Transfer orchestration for the send-money use case
//!
//! This module provides the `SendMoneyService` struct, which composes
//! account retrieval, locking, mutation, persistence, and unlocking into one
//! transaction over a validated command.
//!
//! # Design
//!
//! The service takes its collaborators as explicit `Arc<dyn Port>`
//! constructor parameters, with no process-wide registry. Each call runs a
//! strictly sequential chain of suspending port calls; concurrency exists
//! only across calls, and all cross-request exclusion is delegated to the
//! lock port.
//!
//! # Locking
//!
//! Both account ids are locked in canonical id order (smaller id first),
//! independent of which one is the source. Two concurrent transfers between
//! the same pair of accounts in opposite directions therefore contend on the
//! same first lock instead of deadlocking on each other's.
//!
//! # Failure semantics
//!
//! Only the insufficient-funds path is compensated: the withdrawal is handed
//! a closure that releases both locks and commits the release before the
//! failure surfaces. Infrastructure errors from any port propagate unchanged
//! and uncompensated; recovering locks left behind by a crashed call is the
//! lock port's own concern.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use crate::ports::input::{SendMoney, SendMoneyCommand, SendMoneyConfiguration};
use crate::ports::output::{LoadAccount, LockAccount, UnitOfWork, UpdateAccountState};
use crate::types::{Account, AccountId, TransferError};

/// How far behind "now" the loader's balance-snapshot baseline lies, in days
pub const BASELINE_LOOKBACK_DAYS: i64 = 10;

/// The send-money orchestrator
///
/// Implements the [`SendMoney`] input port over four required output ports
/// and an optional transaction-limit configuration. The service is `Send`
/// and `Sync`; many transfers may be in flight through one instance, each
/// exclusively owning the `Account` values it loaded.
pub struct SendMoneyService {
    /// Reconstructs accounts from the system of record
    accounts: Arc<dyn LoadAccount>,

    /// Mutual exclusion keyed by account id
    locks: Arc<dyn LockAccount>,

    /// Persists mutated account snapshots
    account_state: Arc<dyn UpdateAccountState>,

    /// Durability flush point for lock and persistence operations
    unit_of_work: Arc<dyn UnitOfWork>,

    /// Optional transaction-limit provider, queried once per request
    configuration: Option<Arc<dyn SendMoneyConfiguration>>,
}

impl SendMoneyService {
    /// Create a new SendMoneyService from its four required ports
    pub fn new(
        accounts: Arc<dyn LoadAccount>,
        locks: Arc<dyn LockAccount>,
        account_state: Arc<dyn UpdateAccountState>,
        unit_of_work: Arc<dyn UnitOfWork>,
    ) -> Self {
        Self {
            accounts,
            locks,
            account_state,
            unit_of_work,
            configuration: None,
        }
    }

    /// Enable the per-transaction amount limit
    ///
    /// The configuration port is queried once per request, before any
    /// account is loaded or locked, and a request above the limit fails with
    /// `AmountOverdraw` without side effects.
    pub fn with_transaction_limit(mut self, configuration: Arc<dyn SendMoneyConfiguration>) -> Self {
        self.configuration = Some(configuration);
        self
    }

    /// The snapshot baseline handed to the loader: now minus a fixed lookback
    fn baseline_date() -> DateTime<Utc> {
        Utc::now() - Duration::days(BASELINE_LOOKBACK_DAYS)
    }

    /// Load one account or fail with `AccountNotFound`
    async fn load_account(
        &self,
        id: AccountId,
        baseline_date: DateTime<Utc>,
    ) -> Result<Account, TransferError> {
        self.accounts
            .load_account(id, baseline_date)
            .await?
            .ok_or_else(|| TransferError::account_not_found(id))
    }

    /// Release both locks in canonical order and commit the release
    ///
    /// Runs as step 6 of a successful transfer and as the compensation for a
    /// failed withdrawal.
    async fn release_locks_and_commit(
        &self,
        first: AccountId,
        second: AccountId,
    ) -> Result<(), TransferError> {
        self.locks.release(first).await?;
        self.locks.release(second).await?;
        self.unit_of_work.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl SendMoney for SendMoneyService {
    async fn send_money(&self, command: SendMoneyCommand) -> Result<(), TransferError> {
        let source_id = command.source_account_id();
        let target_id = command.target_account_id();
        let amount = command.amount();

        // Optional limit check; no side effects, precedes any locking.
        if let Some(configuration) = &self.configuration {
            let maximum = configuration.maximum_allowed_transaction_amount().await?;
            if amount > maximum {
                return Err(TransferError::amount_overdraw(amount, maximum));
            }
        }

        // Step 1: load both accounts. No locks are held yet, so a missing
        // account terminates the call without compensation.
        let baseline_date = Self::baseline_date();
        let mut source = self.load_account(source_id, baseline_date).await?;
        let mut target = self.load_account(target_id, baseline_date).await?;

        // Step 2: lock both ids in canonical order and commit the
        // acquisition before touching any balance.
        let (first, second) = lock_order(source_id, target_id);
        debug!(%source_id, %target_id, %first, %second, "acquiring account locks");
        self.locks.lock(first).await?;
        self.locks.lock(second).await?;
        self.unit_of_work.commit().await?;

        // Step 3: withdraw from the source. The compensation closure has
        // released and committed both locks before the failure is returned.
        let withdrawal = source
            .withdraw(amount, || self.release_locks_and_commit(first, second))
            .await;
        if let Err(error) = withdrawal {
            if matches!(error, TransferError::InsufficientFunds { .. }) {
                warn!(%source_id, %amount, "withdrawal rejected: insufficient funds");
            }
            return Err(error);
        }

        // Step 4: deposit to the target. Total by construction.
        target.deposit(amount);

        // Steps 5-6: persist source before target, then release and commit.
        self.account_state.update(&source).await?;
        self.account_state.update(&target).await?;
        self.release_locks_and_commit(first, second).await?;

        info!(%source_id, %target_id, %amount, "transfer completed");
        Ok(())
    }
}

/// Canonical lock order over a pair of account ids: ascending by id
///
/// Keyed by identity, never by source/target role, so every orchestration
/// that touches the same pair contends in the same order.
fn lock_order(a: AccountId, b: AccountId) -> (AccountId, AccountId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
