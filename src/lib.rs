//! Transfer Engine Library
//! # Overview
//!
//! This library implements the money-transfer use case between two accounts:
//! validate a request, atomically move funds from a source account to a
//! target account, and persist the result, with balances kept consistent
//! under concurrent transfers.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Money, AccountId, Account, errors)
//! - [`ports`] - Abstract contracts the core is consumed and served through:
//!   - [`ports::input`] - The send-money use case, its validated command,
//!     and the optional transaction-limit configuration
//!   - [`ports::output`] - Account loading, locking, persistence, and the
//!     unit-of-work commit point
//! - [`core`] - Business logic:
//!   - [`core::service`] - The transfer orchestrator
//! - [`adapters`] - In-memory implementations of the output ports
//!
//! # Transfer Protocol
//!
//! One transfer is a strictly sequential chain over the ports: load both
//! accounts, lock both ids in canonical id order, commit, withdraw from the
//! source, deposit to the target, persist both, release the locks, commit.
//! An insufficient-funds withdrawal releases and commits both locks before
//! the failure surfaces; infrastructure errors propagate unchanged.

// Module declarations
pub mod adapters;
pub mod core;
pub mod ports;
pub mod types;

pub use crate::core::SendMoneyService;
pub use ports::{
    LoadAccount, LockAccount, SendMoney, SendMoneyCommand, SendMoneyConfiguration, UnitOfWork,
    UpdateAccountState,
};
pub use types::{Account, AccountId, Money, TransferError};
