//! Port contracts for the transfer engine
//!
//! The core is consumed and collaborates through abstract ports:
//! - `input`: the send-money use case itself, its validated command, and the
//!   optional transaction-limit configuration
//! - `output`: the collaborators the orchestrator drives: account loading,
//!   locking, state persistence, and the unit-of-work commit point
//!
//! Any conforming implementation is acceptable; the in-memory adapters in
//! [`crate::adapters`] are one.

pub mod input;
pub mod output;

pub use input::{SendMoney, SendMoneyCommand, SendMoneyConfiguration};
pub use output::{LoadAccount, LockAccount, UnitOfWork, UpdateAccountState};
