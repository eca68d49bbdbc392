//! Types module
//!
//! Contains core data structures used throughout the transfer engine.
//! This module organizes types into logical submodules:
//! - `money`: Monetary amount value type
//! - `account`: Account identity and aggregate
//! - `error`: Error types for the transfer engine

pub mod account;
pub mod error;
pub mod money;

pub use account::{Account, AccountId};
pub use error::TransferError;
pub use money::Money;
