//! Core business logic module
//!
//! This module contains the transfer orchestration:
//! - `service` - The send-money service, sequencing load, lock, mutate,
//!   persist, and unlock for one transfer

pub mod service;

pub use service::SendMoneyService;
