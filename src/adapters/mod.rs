//! In-memory adapter implementations of the output ports
//!
//! These adapters make the crate runnable end-to-end without an external
//! system and back the concurrency tests. They conform to the same port
//! contracts a database-backed deployment would implement.

pub mod memory;

pub use memory::{InMemoryAccountLock, InMemoryAccounts, NoopUnitOfWork};
