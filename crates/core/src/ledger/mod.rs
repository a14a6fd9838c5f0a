//! Wallet ledger logic.
//!
//! This module implements the core ledger functionality:
//! - Wallet creation with currency admission policy
//! - Atomic, currency-checked crediting
//! - The storage capability both run against, plus an in-memory fake
//! - Error types for ledger operations

pub mod error;
pub mod memory;
pub mod policy;
pub mod repository;
pub mod transactor;
pub mod types;
pub mod wallet;

#[cfg(test)]
mod service_props;

pub use error::LedgerError;
pub use memory::InMemoryAccountRepository;
pub use policy::CurrencyPolicy;
pub use repository::{AccountRepository, RepositoryError};
pub use transactor::LedgerTransactor;
pub use types::{Account, CreditOutcome, NewAccount};
pub use wallet::WalletStore;
