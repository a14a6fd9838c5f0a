//! Storage capability the ledger runs against.
//!
//! The ledger logic is polymorphic over `AccountRepository` so it can run
//! against Postgres in production and an in-memory fake in tests.

use async_trait::async_trait;
use invoicer_shared::{CreditAmount, CurrencyCode, WalletId};
use thiserror::Error;

use super::types::{Account, CreditOutcome, NewAccount};

/// Failures reported by a repository implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// An account with this wallet id already exists.
    #[error("Wallet {0} already exists")]
    DuplicateWallet(WalletId),

    /// The backing store could not complete the call.
    #[error("{0}")]
    Unavailable(String),
}

/// Persistence for wallet accounts.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Inserts a new account with zero balance.
    ///
    /// Must fail with `DuplicateWallet` rather than overwrite an existing row.
    async fn insert_account(&self, account: NewAccount) -> Result<Account, RepositoryError>;

    /// Looks an account up by wallet id.
    async fn find_account(&self, wallet_id: WalletId) -> Result<Option<Account>, RepositoryError>;

    /// Adds `amount` to the wallet's balance if its currency equals `currency`.
    ///
    /// The lookup, the currency comparison and the balance write form one
    /// atomic unit: no other credit on the same wallet may interleave between
    /// them. A credit that would take the balance past `MAX_BALANCE` reports
    /// `LimitExceeded` and writes nothing.
    async fn credit_account(
        &self,
        wallet_id: WalletId,
        currency: &CurrencyCode,
        amount: CreditAmount,
    ) -> Result<CreditOutcome, RepositoryError>;
}
