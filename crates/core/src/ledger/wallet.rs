//! Wallet creation.

use std::sync::Arc;

use invoicer_shared::{CurrencyCode, WalletId};
use tracing::{debug, error, info, warn};

use super::error::LedgerError;
use super::policy::CurrencyPolicy;
use super::repository::{AccountRepository, RepositoryError};
use super::types::{Account, NewAccount};

/// Mints new wallets and reads them back.
pub struct WalletStore<R: ?Sized> {
    repo: Arc<R>,
    policy: CurrencyPolicy,
}

impl<R: ?Sized> Clone for WalletStore<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            policy: self.policy.clone(),
        }
    }
}

impl<R: AccountRepository + ?Sized> WalletStore<R> {
    /// Creates a store that accepts every currency.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self::with_policy(repo, CurrencyPolicy::AcceptAll)
    }

    /// Creates a store with an explicit currency policy.
    #[must_use]
    pub fn with_policy(repo: Arc<R>, policy: CurrencyPolicy) -> Self {
        Self { repo, policy }
    }

    /// Opens a new wallet in `currency` with a zero balance.
    ///
    /// # Errors
    ///
    /// - `CurrencyNotSupported` if the policy rejects the currency
    /// - `WalletIdCollision` if the generated id already exists
    /// - `StorageUnavailable` if the write could not complete
    pub async fn create_wallet(&self, currency: CurrencyCode) -> Result<WalletId, LedgerError> {
        if !self.policy.permits(&currency) {
            warn!(currency = %currency, "Currency not supported");
            return Err(LedgerError::CurrencyNotSupported(currency));
        }

        let wallet_id = WalletId::new();
        match self.repo.insert_account(NewAccount::open(wallet_id, currency)).await {
            Ok(account) => {
                info!(
                    wallet_id = %account.wallet_id,
                    currency = %account.currency,
                    "Wallet created"
                );
                Ok(account.wallet_id)
            }
            Err(RepositoryError::DuplicateWallet(id)) => {
                error!(wallet_id = %id, "Generated wallet id already exists");
                Err(LedgerError::WalletIdCollision(id))
            }
            Err(e) => {
                error!(error = %e, "Failed to persist wallet");
                Err(e.into())
            }
        }
    }

    /// Reads a wallet's currency and current balance.
    ///
    /// # Errors
    ///
    /// `WalletNotFound` or `StorageUnavailable`.
    pub async fn get_wallet(&self, wallet_id: WalletId) -> Result<Account, LedgerError> {
        let account = self.repo.find_account(wallet_id).await.map_err(|e| {
            error!(wallet_id = %wallet_id, error = %e, "Failed to load wallet");
            LedgerError::from(e)
        })?;

        account.ok_or_else(|| {
            debug!(wallet_id = %wallet_id, "Wallet not found");
            LedgerError::WalletNotFound(wallet_id)
        })
    }
}
