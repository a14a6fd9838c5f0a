//! Crediting funds into wallets.

use std::sync::Arc;

use invoicer_shared::{CreditAmount, CurrencyCode, WalletId};
use tracing::{debug, error, info, warn};

use super::error::LedgerError;
use super::repository::AccountRepository;
use super::types::CreditOutcome;

/// Applies credits while holding the wallet's currency invariant.
pub struct LedgerTransactor<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: ?Sized> Clone for LedgerTransactor<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R: AccountRepository + ?Sized> LedgerTransactor<R> {
    /// Creates a transactor over `repo`.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Credits `amount` into `wallet_id` if the wallet holds `currency`.
    ///
    /// A zero amount verifies the wallet and currency and writes nothing.
    ///
    /// # Errors
    ///
    /// - `WalletNotFound` if no such wallet exists
    /// - `CurrencyMismatch` if the wallet holds a different currency
    /// - `BalanceLimitExceeded` if the new balance would exceed `MAX_BALANCE`
    /// - `StorageUnavailable` if the lookup or write could not complete
    pub async fn credit(
        &self,
        wallet_id: WalletId,
        currency: &CurrencyCode,
        amount: CreditAmount,
    ) -> Result<(), LedgerError> {
        let outcome = if amount.is_zero() {
            // Currency is immutable, so a plain read is enough when nothing is written.
            self.repo
                .find_account(wallet_id)
                .await
                .map(|found| match found {
                    None => CreditOutcome::NotFound,
                    Some(account) if account.currency != *currency => {
                        CreditOutcome::CurrencyMismatch {
                            actual: account.currency,
                        }
                    }
                    Some(account) => CreditOutcome::Applied {
                        balance: account.balance,
                    },
                })
        } else {
            self.repo
                .credit_account(wallet_id, currency, amount)
                .await
        }
        .map_err(|e| {
            error!(wallet_id = %wallet_id, error = %e, "Credit failed in storage");
            LedgerError::from(e)
        })?;

        match outcome {
            CreditOutcome::Applied { balance } => {
                info!(
                    wallet_id = %wallet_id,
                    currency = %currency,
                    amount = %amount,
                    balance = %balance,
                    "Wallet credited"
                );
                Ok(())
            }
            CreditOutcome::NotFound => {
                debug!(wallet_id = %wallet_id, "Credit to unknown wallet");
                Err(LedgerError::WalletNotFound(wallet_id))
            }
            CreditOutcome::CurrencyMismatch { actual } => {
                warn!(
                    wallet_id = %wallet_id,
                    wallet_currency = %actual,
                    request_currency = %currency,
                    "Credit currency mismatch"
                );
                Err(LedgerError::CurrencyMismatch {
                    wallet_id,
                    expected: actual,
                    actual: currency.clone(),
                })
            }
            CreditOutcome::LimitExceeded { balance } => {
                warn!(
                    wallet_id = %wallet_id,
                    amount = %amount,
                    balance = %balance,
                    "Credit would exceed the balance limit"
                );
                Err(LedgerError::BalanceLimitExceeded(wallet_id))
            }
        }
    }
}
