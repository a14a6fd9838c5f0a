//! Ledger error types.
//!
//! Every failure of wallet creation or crediting surfaces as a `LedgerError`.
//! None of them are retried inside the core.

use invoicer_shared::{CurrencyCode, WalletId};
use thiserror::Error;

use super::repository::RepositoryError;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// No wallet with this id exists.
    #[error("Wallet not found: {0}")]
    WalletNotFound(WalletId),

    /// The wallet is held in a different currency than the request.
    #[error("Currency mismatch for wallet {wallet_id}: wallet holds {expected}, request used {actual}")]
    CurrencyMismatch {
        /// The wallet that was targeted.
        wallet_id: WalletId,
        /// Currency of record on the wallet.
        expected: CurrencyCode,
        /// Currency carried by the request.
        actual: CurrencyCode,
    },

    /// The currency is valid ISO 4217 but not enabled for new wallets.
    #[error("Currency {0} is not supported")]
    CurrencyNotSupported(CurrencyCode),

    /// The credit would push the balance past `MAX_BALANCE`. Nothing was written.
    #[error("Balance limit exceeded for wallet {0}")]
    BalanceLimitExceeded(WalletId),

    /// A freshly generated wallet id already exists. Fatal; never retried.
    #[error("Wallet id collision on {0}")]
    WalletIdCollision(WalletId),

    /// The persistence layer could not complete the operation.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::WalletNotFound(_) => "WALLET_NOT_FOUND",
            Self::CurrencyMismatch { .. } => "CURRENCY_MISMATCH",
            Self::CurrencyNotSupported(_) => "CURRENCY_NOT_SUPPORTED",
            Self::BalanceLimitExceeded(_) => "BALANCE_LIMIT_EXCEEDED",
            Self::WalletIdCollision(_) => "WALLET_ID_COLLISION",
            Self::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
        }
    }

    /// Returns the HTTP status code for this error.
    ///
    /// The API answers 200 with an error envelope; this classifies the
    /// failure as client-caused (4xx) or server-side (5xx).
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::WalletNotFound(_) => 404,
            Self::CurrencyMismatch { .. }
            | Self::CurrencyNotSupported(_)
            | Self::BalanceLimitExceeded(_) => 422,
            Self::WalletIdCollision(_) => 500,
            Self::StorageUnavailable(_) => 503,
        }
    }

    /// Returns true if this error is retryable by the core.
    ///
    /// Always false: retry policy belongs to the caller.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        false
    }
}

impl From<RepositoryError> for LedgerError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DuplicateWallet(id) => Self::WalletIdCollision(id),
            RepositoryError::Unavailable(msg) => Self::StorageUnavailable(msg),
        }
    }
}
