//! Domain types for wallets.

use chrono::{DateTime, Utc};
use invoicer_shared::{CurrencyCode, WalletId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A wallet account: the only persistent entity of the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// External handle and primary key.
    pub wallet_id: WalletId,
    /// Currency of record. Never changes after creation.
    pub currency: CurrencyCode,
    /// Current balance. Never negative.
    pub balance: Decimal,
    /// When the wallet was opened.
    pub created_at: DateTime<Utc>,
    /// When the balance last changed.
    pub updated_at: DateTime<Utc>,
}

/// A wallet about to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    /// Freshly generated wallet id.
    pub wallet_id: WalletId,
    /// Currency the wallet is opened in.
    pub currency: CurrencyCode,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewAccount {
    /// Opens a wallet in `currency` under `wallet_id`, stamped now.
    #[must_use]
    pub fn open(wallet_id: WalletId, currency: CurrencyCode) -> Self {
        Self {
            wallet_id,
            currency,
            created_at: Utc::now(),
        }
    }

    /// The account as it looks right after insertion: zero balance.
    #[must_use]
    pub fn into_account(self) -> Account {
        Account {
            wallet_id: self.wallet_id,
            currency: self.currency,
            balance: Decimal::ZERO,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Result of an atomic credit attempt against storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreditOutcome {
    /// The amount was added; `balance` is the post-credit value.
    Applied {
        /// Balance after the credit.
        balance: Decimal,
    },
    /// No wallet with the requested id.
    NotFound,
    /// The new balance would exceed `MAX_BALANCE`; nothing was written.
    LimitExceeded {
        /// Balance left unchanged.
        balance: Decimal,
    },
    /// The wallet exists under another currency; nothing was written.
    CurrencyMismatch {
        /// Currency of record on the wallet.
        actual: CurrencyCode,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_starts_at_zero() {
        let id = WalletId::new();
        let usd = CurrencyCode::parse("USD").unwrap();
        let account = NewAccount::open(id, usd.clone()).into_account();

        assert_eq!(account.wallet_id, id);
        assert_eq!(account.currency, usd);
        assert_eq!(account.balance, Decimal::ZERO);
        assert_eq!(account.created_at, account.updated_at);
    }
}
