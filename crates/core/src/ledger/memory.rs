//! In-memory account repository.
//!
//! Intended for tests/dev. Each wallet lives in its own `DashMap` entry; the
//! entry's write guard is held for the whole credit, so the currency check and
//! the balance write cannot interleave with another credit on that wallet.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use invoicer_shared::{CreditAmount, CurrencyCode, WalletId};

use super::repository::{AccountRepository, RepositoryError};
use super::types::{Account, CreditOutcome, NewAccount};

/// In-memory `AccountRepository`.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: DashMap<WalletId, Account>,
    unavailable: AtomicBool,
}

impl InMemoryAccountRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with `Unavailable` (or recover).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if no account has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn check_available(&self) -> Result<(), RepositoryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable(
                "in-memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn insert_account(&self, account: NewAccount) -> Result<Account, RepositoryError> {
        self.check_available()?;

        match self.accounts.entry(account.wallet_id) {
            Entry::Occupied(_) => Err(RepositoryError::DuplicateWallet(account.wallet_id)),
            Entry::Vacant(slot) => {
                let account = account.into_account();
                slot.insert(account.clone());
                Ok(account)
            }
        }
    }

    async fn find_account(&self, wallet_id: WalletId) -> Result<Option<Account>, RepositoryError> {
        self.check_available()?;

        Ok(self.accounts.get(&wallet_id).map(|a| a.value().clone()))
    }

    async fn credit_account(
        &self,
        wallet_id: WalletId,
        currency: &CurrencyCode,
        amount: CreditAmount,
    ) -> Result<CreditOutcome, RepositoryError> {
        self.check_available()?;

        let Some(mut account) = self.accounts.get_mut(&wallet_id) else {
            return Ok(CreditOutcome::NotFound);
        };

        if account.currency != *currency {
            return Ok(CreditOutcome::CurrencyMismatch {
                actual: account.currency.clone(),
            });
        }

        let Some(balance) = amount.credit_to(account.balance) else {
            return Ok(CreditOutcome::LimitExceeded {
                balance: account.balance,
            });
        };

        if !amount.is_zero() {
            account.balance = balance;
            account.updated_at = Utc::now();
        }

        Ok(CreditOutcome::Applied {
            balance: account.balance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invoicer_shared::MAX_BALANCE;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn usd() -> CurrencyCode {
        CurrencyCode::parse("USD").unwrap()
    }

    fn amount(d: Decimal) -> CreditAmount {
        CreditAmount::new(d).unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = InMemoryAccountRepository::new();
        let id = WalletId::new();

        let account = repo.insert_account(NewAccount::open(id, usd())).await.unwrap();
        assert_eq!(account.balance, Decimal::ZERO);
        assert_eq!(repo.len(), 1);

        let found = repo.find_account(id).await.unwrap().unwrap();
        assert_eq!(found, account);
        assert!(repo.find_account(WalletId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_duplicate_does_not_overwrite() {
        let repo = InMemoryAccountRepository::new();
        let id = WalletId::new();
        repo.insert_account(NewAccount::open(id, usd())).await.unwrap();
        repo.credit_account(id, &usd(), amount(dec!(5))).await.unwrap();

        let eur = CurrencyCode::parse("EUR").unwrap();
        let err = repo.insert_account(NewAccount::open(id, eur)).await.unwrap_err();
        assert_eq!(err, RepositoryError::DuplicateWallet(id));

        let found = repo.find_account(id).await.unwrap().unwrap();
        assert_eq!(found.currency, usd());
        assert_eq!(found.balance, dec!(5));
    }

    #[tokio::test]
    async fn test_credit_outcomes() {
        let repo = InMemoryAccountRepository::new();
        let id = WalletId::new();
        repo.insert_account(NewAccount::open(id, usd())).await.unwrap();

        assert_eq!(
            repo.credit_account(id, &usd(), amount(dec!(12.5))).await.unwrap(),
            CreditOutcome::Applied { balance: dec!(12.5) }
        );
        assert_eq!(
            repo.credit_account(id, &CurrencyCode::parse("EUR").unwrap(), amount(dec!(1)))
                .await
                .unwrap(),
            CreditOutcome::CurrencyMismatch { actual: usd() }
        );
        assert_eq!(
            repo.credit_account(WalletId::new(), &usd(), amount(dec!(1))).await.unwrap(),
            CreditOutcome::NotFound
        );
        assert_eq!(
            repo.find_account(id).await.unwrap().unwrap().balance,
            dec!(12.5)
        );
    }

    #[tokio::test]
    async fn test_credit_past_max_balance_is_refused() {
        let repo = InMemoryAccountRepository::new();
        let id = WalletId::new();
        repo.insert_account(NewAccount::open(id, usd())).await.unwrap();

        assert_eq!(
            repo.credit_account(id, &usd(), amount(MAX_BALANCE)).await.unwrap(),
            CreditOutcome::Applied { balance: MAX_BALANCE }
        );
        assert_eq!(
            repo.credit_account(id, &usd(), amount(MAX_BALANCE)).await.unwrap(),
            CreditOutcome::LimitExceeded { balance: MAX_BALANCE }
        );
        assert_eq!(
            repo.credit_account(id, &usd(), amount(dec!(0.0001))).await.unwrap(),
            CreditOutcome::LimitExceeded { balance: MAX_BALANCE }
        );
        assert_eq!(
            repo.credit_account(id, &usd(), CreditAmount::ZERO).await.unwrap(),
            CreditOutcome::Applied { balance: MAX_BALANCE }
        );
        assert_eq!(
            repo.find_account(id).await.unwrap().unwrap().balance,
            MAX_BALANCE
        );
    }

    #[tokio::test]
    async fn test_unavailable_switch() {
        let repo = InMemoryAccountRepository::new();
        repo.set_unavailable(true);

        let err = repo
            .insert_account(NewAccount::open(WalletId::new(), usd()))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Unavailable(_)));
        assert!(repo.is_empty());

        repo.set_unavailable(false);
        assert!(repo.find_account(WalletId::new()).await.is_ok());
    }
}
