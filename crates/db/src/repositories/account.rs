//! Account repository backed by Postgres.
//!
//! Credits run inside one database transaction that locks the wallet row
//! with `SELECT ... FOR UPDATE`, compares the currency and the balance
//! limit, then adds to the balance in place. The row lock is held from the check to the commit, so
//! concurrent credits on the same wallet serialize and none is lost.

use async_trait::async_trait;
use chrono::Utc;
use invoicer_core::ledger::{
    Account, AccountRepository, CreditOutcome, NewAccount, RepositoryError,
};
use invoicer_shared::{CreditAmount, CurrencyCode, WalletId};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QuerySelect, Set, SqlErr, TransactionTrait, sea_query::Expr,
};
use tracing::{debug, error};

use crate::entities::accounts;

/// Postgres implementation of `AccountRepository`.
#[derive(Debug, Clone)]
pub struct PgAccountRepository {
    db: DatabaseConnection,
}

impl PgAccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn unavailable(err: DbErr) -> RepositoryError {
    error!(error = %err, "Account storage error");
    RepositoryError::Unavailable(err.to_string())
}

fn parse_currency(wallet_id: WalletId, raw: String) -> Result<CurrencyCode, RepositoryError> {
    CurrencyCode::parse(raw).map_err(|e| {
        error!(wallet_id = %wallet_id, error = %e, "Stored currency is not ISO 4217");
        RepositoryError::Unavailable(format!("wallet {wallet_id} has corrupt currency: {e}"))
    })
}

fn to_account(model: accounts::Model) -> Result<Account, RepositoryError> {
    let wallet_id = WalletId::from_uuid(model.wallet_id);
    Ok(Account {
        wallet_id,
        currency: parse_currency(wallet_id, model.currency)?,
        balance: model.balance,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn insert_account(&self, account: NewAccount) -> Result<Account, RepositoryError> {
        let now = account.created_at.into();
        let model = accounts::ActiveModel {
            wallet_id: Set(account.wallet_id.into_inner()),
            currency: Set(account.currency.to_string()),
            balance: Set(Decimal::ZERO),
            created_at: Set(now),
            updated_at: Set(now),
        };

        match model.insert(&self.db).await {
            Ok(model) => to_account(model),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(RepositoryError::DuplicateWallet(account.wallet_id))
            }
            Err(e) => Err(unavailable(e)),
        }
    }

    async fn find_account(&self, wallet_id: WalletId) -> Result<Option<Account>, RepositoryError> {
        accounts::Entity::find_by_id(wallet_id.into_inner())
            .one(&self.db)
            .await
            .map_err(unavailable)?
            .map(to_account)
            .transpose()
    }

    async fn credit_account(
        &self,
        wallet_id: WalletId,
        currency: &CurrencyCode,
        amount: CreditAmount,
    ) -> Result<CreditOutcome, RepositoryError> {
        let txn = self.db.begin().await.map_err(unavailable)?;

        let locked = accounts::Entity::find_by_id(wallet_id.into_inner())
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(unavailable)?;

        let Some(row) = locked else {
            txn.rollback().await.map_err(unavailable)?;
            return Ok(CreditOutcome::NotFound);
        };

        if row.currency != currency.as_str() {
            txn.rollback().await.map_err(unavailable)?;
            return Ok(CreditOutcome::CurrencyMismatch {
                actual: parse_currency(wallet_id, row.currency)?,
            });
        }

        if amount.credit_to(row.balance).is_none() {
            txn.rollback().await.map_err(unavailable)?;
            return Ok(CreditOutcome::LimitExceeded {
                balance: row.balance,
            });
        }

        if amount.is_zero() {
            txn.rollback().await.map_err(unavailable)?;
            return Ok(CreditOutcome::Applied {
                balance: row.balance,
            });
        }

        let updated = accounts::Entity::update_many()
            .col_expr(
                accounts::Column::Balance,
                Expr::col(accounts::Column::Balance).add(amount.value()),
            )
            .col_expr(accounts::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(accounts::Column::WalletId.eq(wallet_id.into_inner()))
            .filter(accounts::Column::Currency.eq(currency.as_str()))
            .exec_with_returning(&txn)
            .await
            .map_err(unavailable)?;

        let Some(updated) = updated.into_iter().next() else {
            // The row is locked by this transaction, so it cannot vanish here.
            txn.rollback().await.map_err(unavailable)?;
            return Err(RepositoryError::Unavailable(format!(
                "wallet {wallet_id} disappeared while locked"
            )));
        };

        txn.commit().await.map_err(unavailable)?;

        debug!(
            wallet_id = %wallet_id,
            previous_balance = %row.balance,
            balance = %updated.balance,
            "Balance updated"
        );

        Ok(CreditOutcome::Applied {
            balance: updated.balance,
        })
    }
}
