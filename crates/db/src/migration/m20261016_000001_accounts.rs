//! Accounts migration.
//!
//! Creates the accounts table holding one row per wallet.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS accounts CASCADE;
             DROP FUNCTION IF EXISTS prevent_account_currency_change();",
        )
        .await?;
        Ok(())
    }
}

const ACCOUNTS_SQL: &str = r"
-- One row per wallet; wallet_id is the external handle
CREATE TABLE accounts (
    wallet_id UUID PRIMARY KEY,
    currency VARCHAR(3) NOT NULL,
    balance NUMERIC(19, 4) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_account_currency_format CHECK (currency ~ '^[A-Z]{3}$'),
    CONSTRAINT chk_account_balance_non_negative CHECK (balance >= 0)
);

-- Currency is fixed at creation
CREATE OR REPLACE FUNCTION prevent_account_currency_change()
RETURNS TRIGGER AS $$
BEGIN
    IF NEW.currency <> OLD.currency THEN
        RAISE EXCEPTION 'account currency is immutable (wallet %)', OLD.wallet_id;
    END IF;
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_accounts_currency_immutable
    BEFORE UPDATE OF currency ON accounts
    FOR EACH ROW EXECUTE FUNCTION prevent_account_currency_change();
";
