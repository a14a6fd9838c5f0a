//! Property-based tests for wallet creation and crediting.

use std::sync::Arc;

use invoicer_shared::{CreditAmount, CurrencyCode, InvalidAmount};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::memory::InMemoryAccountRepository;
use super::transactor::LedgerTransactor;
use super::wallet::WalletStore;

/// Strategy to generate non-negative amounts with 0 to 4 decimal places.
fn credit_amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000_000i64, 0u32..=4)
        .prop_map(|(units, scale)| Decimal::new(units, scale))
}

/// Strategy to generate amounts whose fifth decimal place is non-zero.
fn over_precise_amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000i64, 1i64..10)
        .prop_map(|(units, last)| Decimal::new(units * 10 + last, 5))
}

/// Strategy to generate currency codes.
fn currency_code() -> impl Strategy<Value = CurrencyCode> {
    prop_oneof![
        Just("USD"),
        Just("EUR"),
        Just("GBP"),
        Just("JPY"),
        Just("RUB"),
    ]
    .prop_map(|c| CurrencyCode::parse(c).unwrap())
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn services() -> (
    WalletStore<InMemoryAccountRepository>,
    LedgerTransactor<InMemoryAccountRepository>,
) {
    let repo = Arc::new(InMemoryAccountRepository::new());
    (
        WalletStore::new(Arc::clone(&repo)),
        LedgerTransactor::new(repo),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A new wallet holds the requested currency and a zero balance.
    #[test]
    fn prop_created_wallet_is_empty(currency in currency_code()) {
        let (store, _) = services();
        let account = runtime().block_on(async {
            let id = store.create_wallet(currency.clone()).await.unwrap();
            store.get_wallet(id).await.unwrap()
        });

        prop_assert_eq!(account.currency, currency);
        prop_assert_eq!(account.balance, Decimal::ZERO);
    }

    /// The balance equals the sum of all matching credits.
    #[test]
    fn prop_balance_is_sum_of_credits(
        currency in currency_code(),
        amounts in prop::collection::vec(credit_amount(), 0..20),
    ) {
        let (store, ledger) = services();
        let expected: Decimal = amounts.iter().copied().sum();

        let balance = runtime().block_on(async {
            let id = store.create_wallet(currency.clone()).await.unwrap();
            for a in &amounts {
                ledger
                    .credit(id, &currency, CreditAmount::new(*a).unwrap())
                    .await
                    .unwrap();
            }
            store.get_wallet(id).await.unwrap().balance
        });

        prop_assert_eq!(balance, expected);
        prop_assert!(!balance.is_sign_negative());
    }

    /// Amounts finer than the stored precision never reach a wallet.
    #[test]
    fn prop_over_precise_amount_rejected(value in over_precise_amount()) {
        prop_assert_eq!(CreditAmount::new(value), Err(InvalidAmount::TooPrecise(value)));
    }

    /// A credit in any other currency fails and changes nothing.
    #[test]
    fn prop_mismatched_currency_never_changes_balance(
        wallet_currency in currency_code(),
        request_currency in currency_code(),
        seed in credit_amount(),
        attempt in credit_amount(),
    ) {
        prop_assume!(wallet_currency != request_currency);
        let (store, ledger) = services();

        let (result, balance) = runtime().block_on(async {
            let id = store.create_wallet(wallet_currency.clone()).await.unwrap();
            ledger
                .credit(id, &wallet_currency, CreditAmount::new(seed).unwrap())
                .await
                .unwrap();
            let result = ledger
                .credit(id, &request_currency, CreditAmount::new(attempt).unwrap())
                .await;
            (result, store.get_wallet(id).await.unwrap().balance)
        });

        let is_mismatch = matches!(result, Err(LedgerError::CurrencyMismatch { .. }));
        prop_assert!(is_mismatch);
        prop_assert_eq!(balance, seed);
    }
}
