//! Common types used across the application.

pub mod amount;
pub mod currency;
pub mod id;

pub use amount::{BALANCE_SCALE, CreditAmount, InvalidAmount, MAX_BALANCE};
pub use currency::{CurrencyCode, InvalidCurrencyCode, is_iso4217};
pub use id::WalletId;
