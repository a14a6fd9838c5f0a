//! Shared types and configuration for Invoicer.
//!
//! This crate provides common types used across all other crates:
//! - Typed wallet identifiers
//! - ISO 4217 currency codes and credit amounts bounded by the balance column
//! - Configuration management

pub mod config;
pub mod types;

pub use config::{AppConfig, Environment};
pub use types::{
    BALANCE_SCALE, CreditAmount, CurrencyCode, InvalidAmount, InvalidCurrencyCode, MAX_BALANCE,
    WalletId, is_iso4217,
};
