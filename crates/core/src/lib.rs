//! Core business logic for Invoicer.
//!
//! This crate contains the wallet ledger with ZERO web or database dependencies.
//! Storage is reached only through the `AccountRepository` trait.
//!
//! # Modules
//!
//! - `ledger` - Wallet creation and currency-checked crediting

pub mod ledger;
