//! `SeaORM` entity definitions.

pub mod accounts;
