//! Data models
//!
//! Shared between the checkout engine and clients. Monetary amounts are
//! `i64` whole rupiah (the currency has no minor unit in practice);
//! timestamps are Unix milliseconds.

pub mod employee;
pub mod product;
pub mod transaction;

// Re-exports
pub use employee::*;
pub use product::*;
pub use transaction::*;
