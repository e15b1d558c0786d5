//! Shared types for the POS checkout stack
//!
//! Common types used by the checkout engine and by register/display
//! clients: catalog and staff models, transaction records, and the cart
//! event types published on the customer display channel.

pub mod models;
pub mod order;

// Re-exports
pub use serde::{Deserialize, Serialize};
