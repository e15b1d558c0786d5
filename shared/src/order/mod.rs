//! Cart types for the checkout session
//!
//! - Lines: one product's presence in the active order
//! - Snapshots: complete cart state at one point in time
//! - Events: broadcast envelopes published to the customer display channel

pub mod event;
pub mod line;
pub mod payment;
pub mod snapshot;

// Re-exports
pub use event::{CartEvent, CartEventKind};
pub use line::CartLine;
pub use payment::PaymentMethod;
pub use snapshot::{CartSnapshot, CheckoutState};
