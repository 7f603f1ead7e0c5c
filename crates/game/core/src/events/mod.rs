//! Domain events and the bus that delivers them.
//!
//! The core never renders anything; it publishes [`GameEvent`]s and lets
//! subscribers decide how to present them.

mod bus;
mod types;

pub use bus::{EventBus, SubscriptionId};
pub use types::{EventKind, GameEvent};
