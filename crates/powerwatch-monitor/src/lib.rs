//! Outage notification engine: debounce controller, notifier, state store,
//! and the single polling cycle that ties them together.

pub mod cycle;
pub mod debounce;
pub mod error;
pub mod messages;
pub mod notifier;
pub mod store;

#[cfg(test)]
mod fake;

pub use cycle::{CycleOutcome, Inspection, Monitor};
pub use debounce::{transition, Decision, Phase, RecheckDelay};
pub use error::{CycleError, NotifyError, StoreError};
pub use notifier::{Delivery, DeliveryAction, Notifier, PublishPolicy};
pub use store::StateStore;
