//! Form state machines with field-level validation.
//!
//! Every form follows the same lifecycle: `Empty -> Editing -> {Invalid,
//! Valid} -> Submitted`. Rules are re-evaluated on each change to their
//! field; submission re-evaluates everything and surfaces all failing
//! messages at once, never just the first. Validation failures are local
//! and recoverable and never reach the network layer.

pub mod equipment;
pub mod expense;
pub mod rental;

pub use equipment::EquipmentForm;
pub use expense::ExpenseForm;
pub use rental::{instance_options, parse_instance_key, InstanceOption, RentalForm};

/// Lifecycle of one open form instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// Freshly opened, nothing touched yet.
    Empty,
    /// Seeded from an existing record, not yet re-evaluated.
    Editing,
    Invalid,
    Valid,
    Submitted,
}
