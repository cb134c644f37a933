//! Data models for the rental administration backend.
//!
//! All entities are owned by the external backend; the structures here are
//! transient wire-format copies. Timestamps stay as ISO-8601 strings and are
//! only parsed where the client actually needs calendar arithmetic.

pub mod analytics;
pub mod api;
pub mod auth;
pub mod customer;
pub mod equipment;
pub mod expense;
pub mod rental;

pub use analytics::*;
pub use api::*;
pub use auth::*;
pub use customer::*;
pub use equipment::*;
pub use expense::*;
pub use rental::*;
