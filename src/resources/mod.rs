//! Typed resource modules: thin wrappers over the API client, one per
//! backend collection. Reads go through the cache; writes go straight to
//! the client and invalidate the affected resource keys on success.

pub mod analytics;
pub mod auth;
pub mod customers;
pub mod equipment;
pub mod expenses;
pub mod rentals;
