//! Custom middleware for the proxy binary.

pub mod request_id;

pub use request_id::{RequestIdMiddleware, RequestIdService};
