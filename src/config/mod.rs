//! Configuration structures and loading utilities.
//!
//! This module contains all configuration structures used by the application,
//! including environment variable loading and default values.

pub mod api_client;
pub mod proxy;

pub use api_client::*;
pub use proxy::*;
