//! Core services: the failover-aware API client, the query cache, and the
//! observable session state.

pub mod api_client;
pub mod cache;
pub mod metrics;
pub mod session;

pub use api_client::*;
pub use cache::*;
pub use metrics::*;
pub use session::*;
