//! HTTP handlers for the proxy binary.

pub mod health;
pub mod openapi;
pub mod proxy;
pub mod version;

pub use health::health;
pub use openapi::{create_openapi_spec, create_proxy_app};
pub use proxy::forward;
pub use version::version;
