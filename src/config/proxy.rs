//! Configuration for the reverse proxy server.

use std::env;

/// Configuration for the reverse proxy binary.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Address the proxy listens on.
    pub bind_addr: String,

    /// Mount prefix stripped from incoming paths before forwarding.
    pub mount_prefix: String,

    /// Upstream base URL the stripped path is appended to.
    pub upstream: String,

    /// Timeout for the upstream leg (seconds).
    pub timeout_seconds: u64,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            mount_prefix: "/api".to_string(),
            upstream: "http://127.0.0.1:3001/api".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl ProxyConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let bind_addr = env::var("PROKAT_PROXY_BIND")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string());

        let mount_prefix =
            env::var("PROKAT_PROXY_PREFIX").unwrap_or_else(|_| "/api".to_string());

        let upstream = env::var("PROKAT_PROXY_UPSTREAM")
            .unwrap_or_else(|_| "http://127.0.0.1:3001/api".to_string());

        let timeout_seconds = env::var("PROKAT_PROXY_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        Self {
            bind_addr,
            mount_prefix,
            upstream,
            timeout_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_config_defaults() {
        let config = ProxyConfig::default();
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.mount_prefix, "/api");
        assert_eq!(config.timeout_seconds, 30);
    }
}
