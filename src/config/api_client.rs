//! Configuration for the failover-aware API client.
//!
//! Provides environment-based configuration with sensible defaults. The
//! candidate list is ordered by priority; `PROKAT_API_URL` is consulted
//! before the built-in candidates.

use std::env;

use crate::error::ApiError;

/// Default backend candidates, in priority order.
const DEFAULT_CANDIDATES: [&str; 2] = [
    "http://87.242.103.146:3001/api",
    "http://localhost:3001/api",
];

/// Policy deciding which errors justify a failover probe cycle.
///
/// The default treats only transport-level failures (refused connection,
/// name resolution failure, timeout) as failover-eligible. HTTP responses,
/// including 5xx, come from a reachable server and do not trigger failover
/// unless `failover_on_server_error` is set.
#[derive(Debug, Clone, Default)]
pub struct FailoverPolicy {
    pub failover_on_server_error: bool,
}

impl FailoverPolicy {
    pub fn is_eligible(&self, err: &ApiError) -> bool {
        match err {
            ApiError::Network { .. } => true,
            ApiError::Status { status, .. } if self.failover_on_server_error => *status >= 500,
            _ => false,
        }
    }
}

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Ordered candidate base URLs, highest priority first.
    pub candidates: Vec<String>,

    /// Timeout for liveness probes (seconds). A timed-out probe means
    /// "server not live", not an application error.
    pub probe_timeout_seconds: u64,

    /// Timeout for ordinary resource calls (seconds).
    pub request_timeout_seconds: u64,

    /// Path used for liveness probes, relative to a candidate base URL.
    pub health_path: String,

    /// Failover eligibility policy.
    pub failover: FailoverPolicy,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            candidates: DEFAULT_CANDIDATES.iter().map(|s| s.to_string()).collect(),
            probe_timeout_seconds: 5,
            request_timeout_seconds: 60,
            health_path: "/health".to_string(),
            failover: FailoverPolicy::default(),
        }
    }
}

impl ApiClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut candidates: Vec<String> =
            DEFAULT_CANDIDATES.iter().map(|s| s.to_string()).collect();

        // An explicit override becomes the highest-priority candidate.
        if let Ok(primary) = env::var("PROKAT_API_URL") {
            if !primary.trim().is_empty() {
                candidates.retain(|c| c != &primary);
                candidates.insert(0, primary);
            }
        }

        let probe_timeout_seconds = env::var("PROKAT_API_PROBE_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let request_timeout_seconds = env::var("PROKAT_API_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        let failover_on_server_error = env::var("PROKAT_API_FAILOVER_ON_5XX")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(false);

        Self {
            candidates,
            probe_timeout_seconds,
            request_timeout_seconds,
            health_path: "/health".to_string(),
            failover: FailoverPolicy {
                failover_on_server_error,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkErrorKind;
    use std::sync::Mutex;

    // Mutex to synchronize tests that modify environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_api_client_config_defaults() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe {
            env::remove_var("PROKAT_API_URL");
            env::remove_var("PROKAT_API_PROBE_TIMEOUT");
            env::remove_var("PROKAT_API_REQUEST_TIMEOUT");
        }

        let config = ApiClientConfig::from_env();
        assert_eq!(config.candidates.len(), 2);
        assert_eq!(config.probe_timeout_seconds, 5);
        assert_eq!(config.request_timeout_seconds, 60);
        assert_eq!(config.health_path, "/health");
        assert!(!config.failover.failover_on_server_error);
    }

    #[test]
    fn test_api_url_override_takes_priority() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe {
            env::set_var("PROKAT_API_URL", "http://10.0.0.1:3001/api");
        }

        let config = ApiClientConfig::from_env();
        assert_eq!(config.candidates[0], "http://10.0.0.1:3001/api");
        assert_eq!(config.candidates.len(), 3);

        unsafe {
            env::remove_var("PROKAT_API_URL");
        }
    }

    #[test]
    fn test_failover_policy_defaults() {
        let policy = FailoverPolicy::default();

        assert!(policy.is_eligible(&ApiError::Network {
            kind: NetworkErrorKind::Connect,
            message: "refused".into()
        }));
        assert!(!policy.is_eligible(&ApiError::Status {
            status: 500,
            body: String::new()
        }));
        assert!(!policy.is_eligible(&ApiError::Unauthorized));
    }

    #[test]
    fn test_failover_policy_server_error_opt_in() {
        let policy = FailoverPolicy {
            failover_on_server_error: true,
        };

        assert!(policy.is_eligible(&ApiError::Status {
            status: 502,
            body: String::new()
        }));
        assert!(!policy.is_eligible(&ApiError::Status {
            status: 404,
            body: String::new()
        }));
    }
}
