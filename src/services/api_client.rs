//! API client with backend failover and bearer authentication.
//!
//! Construction is explicitly two-phase: `ApiClient::connect` probes the
//! candidate base URLs and returns a ready-to-use client, so nothing
//! downstream ever talks to an unresolved backend. At request time the
//! client attaches the session's bearer token, clears the session on an
//! authentication rejection, and — for transport-level failures only —
//! re-runs the probe cycle once and retries the original request against a
//! newly discovered live server. The retry never recurses.

use std::time::{Duration, Instant};

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::config::ApiClientConfig;
use crate::error::ApiError;
use crate::services::metrics::ApiClientMetrics;
use crate::services::session::SessionState;

/// HTTP client bound to one live backend out of an ordered candidate list.
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiClientConfig,
    base_url: RwLock<String>,
    session: Arc<SessionState>,
    metrics: Option<ApiClientMetrics>,
}

impl ApiClient {
    /// Resolve a live backend and return a ready client.
    ///
    /// If no candidate answers the probe, the first candidate is adopted
    /// anyway: subsequent calls fail visibly instead of silently.
    pub async fn connect(
        config: ApiClientConfig,
        session: Arc<SessionState>,
        metrics: Option<ApiClientMetrics>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| ApiError::transport(&e))?;

        let client = Self {
            http,
            base_url: RwLock::new(String::new()),
            config,
            session,
            metrics,
        };

        let base = match client.find_live_server().await {
            Some(live) => live,
            None => {
                let fallback = client.first_candidate()?;
                warn!(
                    base_url = %fallback,
                    "no backend candidate is live, falling back to the first"
                );
                fallback
            }
        };
        info!(base_url = %base, "api client connected");
        *client.base_url.write().await = base;

        Ok(client)
    }

    /// The base URL requests currently go to.
    pub async fn base_url(&self) -> String {
        self.base_url.read().await.clone()
    }

    /// Force a switch to a specific server, refusing if it is not live.
    pub async fn switch_to(&self, base: &str) -> Result<(), ApiError> {
        if !self.probe(base).await {
            return Err(ApiError::Network {
                kind: crate::error::NetworkErrorKind::Connect,
                message: format!("server {base} is not available"),
            });
        }
        *self.base_url.write().await = base.to_string();
        info!(base_url = %base, "switched backend server");
        Ok(())
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = self.execute(Method::GET, path, None).await?;
        Self::decode(resp).await
    }

    pub async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let resp = self.execute(Method::POST, path, Some(body)).await?;
        Self::decode(resp).await
    }

    pub async fn put_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let resp = self.execute(Method::PUT, path, Some(body)).await?;
        Self::decode(resp).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let resp = self.execute(Method::DELETE, path, None).await?;
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ApiError::Status {
                status: status.as_u16(),
                body: resp.text().await.unwrap_or_default(),
            })
        }
    }

    /// Probe candidates in priority order and return the first live one.
    pub async fn find_live_server(&self) -> Option<String> {
        for candidate in &self.config.candidates {
            if self.probe(candidate).await {
                return Some(candidate.clone());
            }
        }
        None
    }

    /// Liveness check with the short probe timeout. A timed-out or failed
    /// probe means "not live", never an application error.
    async fn probe(&self, base: &str) -> bool {
        let url = format!("{base}{}", self.config.health_path);
        let deadline = Duration::from_secs(self.config.probe_timeout_seconds);

        let live = match tokio::time::timeout(deadline, self.http.get(&url).send()).await {
            Ok(Ok(resp)) => resp.status().is_success(),
            Ok(Err(_)) | Err(_) => false,
        };

        if let Some(metrics) = &self.metrics {
            let outcome = if live { "live" } else { "dead" };
            metrics
                .failover_probes_total
                .with_label_values(&[&destination(base), outcome])
                .inc();
        }
        live
    }

    /// Issue one request, with at most one failover retry.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<reqwest::Response, ApiError> {
        let mut failover_attempted = false;

        loop {
            let base = self.base_url().await;
            let url = format!("{base}{path}");
            let started = Instant::now();

            let mut request = self.http.request(method.clone(), &url);
            if let Some(token) = self.session.token().await {
                request = request.bearer_auth(token);
            }
            if let Some(json) = &body {
                request = request.json(json);
            }

            match request.send().await {
                Ok(resp) if resp.status() == StatusCode::UNAUTHORIZED => {
                    self.record(&base, &method, "unauthorized", started.elapsed());
                    self.session.reject().await;
                    return Err(ApiError::Unauthorized);
                }
                Ok(resp) => {
                    self.record(&base, &method, "success", started.elapsed());
                    return Ok(resp);
                }
                Err(e) => {
                    let err = ApiError::transport(&e);
                    self.record(&base, &method, err.outcome(), started.elapsed());

                    if !failover_attempted && self.config.failover.is_eligible(&err) {
                        failover_attempted = true;
                        warn!(
                            base_url = %base,
                            method = %method,
                            path,
                            error = %err,
                            "backend unreachable, probing for an alternative"
                        );
                        if let Some(live) = self.find_live_server().await {
                            if live != base {
                                info!(from = %base, to = %live, "failing over");
                                *self.base_url.write().await = live;
                                continue;
                            }
                        }
                    }

                    error!(
                        base_url = %base,
                        method = %method,
                        path,
                        error = %err,
                        "request failed"
                    );
                    return Err(err);
                }
            }
        }
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: resp.text().await.unwrap_or_default(),
            });
        }
        resp.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn first_candidate(&self) -> Result<String, ApiError> {
        self.config
            .candidates
            .first()
            .cloned()
            .ok_or_else(|| ApiError::Network {
                kind: crate::error::NetworkErrorKind::Other,
                message: "no backend candidates configured".to_string(),
            })
    }

    fn record(&self, base: &str, method: &Method, outcome: &str, elapsed: Duration) {
        if let Some(metrics) = &self.metrics {
            let dest = destination(base);
            metrics
                .requests_total
                .with_label_values(&[&dest, method.as_str(), outcome])
                .inc();
            metrics
                .request_duration_seconds
                .with_label_values(&[&dest, method.as_str()])
                .observe(elapsed.as_secs_f64());
        }
    }
}

/// Extract the host from a base URL for metrics grouping.
fn destination(base: &str) -> String {
    url::Url::parse(base)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
        .unwrap_or_else(|| "invalid_url".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_extraction() {
        assert_eq!(destination("http://87.242.103.146:3001/api"), "87.242.103.146");
        assert_eq!(destination("http://localhost:3001/api"), "localhost");
        assert_eq!(destination("not a url"), "invalid_url");
    }
}
