//! Request-keyed query cache with in-flight deduplication.
//!
//! Reads are addressed by a composite key (resource name plus parameters).
//! A read whose key is already in flight joins the pending fetch instead of
//! issuing a duplicate call; successful results stay cached until a write to
//! the same resource invalidates them. Errors are shared with waiters but
//! never cached.
//!
//! There is no transactional isolation: a fetch that was already running
//! when its key got invalidated still completes and its waiters still get
//! the result, but that result is not written back into the cache.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;
use tokio::sync::{broadcast, Mutex};
use tracing::debug;

use crate::error::{ApiError, NetworkErrorKind};

/// Composite cache key: resource name plus parameter segments, mirroring
/// the `["analytics", "financial-summary", year, month]` addressing of the
/// read layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn resource(name: impl Into<String>) -> Self {
        QueryKey(vec![name.into()])
    }

    pub fn with(mut self, part: impl ToString) -> Self {
        self.0.push(part.to_string());
        self
    }

    /// The resource segment that invalidation matches on.
    pub fn resource_name(&self) -> &str {
        self.0.first().map(String::as_str).unwrap_or("")
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(":"))
    }
}

type FetchResult = Result<Value, ApiError>;

enum Slot {
    Ready(Value),
    /// A fetch is in flight; waiters subscribe to the channel. The
    /// generation distinguishes this fetch from any later one started for
    /// the same key after an invalidation.
    Pending(u64, broadcast::Sender<FetchResult>),
}

enum Claim {
    Hit(Value),
    Join(broadcast::Receiver<FetchResult>),
    Run(u64, broadcast::Sender<FetchResult>),
}

/// Process-wide read cache, safe to share behind `Arc`.
#[derive(Default)]
pub struct QueryCache {
    slots: Mutex<HashMap<QueryKey, Slot>>,
    generation: AtomicU64,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, or run `fetch` to populate it.
    /// Concurrent callers for the same key share one fetch.
    pub async fn fetch_with<F, Fut>(&self, key: QueryKey, fetch: F) -> FetchResult
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = FetchResult>,
    {
        let claim = {
            let mut slots = self.slots.lock().await;
            match slots.entry(key.clone()) {
                Entry::Occupied(entry) => match entry.get() {
                    Slot::Ready(value) => Claim::Hit(value.clone()),
                    Slot::Pending(_, tx) => Claim::Join(tx.subscribe()),
                },
                Entry::Vacant(entry) => {
                    let generation = self.generation.fetch_add(1, Ordering::Relaxed);
                    let (tx, _) = broadcast::channel(1);
                    entry.insert(Slot::Pending(generation, tx.clone()));
                    Claim::Run(generation, tx)
                }
            }
        };

        match claim {
            Claim::Hit(value) => Ok(value),
            Claim::Join(mut rx) => match rx.recv().await {
                Ok(result) => result,
                // The running fetch was dropped before sending; surface it
                // as a transport-level failure so callers can retry.
                Err(_) => Err(ApiError::Network {
                    kind: NetworkErrorKind::Other,
                    message: "shared fetch was dropped before completing".to_string(),
                }),
            },
            Claim::Run(generation, tx) => {
                let result = fetch().await;

                let mut slots = self.slots.lock().await;
                match &result {
                    Ok(value) => {
                        // Only cache if our pending slot is still current; an
                        // invalidation (or a newer fetch) may have replaced it.
                        if matches!(slots.get(&key), Some(Slot::Pending(g, _)) if *g == generation)
                        {
                            slots.insert(key.clone(), Slot::Ready(value.clone()));
                        } else {
                            debug!(key = %key, "fetch result discarded after invalidation");
                        }
                    }
                    Err(_) => {
                        if matches!(slots.get(&key), Some(Slot::Pending(g, _)) if *g == generation)
                        {
                            slots.remove(&key);
                        }
                    }
                }
                drop(slots);

                let _ = tx.send(result.clone());
                result
            }
        }
    }

    /// Peek without fetching. Mostly useful in tests.
    pub async fn get(&self, key: &QueryKey) -> Option<Value> {
        let slots = self.slots.lock().await;
        match slots.get(key) {
            Some(Slot::Ready(value)) => Some(value.clone()),
            _ => None,
        }
    }

    /// Drop every key belonging to `resource`. Pending fetches for those
    /// keys still complete for their waiters but are not cached.
    pub async fn invalidate(&self, resource: &str) {
        let mut slots = self.slots.lock().await;
        let before = slots.len();
        slots.retain(|key, _| key.resource_name() != resource);
        let dropped = before - slots.len();
        if dropped > 0 {
            debug!(resource, dropped, "cache invalidated");
        }
    }

    /// Full teardown, used on login (fresh-start reload) and logout.
    pub async fn clear(&self) {
        self.slots.lock().await.clear();
    }
}
