//! Query-result cache.
//!
//! Each key is an independent unit with its own lifecycle:
//!
//! - concurrent fetches of the same key share one in-flight request
//! - successful results are fresh for `stale_time`; stale results are still
//!   returned immediately while a background refresh replaces them
//! - failures are retried `retry` times before reaching the callers; the next
//!   fetch tries again
//! - entries not requested for `gc_time` are evicted
//! - above `capacity`, the least recently used idle entries are evicted;
//!   entries with a request in flight are never evicted
//!
//! Requests run on spawned tasks, so a fetch whose callers all went away
//! still completes and populates the cache.

use directory_client::{Result, TransportError};
use futures_util::future::{BoxFuture, FutureExt, Shared};
use lru::LruCache;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

/// Timing and sizing knobs for a [`QueryCache`].
#[derive(Debug, Clone)]
pub struct CacheOptions {
    /// How long a result counts as fresh
    pub stale_time: Duration,
    /// How long an unrequested entry is kept
    pub gc_time: Duration,
    /// Automatic retries after a failed request
    pub retry: u32,
    /// Pause before each retry
    pub retry_delay: Duration,
    /// Maximum number of entries; least recently used go first
    pub capacity: NonZeroUsize,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            stale_time: Duration::from_secs(5 * 60),
            gc_time: Duration::from_secs(10 * 60),
            retry: 1,
            retry_delay: Duration::from_secs(1),
            capacity: NonZeroUsize::new(256).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

/// Lifecycle state of one unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// Never requested (or evicted)
    Idle,
    /// First request in flight, nothing to show yet
    Loading,
    Success,
    Error,
}

/// Point-in-time view of one unit.
///
/// `data` and `error` keep the last result and the last failure until
/// superseded, so a failed refresh still has data to show.
#[derive(Debug, Clone)]
pub struct QuerySnapshot<V> {
    pub status: QueryStatus,
    pub data: Option<Arc<V>>,
    pub error: Option<TransportError>,
    /// A request for this unit is in flight
    pub is_fetching: bool,
    /// `data` is older than the stale time (or absent)
    pub is_stale: bool,
}

impl<V> QuerySnapshot<V> {
    fn idle() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
            is_fetching: false,
            is_stale: true,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Loading
    }
}

type SharedFetch<V> = Shared<BoxFuture<'static, Result<Arc<V>>>>;

struct Entry<V> {
    status: QueryStatus,
    data: Option<Arc<V>>,
    error: Option<TransportError>,
    updated_at: Option<Instant>,
    last_access: Instant,
    in_flight: Option<SharedFetch<V>>,
}

impl<V> Entry<V> {
    fn new(now: Instant) -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
            updated_at: None,
            last_access: now,
            in_flight: None,
        }
    }

    fn is_fresh(&self, now: Instant, stale_time: Duration) -> bool {
        self.updated_at
            .is_some_and(|at| now.saturating_duration_since(at) < stale_time)
    }
}

enum Plan<V> {
    Ready(Arc<V>),
    Wait(SharedFetch<V>),
}

struct Inner<K: Hash + Eq, V> {
    entries: Mutex<LruCache<K, Entry<V>>>,
    options: CacheOptions,
}

impl<K: Hash + Eq + Clone + Debug, V> Inner<K, V> {
    fn lock(&self) -> MutexGuard<'_, LruCache<K, Entry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn complete(&self, key: &K, result: &Result<Arc<V>>) {
        let now = Instant::now();
        let mut entries = self.lock();
        let entry = entries.get_or_insert_mut(key.clone(), || Entry::new(now));
        entry.in_flight = None;

        match result {
            Ok(data) => {
                entry.status = QueryStatus::Success;
                entry.data = Some(Arc::clone(data));
                entry.error = None;
                entry.updated_at = Some(now);
            }
            Err(error) => {
                entry.status = QueryStatus::Error;
                entry.error = Some(error.clone());
            }
        }

        self.trim(&mut entries, key);
    }

    /// Evict idle entries, least recently used first, until within capacity.
    /// `keep` and in-flight entries stay even if that leaves the map over.
    fn trim(&self, entries: &mut LruCache<K, Entry<V>>, keep: &K) {
        let capacity = self.options.capacity.get();
        while entries.len() > capacity {
            let victim = entries
                .iter()
                .rev()
                .find(|(key, entry)| entry.in_flight.is_none() && *key != keep)
                .map(|(key, _)| key.clone());
            match victim {
                Some(victim) => {
                    debug!(key = ?victim, "Evicting least recently used query");
                    entries.pop(&victim);
                }
                None => break,
            }
        }
    }

    fn collect_garbage(&self, entries: &mut LruCache<K, Entry<V>>, now: Instant) {
        let gc_time = self.options.gc_time;
        let expired: Vec<K> = entries
            .iter()
            .filter(|(_, entry)| {
                entry.in_flight.is_none()
                    && now.saturating_duration_since(entry.last_access) >= gc_time
            })
            .map(|(key, _)| key.clone())
            .collect();

        for key in expired {
            debug!(?key, "Evicting unused query");
            entries.pop(&key);
        }
    }
}

/// Keyed cache of asynchronously fetched values.
///
/// Cheap to clone; clones share the same entries.
pub struct QueryCache<K: Hash + Eq, V> {
    inner: Arc<Inner<K, V>>,
}

impl<K: Hash + Eq, V> Clone for QueryCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> QueryCache<K, V>
where
    K: Hash + Eq + Clone + Debug + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    pub fn new(options: CacheOptions) -> Self {
        Self {
            inner: Arc::new(Inner {
                entries: Mutex::new(LruCache::unbounded()),
                options,
            }),
        }
    }

    pub fn options(&self) -> &CacheOptions {
        &self.inner.options
    }

    /// Get the value for `key`, calling `fetcher` only when needed.
    ///
    /// Fresh data is returned as is. Stale data is returned as is and
    /// refreshed in the background. Without data, the caller waits for the
    /// in-flight request, starting one if there is none.
    ///
    /// Must be called inside a Tokio runtime.
    pub async fn fetch<F, Fut>(&self, key: K, fetcher: F) -> Result<Arc<V>>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V>> + Send + 'static,
    {
        match self.plan(key, fetcher) {
            Plan::Ready(data) => Ok(data),
            Plan::Wait(pending) => pending.await,
        }
    }

    fn plan<F, Fut>(&self, key: K, fetcher: F) -> Plan<V>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V>> + Send + 'static,
    {
        let now = Instant::now();
        let stale_time = self.inner.options.stale_time;
        let mut entries = self.inner.lock();
        self.inner.collect_garbage(&mut entries, now);

        let entry = entries.get_or_insert_mut(key.clone(), || Entry::new(now));
        entry.last_access = now;

        let plan = if let Some(data) = entry.data.clone() {
            if entry.is_fresh(now, stale_time) {
                debug!(?key, "Serving fresh query");
            } else if entry.in_flight.is_none() {
                debug!(?key, "Serving stale query, refreshing in background");
                entry.in_flight = Some(self.spawn_fetch(key.clone(), fetcher));
            }
            Plan::Ready(data)
        } else {
            match &entry.in_flight {
                Some(pending) => {
                    debug!(?key, "Joining in-flight query");
                    Plan::Wait(pending.clone())
                }
                None => {
                    debug!(?key, "Starting query");
                    let pending = self.spawn_fetch(key.clone(), fetcher);
                    entry.in_flight = Some(pending.clone());
                    entry.status = QueryStatus::Loading;
                    Plan::Wait(pending)
                }
            }
        };

        self.inner.trim(&mut entries, &key);
        plan
    }

    fn spawn_fetch<F, Fut>(&self, key: K, fetcher: F) -> SharedFetch<V>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V>> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move {
            let result = fetch_with_retry(&key, &fetcher, inner.options.retry, inner.options.retry_delay)
                .await
                .map(Arc::new);
            inner.complete(&key, &result);
            result
        });

        async move {
            handle.await.unwrap_or_else(|e| {
                Err(TransportError::network(format!("Request task failed: {}", e)))
            })
        }
        .boxed()
        .shared()
    }

    /// Current state of `key`, without touching its access time
    pub fn snapshot(&self, key: &K) -> QuerySnapshot<V> {
        let now = Instant::now();
        let stale_time = self.inner.options.stale_time;
        let entries = self.inner.lock();

        match entries.peek(key) {
            Some(entry) => QuerySnapshot {
                status: entry.status,
                data: entry.data.clone(),
                error: entry.error.clone(),
                is_fetching: entry.in_flight.is_some(),
                is_stale: !entry.is_fresh(now, stale_time),
            },
            None => QuerySnapshot::idle(),
        }
    }

    /// Mark `key` stale so the next fetch refreshes it; data is kept
    pub fn invalidate(&self, key: &K) {
        if let Some(entry) = self.inner.lock().peek_mut(key) {
            entry.updated_at = None;
        }
    }

    /// Evict entries unused for longer than the gc time
    pub fn collect_garbage(&self) {
        let now = Instant::now();
        let mut entries = self.inner.lock();
        self.inner.collect_garbage(&mut entries, now);
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

async fn fetch_with_retry<K, V, F, Fut>(
    key: &K,
    fetcher: &F,
    retries: u32,
    delay: Duration,
) -> Result<V>
where
    K: Debug,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<V>>,
{
    let mut attempt = 0;
    loop {
        match fetcher().await {
            Ok(value) => return Ok(value),
            Err(error) if attempt < retries => {
                attempt += 1;
                warn!(?key, attempt, error = %error, "Query failed, retrying");
                sleep(delay).await;
            }
            Err(error) => {
                warn!(?key, error = %error, "Query failed");
                return Err(error);
            }
        }
    }
}
