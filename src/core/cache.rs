use super::rates::{FetchError, RateProvider, RateTable};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

struct CacheEntry {
    table: Arc<RateTable>,
    /// `None` when the TTL is too large to represent; such entries never expire.
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |expiry| now < expiry)
    }
}

/// Rate tables memoized per base currency for a fixed time-to-live.
///
/// The lock is released while the provider is queried, so a slow fetch for
/// one currency never holds up lookups of another. Concurrent misses on the
/// same currency may each hit the provider.
pub struct RateCache<P: RateProvider> {
    provider: P,
    ttl: Duration,
    inner: Arc<Mutex<HashMap<String, CacheEntry>>>,
}

impl<P: RateProvider> RateCache<P> {
    pub fn new(provider: P, ttl: Duration) -> Self {
        Self {
            provider,
            ttl,
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the live table for `base`, fetching a fresh one on a miss.
    /// Failed fetches are never cached.
    pub async fn get_or_fetch(&self, base: &str) -> Result<Arc<RateTable>, FetchError> {
        if let Some(table) = self.get(base).await {
            return Ok(table);
        }

        let table = Arc::new(self.provider.fetch(base).await?);

        let mut cache = self.inner.lock().await;
        debug!("Cache PUT for base: {}", base);
        cache.insert(
            base.to_string(),
            CacheEntry {
                table: Arc::clone(&table),
                expires_at: Instant::now().checked_add(self.ttl),
            },
        );
        Ok(table)
    }

    async fn get(&self, base: &str) -> Option<Arc<RateTable>> {
        let cache = self.inner.lock().await;
        match cache.get(base) {
            Some(entry) if entry.is_live(Instant::now()) => {
                debug!("Cache HIT for base: {}", base);
                Some(Arc::clone(&entry.table))
            }
            Some(_) => {
                debug!("Cache entry expired for base: {}", base);
                None
            }
            None => {
                debug!("Cache MISS for base: {}", base);
                None
            }
        }
    }

    pub async fn invalidate(&self, base: &str) {
        let mut cache = self.inner.lock().await;
        cache.remove(base);
        debug!("Cache REMOVE for base: {}", base);
    }

    pub async fn clear(&self) {
        let mut cache = self.inner.lock().await;
        cache.clear();
        debug!("Cache CLEAR");
    }

    /// Number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::sleep;

    struct CountingProvider {
        call_count: AtomicUsize,
        fail: bool,
    }

    impl CountingProvider {
        fn new() -> Self {
            Self {
                call_count: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                call_count: AtomicUsize::new(0),
                fail: true,
            }
        }

        fn calls(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl<'a> RateProvider for &'a CountingProvider {
        async fn fetch(&self, base: &str) -> Result<RateTable, FetchError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(FetchError::MalformedResponse("missing rates".to_string()));
            }
            let rates = HashMap::from([("PKR".to_string(), 278.5)]);
            Ok(RateTable::new(base, rates, Utc::now()))
        }
    }

    #[tokio::test]
    async fn test_hit_avoids_provider() {
        let provider = CountingProvider::new();
        let cache = RateCache::new(&provider, DEFAULT_TTL);

        let first = cache.get_or_fetch("USD").await.unwrap();
        assert_eq!(provider.calls(), 1);

        let second = cache.get_or_fetch("USD").await.unwrap();
        assert_eq!(provider.calls(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_keyed_by_base_only() {
        let provider = CountingProvider::new();
        let cache = RateCache::new(&provider, DEFAULT_TTL);

        cache.get_or_fetch("USD").await.unwrap();
        cache.get_or_fetch("EUR").await.unwrap();
        assert_eq!(provider.calls(), 2);
        assert_eq!(cache.len().await, 2);

        cache.get_or_fetch("EUR").await.unwrap();
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_expiry_triggers_one_fetch() {
        let provider = CountingProvider::new();
        let cache = RateCache::new(&provider, Duration::from_millis(20));

        cache.get_or_fetch("USD").await.unwrap();
        assert_eq!(provider.calls(), 1);

        sleep(Duration::from_millis(40)).await;

        cache.get_or_fetch("USD").await.unwrap();
        assert_eq!(provider.calls(), 2);
        cache.get_or_fetch("USD").await.unwrap();
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_unbounded_ttl_never_expires() {
        let provider = CountingProvider::new();
        let cache = RateCache::new(&provider, Duration::MAX);

        cache.get_or_fetch("USD").await.unwrap();
        cache.get_or_fetch("USD").await.unwrap();
        assert_eq!(provider.calls(), 1);

        let cache = RateCache::new(&provider, Duration::from_secs(u64::MAX));
        cache.get_or_fetch("EUR").await.unwrap();
        cache.get_or_fetch("EUR").await.unwrap();
        assert_eq!(provider.calls(), 2);
    }

    struct SlowProvider {
        delay: Duration,
    }

    #[async_trait]
    impl RateProvider for SlowProvider {
        async fn fetch(&self, base: &str) -> Result<RateTable, FetchError> {
            if base == "PKR" {
                sleep(self.delay).await;
            }
            Ok(RateTable::new(base, HashMap::new(), Utc::now()))
        }
    }

    #[tokio::test]
    async fn test_slow_miss_does_not_block_other_base() {
        let cache = RateCache::new(
            SlowProvider {
                delay: Duration::from_millis(300),
            },
            DEFAULT_TTL,
        );
        cache.get_or_fetch("USD").await.unwrap();

        let slow = async {
            cache.get_or_fetch("PKR").await.unwrap();
            Instant::now()
        };
        let fast = async {
            // Let the slow fetch start first
            sleep(Duration::from_millis(20)).await;
            let table = cache.get_or_fetch("USD").await.unwrap();
            (table, Instant::now())
        };

        let started = Instant::now();
        let (slow_done, (table, fast_done)) = tokio::join!(slow, fast);

        assert_eq!(table.base(), "USD");
        assert!(fast_done < slow_done);
        assert!(fast_done.duration_since(started) < Duration::from_millis(200));
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let provider = CountingProvider::failing();
        let cache = RateCache::new(&provider, DEFAULT_TTL);

        let result = cache.get_or_fetch("USD").await;
        assert!(matches!(result, Err(FetchError::MalformedResponse(_))));
        assert!(cache.is_empty().await);

        let _ = cache.get_or_fetch("USD").await;
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_and_clear() {
        let provider = CountingProvider::new();
        let cache = RateCache::new(&provider, DEFAULT_TTL);

        cache.get_or_fetch("USD").await.unwrap();
        cache.get_or_fetch("GBP").await.unwrap();

        cache.invalidate("USD").await;
        assert_eq!(cache.len().await, 1);
        cache.get_or_fetch("USD").await.unwrap();
        assert_eq!(provider.calls(), 3);

        cache.clear().await;
        assert!(cache.is_empty().await);
    }
}
