use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;

use super::{DeviceSnapshot, PunchSource, SourceError};

/// Keeps the last snapshot for a short while so a burst of report requests
/// hits the terminal once.
pub struct CachedPunchSource<S> {
    inner: S,
    cache: Option<Cache<(), Arc<DeviceSnapshot>>>,
}

impl<S: PunchSource> CachedPunchSource<S> {
    /// A zero `ttl` disables caching.
    pub fn new(inner: S, ttl: Duration) -> Self {
        let cache = (!ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(1)
                .time_to_live(ttl)
                .build()
        });
        Self { inner, cache }
    }

    #[cfg(test)]
    pub async fn invalidate(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate(&()).await;
        }
    }
}

#[async_trait]
impl<S: PunchSource> PunchSource for CachedPunchSource<S> {
    async fn fetch(&self) -> Result<Arc<DeviceSnapshot>, SourceError> {
        match &self.cache {
            Some(cache) => cache
                .try_get_with((), self.inner.fetch())
                .await
                .map_err(SourceError::Shared),
            None => self.inner.fetch().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PunchSource for CountingSource {
        async fn fetch(&self) -> Result<Arc<DeviceSnapshot>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(DeviceSnapshot::default()))
        }
    }

    #[tokio::test]
    async fn serves_repeat_fetches_from_cache() {
        let source = CachedPunchSource::new(CountingSource::default(), Duration::from_secs(60));
        source.fetch().await.unwrap();
        source.fetch().await.unwrap();
        assert_eq!(source.inner.calls.load(Ordering::SeqCst), 1);

        source.invalidate().await;
        source.fetch().await.unwrap();
        assert_eq!(source.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn zero_ttl_always_hits_the_terminal() {
        let source = CachedPunchSource::new(CountingSource::default(), Duration::ZERO);
        source.fetch().await.unwrap();
        source.fetch().await.unwrap();
        assert_eq!(source.inner.calls.load(Ordering::SeqCst), 2);
    }
}
