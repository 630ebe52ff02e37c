use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tracing::{debug, instrument, warn};

use crate::catalog::GameCatalog;
use crate::config::SessionConfig;
use crate::error::{Result, WgnError};
use crate::model::Game;

/// Wraps a catalog with bounded retries and a last-known-good copy.
///
/// When every attempt fails the previous successful result is served instead;
/// only a catalog that has never answered surfaces `SourceUnavailable`.
pub struct CachedCatalog<C> {
    inner: C,
    retries: u32,
    backoff: Duration,
    last_good: Mutex<Option<Vec<Game>>>,
}

impl<C: GameCatalog> CachedCatalog<C> {
    pub fn new(inner: C, retries: u32, backoff: Duration) -> Self {
        Self {
            inner,
            retries,
            backoff,
            last_good: Mutex::new(None),
        }
    }

    /// Use the retry policy from `config`.
    pub fn from_config(inner: C, config: &SessionConfig) -> Self {
        Self::new(inner, config.catalog_retries, config.retry_backoff())
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn has_cached(&self) -> bool {
        self.cache().is_some()
    }

    fn cache(&self) -> std::sync::MutexGuard<'_, Option<Vec<Game>>> {
        self.last_good.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C: GameCatalog> GameCatalog for CachedCatalog<C> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    #[instrument(skip(self), fields(source = %self.inner.name()))]
    async fn fetch_games(&self) -> Result<Vec<Game>> {
        let mut last_error = None;

        for attempt in 0..=self.retries {
            match self.inner.fetch_games().await {
                Ok(games) => {
                    debug!(attempt, count = games.len(), "catalog fetch succeeded");
                    *self.cache() = Some(games.clone());
                    return Ok(games);
                }
                Err(err) => {
                    warn!(attempt, error = %err, "catalog fetch failed");
                    last_error = Some(err);
                    if attempt < self.retries && !self.backoff.is_zero() {
                        tokio::time::sleep(self.backoff).await;
                    }
                }
            }
        }

        if let Some(games) = self.cache().clone() {
            warn!(count = games.len(), "serving stale catalog");
            return Ok(games);
        }

        let reason = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no attempts made".to_string());
        Err(WgnError::unavailable(self.inner.name(), reason))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    /// Fails for the attempt numbers listed in `fail_on`, counting from zero.
    struct FlakyCatalog {
        calls: AtomicU32,
        fail_on: Vec<u32>,
    }

    impl FlakyCatalog {
        fn new(fail_on: Vec<u32>) -> Self {
            Self {
                calls: AtomicU32::new(0),
                fail_on,
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl GameCatalog for FlakyCatalog {
        fn name(&self) -> &str {
            "flaky"
        }

        async fn fetch_games(&self) -> Result<Vec<Game>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_on.contains(&call) {
                Err(WgnError::unavailable("flaky", format!("call {call} failed")))
            } else {
                Ok(vec![Game::new(call.to_string(), "Soccer")?])
            }
        }
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let catalog = CachedCatalog::new(FlakyCatalog::new(vec![0, 1]), 2, Duration::ZERO);

        let games = catalog.fetch_games().await.unwrap();

        assert_eq!(games[0].id, "2");
        assert_eq!(catalog.inner().calls(), 3);
        assert!(catalog.has_cached());
    }

    #[tokio::test]
    async fn test_serves_stale_copy_after_failures() {
        let catalog = CachedCatalog::new(FlakyCatalog::new(vec![1, 2]), 1, Duration::ZERO);

        let fresh = catalog.fetch_games().await.unwrap();
        let stale = catalog.fetch_games().await.unwrap();

        assert_eq!(fresh, stale);
        assert_eq!(catalog.inner().calls(), 3);
    }

    #[tokio::test]
    async fn test_unavailable_without_cache() {
        let catalog = CachedCatalog::new(FlakyCatalog::new(vec![0, 1, 2]), 2, Duration::ZERO);

        let err = catalog.fetch_games().await.unwrap_err();

        assert!(matches!(
            err,
            WgnError::SourceUnavailable { ref source_name, .. } if source_name == "flaky"
        ));
        assert!(!catalog.has_cached());
    }

    #[tokio::test]
    async fn test_backoff_between_attempts() {
        let catalog = CachedCatalog::new(
            FlakyCatalog::new(vec![0]),
            1,
            Duration::from_millis(5),
        );

        let started = std::time::Instant::now();
        catalog.fetch_games().await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(5));
    }
}
