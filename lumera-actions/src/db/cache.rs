//! Process-wide connection cache
//!
//! The web layer re-enters the data layer on every request, so the pool is
//! established lazily and memoized for the lifetime of the process. The cell is single-assignment: the first caller runs the
//! connect future, concurrent callers await that same in-flight attempt,
//! and everyone after that gets the cached handle. A failed attempt is
//! returned to its caller and nothing retries it automatically.

use std::future::Future;

use sqlx::PgPool;
use tokio::sync::OnceCell;

use lumera_core::config::DatabaseConfig;

use crate::error::{ActionError, Result};

/// Lazily-initialized, thread-safe, single-assignment connection cell.
pub struct ConnectionCache<T> {
    cell: OnceCell<T>,
}

impl<T> ConnectionCache<T> {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::const_new(),
        }
    }

    /// Return the cached value, connecting on first use.
    ///
    /// At most one `connect` future runs at a time; concurrent first-time
    /// callers all await it and share its result. On failure the cell stays
    /// unset and the error goes to the caller that observed it.
    pub async fn get_or_connect<F, Fut, E>(&self, connect: F) -> std::result::Result<&T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        self.cell.get_or_try_init(connect).await
    }

    /// Peek at the cached value without connecting.
    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }
}

impl<T> Default for ConnectionCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

static POOL: ConnectionCache<PgPool> = ConnectionCache::new();

/// The process-wide database handle.
///
/// Fails with a configuration error when `DATABASE_URL` is unset; connect
/// failures surface as database errors.
pub async fn connection() -> Result<&'static PgPool> {
    POOL.get_or_connect(|| async {
        let config = DatabaseConfig::from_env()?;
        let pool = super::pool::create_pool(&config.url).await?;
        Ok::<_, ActionError>(pool)
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_first_callers_share_one_attempt() {
        let cache = Arc::new(ConnectionCache::<usize>::new());
        let attempts = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let attempts = Arc::clone(&attempts);
                tokio::spawn(async move {
                    *cache
                        .get_or_connect(|| async {
                            attempts.fetch_add(1, Ordering::SeqCst);
                            // Hold the in-flight attempt open so the other
                            // callers really do pile up behind it.
                            tokio::time::sleep(Duration::from_millis(20)).await;
                            Ok::<_, io::Error>(42usize)
                        })
                        .await
                        .expect("connect failed")
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.expect("task panicked"), 42);
        }
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn later_callers_hit_the_cache() {
        let cache = ConnectionCache::<u8>::new();
        let attempts = AtomicUsize::new(0);

        for _ in 0..3 {
            let value = cache
                .get_or_connect(|| async {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, io::Error>(7u8)
                })
                .await
                .expect("connect failed");
            assert_eq!(*value, 7);
        }
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_attempt_leaves_cell_unset() {
        let cache = ConnectionCache::<u8>::new();

        let err = cache
            .get_or_connect(|| async { Err::<u8, _>(io::Error::other("connection refused")) })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "connection refused");
        assert!(cache.get().is_none());

        // A later, fresh call is a new attempt; nothing retried in between.
        let value = cache
            .get_or_connect(|| async { Ok::<_, io::Error>(9u8) })
            .await
            .expect("second attempt failed");
        assert_eq!(*value, 9);
    }
}
