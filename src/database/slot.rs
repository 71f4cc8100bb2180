//! Request-Scoped Connection Slot
//!
//! A `ConnectionSlot` holds at most one open connection. One slot lives in the
//! request-local cache of every request that asks for the database; it is
//! never shared between requests.
//!
//! ## Lifecycle
//!
//! - **Empty**: nothing has been opened yet
//! - **Open**: the first `get_or_open` stored a connection; later calls reuse it
//! - **Closed**: `close` took the connection out and shut it down
//!
//! Access never waits: asking for the connection while a handle to it is
//! still alive fails with `TryLockError` instead of blocking the request.

use std::future::Future;

use sqlx::{Connection, PgConnection};
use tokio::sync::{MappedMutexGuard, Mutex, MutexGuard, TryLockError};

/// A connection that can be shut down gracefully.
#[rocket::async_trait]
pub trait Closeable: Send + Sized + 'static {
    async fn close(self) -> Result<(), sqlx::Error>;
}

#[rocket::async_trait]
impl Closeable for PgConnection {
    async fn close(self) -> Result<(), sqlx::Error> {
        Connection::close(self).await
    }
}

/// Holds the optional connection of a single request.
pub struct ConnectionSlot<C> {
    connection: Mutex<Option<C>>,
}

impl<C> Default for ConnectionSlot<C> {
    fn default() -> Self {
        Self {
            connection: Mutex::new(None),
        }
    }
}

impl<C: Closeable> ConnectionSlot<C> {
    /// Returns the held connection, calling `open` only if the slot is empty.
    ///
    /// If `open` fails the slot stays empty and the error is returned. If a
    /// handle from an earlier call is still alive the call fails at once.
    pub async fn get_or_open<F, Fut, E>(&self, open: F) -> Result<MappedMutexGuard<'_, C>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<C, E>>,
        E: From<TryLockError>,
    {
        let mut slot = self.connection.try_lock()?;
        let connection = match slot.take() {
            Some(connection) => connection,
            None => open().await?,
        };
        Ok(MutexGuard::map(slot, |slot| slot.insert(connection)))
    }

    #[cfg(test)]
    pub async fn is_open(&self) -> bool {
        self.connection.lock().await.is_some()
    }

    /// Closes the held connection, if any. Returns whether one was closed.
    pub async fn close(&self) -> Result<bool, sqlx::Error> {
        let connection = self.connection.lock().await.take();
        match connection {
            Some(connection) => {
                connection.close().await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::errors::AppError;

    #[derive(Default)]
    struct Counters {
        opened: AtomicUsize,
        closed: AtomicUsize,
    }

    struct FakeConnection {
        id: usize,
        counters: Arc<Counters>,
    }

    #[rocket::async_trait]
    impl Closeable for FakeConnection {
        async fn close(self) -> Result<(), sqlx::Error> {
            self.counters.closed.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    async fn open(counters: &Arc<Counters>) -> Result<FakeConnection, AppError> {
        let id = counters.opened.fetch_add(1, Ordering::SeqCst);
        Ok(FakeConnection {
            id,
            counters: counters.clone(),
        })
    }

    #[rocket::async_test]
    async fn test_get_or_open_reuses_connection() {
        let counters = Arc::new(Counters::default());
        let slot = ConnectionSlot::default();

        let first = slot.get_or_open(|| open(&counters)).await.unwrap().id;
        let second = slot.get_or_open(|| open(&counters)).await.unwrap().id;

        assert_eq!(first, second);
        assert_eq!(counters.opened.load(Ordering::SeqCst), 1);
        assert!(slot.is_open().await);
    }

    #[rocket::async_test]
    async fn test_second_access_while_handle_alive_fails_fast() {
        let counters = Arc::new(Counters::default());
        let slot = ConnectionSlot::default();

        let first = slot.get_or_open(|| open(&counters)).await.unwrap();
        let second = slot.get_or_open(|| open(&counters)).await;
        assert!(matches!(second, Err(AppError::InUse(_))));
        assert_eq!(first.id, 0);
        drop(first);

        let again = slot.get_or_open(|| open(&counters)).await.unwrap();
        assert_eq!(again.id, 0);
        assert_eq!(counters.opened.load(Ordering::SeqCst), 1);
    }

    #[rocket::async_test]
    async fn test_close_is_called_once() {
        let counters = Arc::new(Counters::default());
        let slot = ConnectionSlot::default();
        slot.get_or_open(|| open(&counters)).await.unwrap();

        assert!(slot.close().await.unwrap());
        assert!(!slot.close().await.unwrap());
        assert_eq!(counters.closed.load(Ordering::SeqCst), 1);
        assert!(!slot.is_open().await);
    }

    #[rocket::async_test]
    async fn test_close_on_empty_slot_is_a_noop() {
        let slot = ConnectionSlot::<FakeConnection>::default();
        assert!(!slot.close().await.unwrap());
    }

    #[rocket::async_test]
    async fn test_failed_open_leaves_slot_empty() {
        let counters = Arc::new(Counters::default());
        let slot = ConnectionSlot::<FakeConnection>::default();

        let result = slot
            .get_or_open(|| async { Err::<FakeConnection, _>(AppError::Connection(sqlx::Error::PoolClosed)) })
            .await;
        assert!(result.is_err());
        assert!(!slot.is_open().await);

        slot.get_or_open(|| open(&counters)).await.unwrap();
        assert_eq!(counters.opened.load(Ordering::SeqCst), 1);
    }

    #[rocket::async_test]
    async fn test_close_after_failed_work() {
        let counters = Arc::new(Counters::default());
        let slot = ConnectionSlot::default();

        let outcome: Result<(), &str> = async {
            let _connection = slot.get_or_open(|| open(&counters)).await.unwrap();
            Err("query failed")
        }
        .await;
        assert!(outcome.is_err());

        assert!(slot.close().await.unwrap());
        assert_eq!(counters.opened.load(Ordering::SeqCst), 1);
        assert_eq!(counters.closed.load(Ordering::SeqCst), 1);
    }

    #[rocket::async_test]
    async fn test_separate_slots_open_separately() {
        let counters = Arc::new(Counters::default());
        for _ in 0..2 {
            let slot = ConnectionSlot::default();
            slot.get_or_open(|| open(&counters)).await.unwrap();
            slot.close().await.unwrap();
        }
        assert_eq!(counters.opened.load(Ordering::SeqCst), 2);
        assert_eq!(counters.closed.load(Ordering::SeqCst), 2);
    }
}
