use std::marker::PhantomData;

use rocket::{
    Request, Response,
    fairing::{Fairing, Info, Kind},
};

use crate::database::{config::DatabaseSettings, connection::Connector, slot::ConnectionSlot};

/// Closes the request's connection once its response is ready.
///
/// `on_response` runs for handler results and catcher output alike, so a
/// connection opened by a failing handler is still closed.
pub struct ConnectionTeardown<K = DatabaseSettings> {
    connector: PhantomData<fn() -> K>,
}

impl<K> ConnectionTeardown<K> {
    pub fn new() -> Self {
        Self {
            connector: PhantomData,
        }
    }
}

impl<K> Default for ConnectionTeardown<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[rocket::async_trait]
impl<K: Connector> Fairing for ConnectionTeardown<K> {
    fn info(&self) -> Info {
        Info {
            name: "Request connection teardown",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, _response: &mut Response<'r>) {
        let slot = request.local_cache(ConnectionSlot::<K::Connection>::default);
        match slot.close().await {
            Ok(true) => log::info!("closed database connection for {}", request.uri()),
            Ok(false) => {}
            Err(e) => log::warn!(
                "failed to close database connection for {}: {}",
                request.uri(),
                e
            ),
        }
    }
}
