use rocket::{
    Request,
    http::Status,
    request::{FromRequest, Outcome},
};
use tokio::sync::MappedMutexGuard;

use crate::{
    database::{config::DatabaseSettings, connection::Connector, slot::ConnectionSlot},
    errors::AppError,
};

/// Explicit database access for one request.
///
/// The request's slot lives in Rocket's request-local cache, keyed by the
/// connection type.
///
/// Taking `Db` as a handler argument does not open anything; the connection
/// is opened by the first call to [`Db::connection`] and closed by the
/// [`ConnectionTeardown`](crate::database::teardown::ConnectionTeardown) fairing.
pub struct Db<'r, K: Connector = DatabaseSettings> {
    slot: &'r ConnectionSlot<K::Connection>,
    connector: &'r K,
}

impl<K: Connector> Db<'_, K> {
    /// Returns this request's connection, opening it on first use.
    ///
    /// The handle borrows `self` mutably, so only one can be alive at a time.
    pub async fn connection(&mut self) -> Result<MappedMutexGuard<'_, K::Connection>, AppError> {
        let connector = self.connector;
        self.slot.get_or_open(|| connector.connect()).await
    }
}

#[rocket::async_trait]
impl<'r, K: Connector> FromRequest<'r> for Db<'r, K> {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let Some(connector) = request.rocket().state::<K>() else {
            log::error!("no database connector is managed; attach the config fairing");
            return Outcome::Error((Status::InternalServerError, ()));
        };
        Outcome::Success(Db {
            slot: request.local_cache(ConnectionSlot::<K::Connection>::default),
            connector,
        })
    }
}
