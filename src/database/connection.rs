//! Database Connection Factory
//!
//! Opens a single PostgreSQL connection from the URL in the environment.
//! There is no pool and no retry: each call opens exactly one socket, and a
//! failed handshake is returned to the caller as is.

use sqlx::{Connection, PgConnection};

use crate::{
    database::{
        config::{ConnectionConfig, DatabaseSettings},
        slot::Closeable,
    },
    errors::AppError,
};

/// Opens the connections handed out by the [`Db`](crate::database::guard::Db) guard.
///
/// Kept as Rocket-managed state; `DatabaseSettings` is the PostgreSQL implementation.
#[rocket::async_trait]
pub trait Connector: Send + Sync + 'static {
    type Connection: Closeable;

    async fn connect(&self) -> Result<Self::Connection, AppError>;
}

#[rocket::async_trait]
impl Connector for DatabaseSettings {
    type Connection = PgConnection;

    async fn connect(&self) -> Result<PgConnection, AppError> {
        open_connection(self).await
    }
}

/// Opens a new connection using the URL named by `settings`.
///
/// # Errors
///
/// - `AppError::Config` if the variable is unset or the URL is not a `postgres://` URL
/// - `AppError::Connection` if the network or authentication handshake fails
pub async fn open_connection(settings: &DatabaseSettings) -> Result<PgConnection, AppError> {
    let config = ConnectionConfig::from_settings(settings)?;
    connect(&config).await
}

/// Opens a new connection for an already parsed configuration.
pub async fn connect(config: &ConnectionConfig) -> Result<PgConnection, AppError> {
    let connection = PgConnection::connect_with(&config.to_connect_options())
        .await
        .map_err(AppError::Connection)?;
    log::info!(
        "opened database connection to {}/{}",
        config.host.as_deref().unwrap_or("localhost"),
        config.database.as_deref().unwrap_or("")
    );
    Ok(connection)
}
