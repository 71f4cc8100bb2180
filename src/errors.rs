use rocket::{
    Request,
    http::Status,
    response::{self, Responder},
};
use thiserror::Error;

/// Problems with the connection URL found before any socket is opened.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(String),

    #[error("connection URL could not be parsed: {0}")]
    Malformed(#[from] url::ParseError),

    #[error("unsupported database scheme: {0}")]
    UnsupportedScheme(String),
}

/// Errors raised while serving a request that needs the database.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("could not connect to the database: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("query failed: {0}")]
    Query(#[source] sqlx::Error),

    #[error("the request's database connection is already in use")]
    InUse(#[from] tokio::sync::TryLockError),
}

/// Every failure is answered by Rocket's default 500 catcher.
impl<'r, 'o: 'r> Responder<'r, 'o> for AppError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'o> {
        log::error!("{} {} failed: {}", request.method(), request.uri(), self);
        Err(Status::InternalServerError)
    }
}
