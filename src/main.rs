#[macro_use]
extern crate rocket;

use rocket::{Build, Config, Rocket, fairing::AdHoc, figment::Figment};

use crate::database::{config::DatabaseSettings, teardown::ConnectionTeardown};

mod database;
mod errors;
mod models;
mod routes;
mod utils;


/// Builds the application from the given configuration.
pub fn app(figment: Figment) -> Rocket<Build> {
    rocket::custom(figment)
        .mount("/", routes::routes())
        .attach(AdHoc::config::<DatabaseSettings>())
        .attach(ConnectionTeardown::<DatabaseSettings>::new())
}

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    app(Config::figment()).launch().await?;
    Ok(())
}
