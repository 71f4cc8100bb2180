//! Database Access
//!
//! Every request that needs PostgreSQL gets its own connection. Nothing is
//! pooled and nothing outlives the request.
//!
//! ## Module Structure
//!
//! - `config.rs` - Connection URL settings and parsing
//! - `connection.rs` - Opens a single connection
//! - `slot.rs` - Holds the optional connection of one request
//! - `guard.rs` - `Db` request guard giving handlers explicit access to the slot
//! - `teardown.rs` - Fairing that closes the connection when the request ends
//! - `traits.rs` - `DatabaseResource` trait for typed rows
//!
//! ## Quick Start
//!
//! ```rust
//! use crate::{database::guard::Db, errors::AppError, models::animal::list_animal_names};
//!
//! #[get("/animals")]
//! async fn animals(db: Db<'_>) -> Result<String, AppError> {
//!     let mut connection = db.connection().await?;
//!     let names = list_animal_names(&mut connection).await?;
//!     Ok(format!("{} animals", names.len()))
//! }
//! ```

pub mod config;
pub mod connection;
pub mod guard;
pub mod slot;
pub mod teardown;
pub mod traits;
