//! Local appointment store for repcal
//!
//! The authoritative record of every appointment. The store is built on an
//! SQLx `Any` pool and implements
//! [`AppointmentStore`](repcal_common::services::AppointmentStore), so the
//! scheduling engine never sees SQL.
//!
//! # Example
//!
//! ```rust,no_run
//! use repcal_db::{DbClient, SqlAppointmentRepository};
//!
//! async fn setup() -> Result<SqlAppointmentRepository, repcal_db::DbError> {
//!     let client = DbClient::from_url("sqlite://data/repcal.db").await?;
//!     let repository = SqlAppointmentRepository::new(client);
//!     repository.init_schema().await?;
//!     Ok(repository)
//! }
//! ```

pub mod client;
pub mod error;
pub mod factory;
pub mod repositories;

pub use client::DbClient;
pub use error::DbError;
pub use factory::DbClientFactory;
pub use repositories::SqlAppointmentRepository;
