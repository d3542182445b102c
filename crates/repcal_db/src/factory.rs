//! Factory for creating the appointment store
//!
//! Wires a [`DbClient`] to a [`SqlAppointmentRepository`] and makes sure
//! the schema exists before the repository is handed out.

use crate::client::DbClient;
use crate::error::DbError;
use crate::repositories::SqlAppointmentRepository;
use repcal_config::AppConfig;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct DbClientFactory;

impl DbClientFactory {
    pub fn new() -> Self {
        Self
    }

    /// Create a database client from the application configuration.
    pub async fn from_app_config(&self, config: &Arc<AppConfig>) -> Result<DbClient, DbError> {
        debug!("Creating database client from application configuration");
        DbClient::new(config).await
    }

    /// Create a database client from a URL.
    pub async fn from_url(&self, db_url: &str) -> Result<DbClient, DbError> {
        debug!("Creating database client from URL");
        DbClient::from_url(db_url).await
    }

    /// Connect, initialize the schema and return a ready appointment store.
    pub async fn appointment_repository(
        &self,
        config: &Arc<AppConfig>,
    ) -> Result<SqlAppointmentRepository, DbError> {
        let client = self.from_app_config(config).await?;
        let repository = SqlAppointmentRepository::new(client);
        repository.init_schema().await?;
        Ok(repository)
    }
}
