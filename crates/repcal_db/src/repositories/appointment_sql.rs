//! SQL implementation of the appointment store
//!
//! Dates and times are stored as ISO text because the `Any` driver cannot
//! decode chrono types. Zero-padded text sorts the same as the values.

use crate::error::DbError;
use crate::DbClient;
use chrono::{NaiveDate, NaiveTime};
use repcal_common::models::{
    AppointmentChanges, AppointmentRecord, AppointmentStatus, NewAppointment,
};
use repcal_common::services::{AppointmentStore, BoxFuture};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

const COLUMNS: &str = "id, prospect_id, rep_id, date, start_time, duration_minutes, \
                       place, notes, external_ref, status";

/// Appointment store backed by an SQL table named `appointments`.
#[derive(Debug, Clone)]
pub struct SqlAppointmentRepository {
    db_client: DbClient,
}

impl SqlAppointmentRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    pub fn client(&self) -> &DbClient {
        &self.db_client
    }

    /// Create the `appointments` table and its lookup index if missing.
    pub async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing appointment schema");

        let table = r#"
            CREATE TABLE IF NOT EXISTS appointments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                prospect_id TEXT NOT NULL,
                rep_id TEXT NOT NULL,
                date TEXT NOT NULL,
                start_time TEXT NOT NULL,
                duration_minutes INTEGER NOT NULL,
                place TEXT,
                notes TEXT,
                external_ref TEXT,
                status TEXT NOT NULL DEFAULT 'scheduled'
            )
        "#;
        self.db_client.execute(table).await?;

        let index = "CREATE INDEX IF NOT EXISTS idx_appointments_rep_date \
                     ON appointments (rep_id, date)";
        self.db_client.execute(index).await?;

        info!("Appointment schema initialized successfully");
        Ok(())
    }

    /// Appointments of one rep on one day, ordered by start time.
    pub async fn find_for_day(
        &self,
        rep_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<AppointmentRecord>, DbError> {
        debug!("Listing appointments for rep {} on {}", rep_id, date);

        let query = format!(
            "SELECT {} FROM appointments WHERE rep_id = $1 AND date = $2 \
             ORDER BY start_time, id",
            COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(rep_id)
            .bind(date.format(DATE_FORMAT).to_string())
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to list appointments: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        rows.iter().map(row_to_record).collect()
    }

    /// Look up a single appointment.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<AppointmentRecord>, DbError> {
        let query = format!("SELECT {} FROM appointments WHERE id = $1", COLUMNS);

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(row_to_record).transpose()
    }

    /// Insert a new appointment and return it with its generated id.
    pub async fn insert(&self, appointment: NewAppointment) -> Result<AppointmentRecord, DbError> {
        debug!(
            "Creating appointment for rep {} on {} at {}",
            appointment.rep_id, appointment.date, appointment.start_time
        );

        let query = format!(
            "INSERT INTO appointments \
             (prospect_id, rep_id, date, start_time, duration_minutes, place, notes, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {}",
            COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(&appointment.prospect_id)
            .bind(&appointment.rep_id)
            .bind(appointment.date.format(DATE_FORMAT).to_string())
            .bind(appointment.start_time.format(TIME_FORMAT).to_string())
            .bind(i64::from(appointment.duration_minutes))
            .bind(appointment.place.clone())
            .bind(appointment.notes.clone())
            .bind(appointment.status.as_str())
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to insert appointment: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        let created = row_to_record(&row)?;
        info!("Appointment {} created", created.id);
        Ok(created)
    }

    /// Apply a partial update to one appointment.
    ///
    /// Read and write happen in one transaction, so concurrent updates of
    /// the same record serialize instead of overwriting each other's fields.
    pub async fn apply_changes(
        &self,
        id: i64,
        changes: AppointmentChanges,
    ) -> Result<AppointmentRecord, DbError> {
        debug!("Updating appointment {}", id);

        let mut tx = self.db_client.begin().await?;

        let select = format!("SELECT {} FROM appointments WHERE id = $1", COLUMNS);
        let existing = sqlx::query(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?
            .ok_or(DbError::NotFound(id))?;

        let mut record = row_to_record(&existing)?;
        changes.apply_to(&mut record);

        let update = format!(
            "UPDATE appointments SET prospect_id = $1, rep_id = $2, date = $3, \
             start_time = $4, duration_minutes = $5, place = $6, notes = $7, \
             external_ref = $8, status = $9 WHERE id = $10 RETURNING {}",
            COLUMNS
        );

        let row = sqlx::query(&update)
            .bind(&record.prospect_id)
            .bind(&record.rep_id)
            .bind(record.date.format(DATE_FORMAT).to_string())
            .bind(record.start_time.format(TIME_FORMAT).to_string())
            .bind(i64::from(record.duration_minutes))
            .bind(record.place.clone())
            .bind(record.notes.clone())
            .bind(record.external_ref.clone())
            .bind(record.status.as_str())
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                error!("Failed to update appointment {}: {}", id, e);
                DbError::QueryError(e.to_string())
            })?;

        let updated = row_to_record(&row)?;
        tx.commit()
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))?;

        info!("Appointment {} updated", id);
        Ok(updated)
    }
}

fn row_to_record(row: &AnyRow) -> Result<AppointmentRecord, DbError> {
    let date: String = row.try_get("date")?;
    let start_time: String = row.try_get("start_time")?;
    let duration: i64 = row.try_get("duration_minutes")?;
    let status: String = row.try_get("status")?;

    Ok(AppointmentRecord {
        id: row.try_get("id")?,
        prospect_id: row.try_get("prospect_id")?,
        rep_id: row.try_get("rep_id")?,
        date: NaiveDate::parse_from_str(&date, DATE_FORMAT)
            .map_err(|e| DbError::DecodeError(format!("date '{}': {}", date, e)))?,
        start_time: NaiveTime::parse_from_str(&start_time, TIME_FORMAT)
            .map_err(|e| DbError::DecodeError(format!("start_time '{}': {}", start_time, e)))?,
        duration_minutes: u32::try_from(duration)
            .map_err(|_| DbError::DecodeError(format!("duration_minutes {}", duration)))?,
        place: row.try_get("place")?,
        notes: row.try_get("notes")?,
        external_ref: row.try_get("external_ref")?,
        status: status
            .parse::<AppointmentStatus>()
            .map_err(DbError::DecodeError)?,
    })
}

impl AppointmentStore for SqlAppointmentRepository {
    type Error = DbError;

    fn list(
        &self,
        rep_id: &str,
        date: NaiveDate,
    ) -> BoxFuture<'_, Vec<AppointmentRecord>, Self::Error> {
        let rep_id = rep_id.to_string();
        Box::pin(async move { self.find_for_day(&rep_id, date).await })
    }

    fn create(&self, appointment: NewAppointment) -> BoxFuture<'_, AppointmentRecord, Self::Error> {
        Box::pin(async move { self.insert(appointment).await })
    }

    fn update(
        &self,
        id: i64,
        changes: AppointmentChanges,
    ) -> BoxFuture<'_, AppointmentRecord, Self::Error> {
        Box::pin(async move { self.apply_changes(id, changes).await })
    }
}
