// --- File: crates/repcal_gcal/src/service.rs ---
//! Google Calendar implementation of the external calendar source.
//!
//! Every call is authorized with the rep's own access token and bounded by
//! the configured request timeout. Failures are plain errors; deciding
//! whether they are fatal is the caller's business.

use chrono::{DateTime, Utc};
use repcal_common::models::{
    ExternalCredentials, ExternalEvent, ExternalEventPayload, ExternalEventRef,
};
use repcal_common::services::{BoxFuture, ExternalCalendarSource};
use repcal_config::GcalConfig;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::auth::{build_https_client, hub_for, HttpClient};
use crate::mapping::{event_from_api, event_to_api};

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const PAGE_SIZE: i32 = 250;

/// Errors that can occur when interacting with Google Calendar.
#[derive(Error, Debug)]
pub enum GcalSourceError {
    #[error("Google API Error: {0}")]
    ApiError(String),
    #[error("Google Calendar did not answer within {0}s")]
    Timeout(u64),
    #[error("No access token for the external calendar")]
    MissingToken,
    #[error("Google Calendar returned an event without an id")]
    MissingEventId,
    #[error("Failed to build HTTPS client: {0}")]
    ClientError(String),
}

impl From<google_calendar3::Error> for GcalSourceError {
    fn from(err: google_calendar3::Error) -> Self {
        GcalSourceError::ApiError(err.to_string())
    }
}

/// Google Calendar service implementation.
#[derive(Clone)]
pub struct GoogleCalendarSource {
    client: HttpClient,
    calendar_id: String,
    timeout: Duration,
}

impl GoogleCalendarSource {
    /// Create a source for the calendar named in `config` (default `primary`).
    pub fn new(config: &GcalConfig) -> Result<Self, GcalSourceError> {
        Ok(Self {
            client: build_https_client()?,
            calendar_id: config.calendar_id_or_primary().to_string(),
            timeout: Duration::from_secs(
                config.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        })
    }

    pub fn calendar_id(&self) -> &str {
        &self.calendar_id
    }

    async fn bounded<T, F>(&self, call: F) -> Result<T, GcalSourceError>
    where
        F: Future<Output = Result<T, google_calendar3::Error>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result.map_err(GcalSourceError::from),
            Err(_) => Err(GcalSourceError::Timeout(self.timeout.as_secs())),
        }
    }
}

impl ExternalCalendarSource for GoogleCalendarSource {
    type Error = GcalSourceError;

    /// Lists single (expanded) events intersecting the window, following
    /// pagination until Google reports no further page.
    fn list_events(
        &self,
        credentials: &ExternalCredentials,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<ExternalEvent>, Self::Error> {
        let hub = hub_for(&self.client, credentials);

        Box::pin(async move {
            let hub = hub?;
            let mut events = Vec::new();
            let mut page_token: Option<String> = None;

            loop {
                let mut call = hub
                    .events()
                    .list(&self.calendar_id)
                    .time_min(time_min)
                    .time_max(time_max)
                    .single_events(true)
                    .order_by("startTime")
                    .max_results(PAGE_SIZE);
                if let Some(token) = page_token.as_deref() {
                    call = call.page_token(token);
                }

                let (_response, page) = self.bounded(call.doit()).await?;
                events.extend(
                    page.items
                        .unwrap_or_default()
                        .into_iter()
                        .filter_map(event_from_api),
                );

                match page.next_page_token {
                    Some(token) if !token.is_empty() => page_token = Some(token),
                    _ => break,
                }
            }

            debug!(
                "Fetched {} events from calendar {} between {} and {}",
                events.len(),
                self.calendar_id,
                time_min,
                time_max
            );
            Ok(events)
        })
    }

    fn create_event(
        &self,
        credentials: &ExternalCredentials,
        payload: ExternalEventPayload,
    ) -> BoxFuture<'_, ExternalEventRef, Self::Error> {
        let hub = hub_for(&self.client, credentials);

        Box::pin(async move {
            let hub = hub?;
            let (_response, created) = self
                .bounded(
                    hub.events()
                        .insert(event_to_api(payload), &self.calendar_id)
                        .doit(),
                )
                .await?;

            let id = created.id.ok_or(GcalSourceError::MissingEventId)?;
            debug!("Created event {} in calendar {}", id, self.calendar_id);
            Ok(ExternalEventRef { id })
        })
    }

    fn update_event(
        &self,
        credentials: &ExternalCredentials,
        event_id: &str,
        payload: ExternalEventPayload,
    ) -> BoxFuture<'_, ExternalEventRef, Self::Error> {
        let hub = hub_for(&self.client, credentials);
        let event_id = event_id.to_string();

        Box::pin(async move {
            let hub = hub?;
            let (_response, updated) = self
                .bounded(
                    hub.events()
                        .patch(event_to_api(payload), &self.calendar_id, &event_id)
                        .doit(),
                )
                .await?;

            debug!("Updated event {} in calendar {}", event_id, self.calendar_id);
            Ok(ExternalEventRef {
                id: updated.id.unwrap_or(event_id),
            })
        })
    }
}
