// File: crates/repcal_gcal/src/auth.rs
//! Per-request authorization against Google Calendar.
//!
//! The rep's own OAuth access token is forwarded as a bearer token. The
//! HTTPS client is shared; a `CalendarHub` is cheap and built per call.

use google_calendar3::{
    hyper_rustls::{self, HttpsConnectorBuilder},
    hyper_util::client::legacy::connect::HttpConnector,
    hyper_util::client::legacy::Client,
    CalendarHub,
};
use repcal_common::models::ExternalCredentials;

use crate::service::GcalSourceError;

// Type aliases for clarity
type Connector = hyper_rustls::HttpsConnector<HttpConnector>;

pub type HubType = CalendarHub<Connector>;
pub type HttpClient = google_calendar3::common::Client<Connector>;

/// Build the HTTPS client shared by every hub.
pub fn build_https_client() -> Result<HttpClient, GcalSourceError> {
    let https = HttpsConnectorBuilder::new()
        .with_native_roots()
        .map_err(|e| GcalSourceError::ClientError(e.to_string()))?
        .https_or_http()
        .enable_http1()
        .build();

    Ok(Client::builder(hyper_util::rt::TokioExecutor::new()).build(https))
}

/// The bearer token to send, or `MissingToken` if the rep has none.
pub fn bearer_token(credentials: &ExternalCredentials) -> Result<String, GcalSourceError> {
    let token = credentials.access_token.trim();
    if token.is_empty() {
        return Err(GcalSourceError::MissingToken);
    }
    Ok(token.to_string())
}

/// Build a hub that authorizes every call with the rep's access token.
///
/// The refresh token is never used: an expired access token fails the call.
pub fn hub_for(
    client: &HttpClient,
    credentials: &ExternalCredentials,
) -> Result<HubType, GcalSourceError> {
    let token = bearer_token(credentials)?;
    Ok(CalendarHub::new(client.clone(), token))
}
