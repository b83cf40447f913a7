use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::domain::BusyBlock;
use crate::config::CalendarConfig;

/// Freshly minted access token returned by the OAuth refresh grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshedToken {
    pub access_token: String,
    pub expires_in_seconds: i64,
}

/// Error raised by the external calendar collaborator. The resolver treats
/// every variant as "no data from that source" and continues.
#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    #[error("calendar OAuth credentials are not configured")]
    CredentialsUnavailable,
    #[error("token refresh rejected: {0}")]
    RefreshRejected(String),
    #[error("free/busy query failed: {0}")]
    FreeBusy(String),
    #[error("calendar transport error: {0}")]
    Transport(String),
    #[error("unparseable busy interval '{0}'")]
    MalformedInterval(String),
}

/// Gateway hiding the external calendar provider behind two synchronous
/// calls, so the resolver core stays free of HTTP concerns.
pub trait CalendarGateway: Send + Sync {
    fn refresh_access_token(&self, refresh_token: &str) -> Result<RefreshedToken, CalendarError>;

    fn free_busy(
        &self,
        access_token: &str,
        provider_calendar_id: &str,
        time_min: NaiveDateTime,
        time_max: NaiveDateTime,
    ) -> Result<Vec<BusyBlock>, CalendarError>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Serialize)]
struct FreeBusyRequest {
    #[serde(rename = "timeMin")]
    time_min: String,
    #[serde(rename = "timeMax")]
    time_max: String,
    items: Vec<FreeBusyItem>,
}

#[derive(Debug, Serialize)]
struct FreeBusyItem {
    id: String,
}

#[derive(Debug, Deserialize)]
struct FreeBusyResponse {
    #[serde(default)]
    calendars: HashMap<String, CalendarBusy>,
}

#[derive(Debug, Deserialize)]
struct CalendarBusy {
    #[serde(default)]
    busy: Vec<WireInterval>,
}

#[derive(Debug, Deserialize)]
struct WireInterval {
    start: String,
    end: String,
}

/// Blocking HTTP client speaking the provider's token and free/busy
/// endpoints. Handlers call it through `spawn_blocking`.
pub struct HttpCalendarClient {
    http: reqwest::blocking::Client,
    config: CalendarConfig,
}

impl HttpCalendarClient {
    pub fn new(config: CalendarConfig) -> Result<Self, CalendarError> {
        let http = reqwest::blocking::Client::builder()
            .build()
            .map_err(|err| CalendarError::Transport(err.to_string()))?;
        Ok(Self { http, config })
    }
}

impl std::fmt::Debug for HttpCalendarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCalendarClient").finish_non_exhaustive()
    }
}

impl CalendarGateway for HttpCalendarClient {
    fn refresh_access_token(&self, refresh_token: &str) -> Result<RefreshedToken, CalendarError> {
        let (client_id, client_secret) = match (
            self.config.client_id.as_deref(),
            self.config.client_secret.as_deref(),
        ) {
            (Some(id), Some(secret)) => (id, secret),
            _ => return Err(CalendarError::CredentialsUnavailable),
        };

        let response = self
            .http
            .post(&self.config.token_url)
            .form(&[
                ("refresh_token", refresh_token),
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .map_err(|err| CalendarError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(CalendarError::RefreshRejected(format!(
                "token endpoint returned {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .map_err(|err| CalendarError::RefreshRejected(err.to_string()))?;

        Ok(RefreshedToken {
            access_token: token.access_token,
            expires_in_seconds: token.expires_in,
        })
    }

    fn free_busy(
        &self,
        access_token: &str,
        provider_calendar_id: &str,
        time_min: NaiveDateTime,
        time_max: NaiveDateTime,
    ) -> Result<Vec<BusyBlock>, CalendarError> {
        let request = FreeBusyRequest {
            time_min: to_wire_timestamp(time_min),
            time_max: to_wire_timestamp(time_max),
            items: vec![FreeBusyItem {
                id: provider_calendar_id.to_string(),
            }],
        };

        let response = self
            .http
            .post(&self.config.free_busy_url)
            .bearer_auth(access_token)
            .json(&request)
            .send()
            .map_err(|err| CalendarError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(CalendarError::FreeBusy(format!(
                "free/busy endpoint returned {}",
                response.status()
            )));
        }

        let payload: FreeBusyResponse = response
            .json()
            .map_err(|err| CalendarError::FreeBusy(err.to_string()))?;

        let intervals = payload
            .calendars
            .get(provider_calendar_id)
            .map(|entry| entry.busy.as_slice())
            .unwrap_or(&[]);

        intervals
            .iter()
            .map(|interval| {
                Ok(BusyBlock {
                    start: parse_wire_timestamp(&interval.start)?,
                    end: parse_wire_timestamp(&interval.end)?,
                })
            })
            .collect()
    }
}

fn to_wire_timestamp(value: NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Providers answer RFC3339 with an offset; busy intervals are normalized
/// to naive UTC on ingest so the resolver compares like with like.
fn parse_wire_timestamp(raw: &str) -> Result<NaiveDateTime, CalendarError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.naive_utc())
        .map_err(|_| CalendarError::MalformedInterval(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn wire_timestamps_round_trip_through_utc() {
        let value = NaiveDate::from_ymd_opt(2026, 3, 2)
            .expect("valid date")
            .and_hms_opt(14, 30, 0)
            .expect("valid time");
        let encoded = to_wire_timestamp(value);
        assert_eq!(encoded, "2026-03-02T14:30:00Z");
        assert_eq!(parse_wire_timestamp(&encoded).expect("parses"), value);
    }

    #[test]
    fn offset_timestamps_normalize_to_utc() {
        let parsed = parse_wire_timestamp("2026-03-02T09:00:00-05:00").expect("parses");
        let expected = NaiveDate::from_ymd_opt(2026, 3, 2)
            .expect("valid date")
            .and_hms_opt(14, 0, 0)
            .expect("valid time");
        assert_eq!(parsed, expected);
    }

    #[test]
    fn malformed_intervals_are_rejected() {
        assert!(matches!(
            parse_wire_timestamp("yesterday-ish"),
            Err(CalendarError::MalformedInterval(_))
        ));
    }
}
