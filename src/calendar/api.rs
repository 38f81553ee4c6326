use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use super::event::{CalendarEvent, EventDraft, EventId};
use super::month::YearMonth;
use crate::error::ApiError;

const EVENTS_PATH: &str = "api/calendar/events";

/// Persistence for calendar events.
#[async_trait]
pub trait EventsApi: Send + Sync {
    async fn list_month(&self, month: YearMonth) -> Result<Vec<CalendarEvent>, ApiError>;

    async fn create(&self, draft: &EventDraft) -> Result<CalendarEvent, ApiError>;

    async fn update(&self, id: &EventId, draft: &EventDraft) -> Result<CalendarEvent, ApiError>;

    async fn delete(&self, id: &EventId) -> Result<(), ApiError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Events API over HTTP + JSON.
#[derive(Debug, Clone)]
pub struct HttpEventsApi {
    client: Client,
    base: Url,
}

impl HttpEventsApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base: normalize_base(base_url)?,
        })
    }

    fn collection_url(&self) -> Result<Url, ApiError> {
        Ok(self.base.join(EVENTS_PATH)?)
    }

    fn month_url(&self, month: YearMonth) -> Result<Url, ApiError> {
        let mut url = self.collection_url()?;
        url.query_pairs_mut()
            .append_pair("year", &month.year().to_string())
            .append_pair("month", &month.month().to_string());
        Ok(url)
    }

    fn event_url(&self, id: &EventId) -> Result<Url, ApiError> {
        let mut url = self.collection_url()?;
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .push(id.as_str());
        Ok(url)
    }
}

#[async_trait]
impl EventsApi for HttpEventsApi {
    async fn list_month(&self, month: YearMonth) -> Result<Vec<CalendarEvent>, ApiError> {
        let url = self.month_url(month)?;
        debug!(%url, "GET events");
        let response = self.client.get(url).send().await?;
        decode(response).await
    }

    async fn create(&self, draft: &EventDraft) -> Result<CalendarEvent, ApiError> {
        let url = self.collection_url()?;
        debug!(%url, title = %draft.title, "POST event");
        let response = self.client.post(url).json(draft).send().await?;
        decode(response).await
    }

    async fn update(&self, id: &EventId, draft: &EventDraft) -> Result<CalendarEvent, ApiError> {
        let url = self.event_url(id)?;
        debug!(%url, title = %draft.title, "PUT event");
        let response = self.client.put(url).json(draft).send().await?;
        decode(response).await
    }

    async fn delete(&self, id: &EventId) -> Result<(), ApiError> {
        let url = self.event_url(id)?;
        debug!(%url, "DELETE event");
        let response = self.client.delete(url).send().await?;
        check_status(response).await.map(|_| ())
    }
}

/// Parses the base URL so that relative joins append instead of replacing
/// its last path segment.
fn normalize_base(base_url: &str) -> Result<Url, ApiError> {
    let trimmed = base_url.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    Ok(Url::parse(&with_slash)?)
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body);
    warn!(status = status.as_u16(), ?message, "events API rejected request");
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = check_status(response).await?.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Pulls `error` out of a `{"error": "..."}` body.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.error)
        .filter(|e| !e.trim().is_empty())
}
