//! HTTP client for the event backend

use std::future::Future;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{RosterError, RosterResult};
use crate::event::Event;
use crate::participant::Participant;
use crate::protocol::{
    EVENTS_PATH, EventsResponse, PARTICIPANTS_PATH, ParticipantsRequest, ParticipantsResponse,
};

pub const DEFAULT_BASE_URL: &str = "https://sxv-backend.onrender.com";

/// Where a workflow session gets its catalog and participants from.
pub trait Backend {
    fn list_events(&self) -> impl Future<Output = RosterResult<Vec<Event>>>;

    fn fetch_participants(
        &self,
        event_id: &str,
    ) -> impl Future<Output = RosterResult<Vec<Participant>>>;
}

/// HTTP client for the event backend
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET /api/events/getEvents
    pub async fn list_events(&self) -> RosterResult<Vec<Event>> {
        let url = self.url(EVENTS_PATH);
        debug!(%url, "Requesting event catalog");

        let resp = self.http.get(&url).send().await?;
        let body: EventsResponse = read_json(resp, &url).await?;

        Ok(body.events)
    }

    /// POST /api/events/getEv
    pub async fn fetch_participants(&self, event_id: &str) -> RosterResult<Vec<Participant>> {
        let url = self.url(PARTICIPANTS_PATH);
        debug!(%url, event_id, "Requesting participants");

        let resp = self
            .http
            .post(&url)
            .json(&ParticipantsRequest {
                event_id: event_id.to_string(),
            })
            .send()
            .await?;

        let participants: ParticipantsResponse = read_json(resp, &url).await?;
        Ok(participants)
    }
}

impl Backend for Client {
    async fn list_events(&self) -> RosterResult<Vec<Event>> {
        Client::list_events(self).await
    }

    async fn fetch_participants(&self, event_id: &str) -> RosterResult<Vec<Participant>> {
        Client::fetch_participants(self, event_id).await
    }
}

/// Check the status and decode the body, keeping transport and payload
/// failures apart.
async fn read_json<T: DeserializeOwned>(resp: reqwest::Response, url: &str) -> RosterResult<T> {
    let status = resp.status();
    if !status.is_success() {
        return Err(RosterError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| RosterError::Payload(e.to_string()))
}
