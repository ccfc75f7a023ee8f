//! Wire schemas for the event backend.
//!
//! Paths are fixed by the backend and are not configurable; only the base
//! URL comes from configuration.

use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::participant::Participant;

/// GET: returns the event catalog.
pub const EVENTS_PATH: &str = "/api/events/getEvents";

/// POST: returns the participants of one event.
pub const PARTICIPANTS_PATH: &str = "/api/events/getEv";

/// Response body of [`EVENTS_PATH`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsResponse {
    pub events: Vec<Event>,
}

/// Request body of [`PARTICIPANTS_PATH`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantsRequest {
    pub event_id: String,
}

/// Response body of [`PARTICIPANTS_PATH`]: a bare array.
pub type ParticipantsResponse = Vec<Participant>;
