use std::fmt;

use serde::{Deserialize, Serialize};

/// A selectable event from the backend catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "eventName")]
    pub event_name: String,
    pub day: i64,
}

impl Event {
    /// Label shown in the event picker, e.g. "Hackathon (Day 2)".
    pub fn label(&self) -> String {
        format!("{} (Day {})", self.event_name, self.day)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
