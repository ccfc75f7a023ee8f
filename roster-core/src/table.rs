//! View projections: picker options and participant table rows.

use crate::event::Event;
use crate::participant::Participant;

/// Column headers of the on-screen participant table.
pub const TABLE_HEADERS: [&str; 6] = ["Name", "Email", "College", "Year", "Branch", "Phone"];

/// First picker entry; carries no value and cannot be submitted.
pub const PLACEHOLDER_OPTION: &str = "Select an event";

/// Shown instead of the table while there are no participants.
pub const EMPTY_TABLE_TEXT: &str = "Select an event to view participants";

/// One entry of the event picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOption {
    pub value: String,
    pub label: String,
}

impl From<&Event> for EventOption {
    fn from(event: &Event) -> Self {
        Self {
            value: event.id.clone(),
            label: event.label(),
        }
    }
}

/// Picker options in catalog order.
pub fn event_options(events: &[Event]) -> Vec<EventOption> {
    events.iter().map(EventOption::from).collect()
}

pub type TableRow = [String; 6];

/// One row per participant, in the order they are held.
pub fn table_rows(participants: &[Participant]) -> Vec<TableRow> {
    participants
        .iter()
        .map(|p| {
            [
                p.username.clone(),
                p.email.clone(),
                p.college.clone(),
                p.graduation_year_text(),
                p.branch.clone(),
                p.phone.clone(),
            ]
        })
        .collect()
}
