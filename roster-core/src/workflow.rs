//! Participant workflow session.
//!
//! One session loads the event catalog once, then lets the organizer select
//! an event, fetch its participants and export them. The session owns all
//! view state; every transition goes through a `&mut self` method so the
//! loading and exporting flags can never be observed in a half-updated state.
//!
//! Failures of the two network stages are converted to fixed user-facing
//! messages and logged; they never end the session.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::client::Backend;
use crate::error::{RosterError, RosterResult};
use crate::event::Event;
use crate::export;
use crate::participant::Participant;
use crate::table::{self, EventOption, TableRow};

pub const CATALOG_ERROR: &str = "Failed to load events. Please refresh the page.";
pub const FETCH_ERROR: &str = "Error retrieving participants. Please try again later.";

/// Where a session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    LoadingCatalog,
    CatalogError,
    CatalogReady,
    SubmittingFetch,
    FetchError,
    ParticipantsReady,
    Exporting,
}

impl Phase {
    /// Phases from which a participant fetch may be submitted.
    fn accepts_submit(self) -> bool {
        matches!(
            self,
            Phase::CatalogReady | Phase::FetchError | Phase::ParticipantsReady
        )
    }
}

/// View-model shared by the three stages.
#[derive(Debug, Clone, Default)]
pub struct WorkflowState {
    selected_event_id: String,
    events: Vec<Event>,
    participants: Vec<Participant>,
    error: Option<String>,
    loading: bool,
    exporting: bool,
}

impl WorkflowState {
    pub fn selected_event_id(&self) -> &str {
        &self.selected_event_id
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting
    }
}

/// Handle for one submitted fetch. Only the most recent ticket may settle.
#[derive(Debug)]
pub struct FetchTicket {
    generation: u64,
    event_id: String,
}

impl FetchTicket {
    pub fn event_id(&self) -> &str {
        &self.event_id
    }
}

/// Raises a flag for its lifetime and lowers it on drop, including on early
/// return through `?`.
pub(crate) struct FlagGuard<'a>(&'a mut bool);

impl<'a> FlagGuard<'a> {
    pub(crate) fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        FlagGuard(flag)
    }
}

impl Drop for FlagGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

pub struct ParticipantWorkflow<B> {
    backend: B,
    state: WorkflowState,
    phase: Phase,
    generation: u64,
    settled_phase: Phase,
}

impl<B: Backend> ParticipantWorkflow<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: WorkflowState::default(),
            phase: Phase::Idle,
            generation: 0,
            settled_phase: Phase::Idle,
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Load the event catalog. Only the first call does anything.
    pub async fn mount(&mut self) {
        if self.phase != Phase::Idle {
            debug!(phase = ?self.phase, "Catalog already requested for this session");
            return;
        }

        self.phase = Phase::LoadingCatalog;
        self.state.loading = true;
        let result = self.backend.list_events().await;
        self.state.loading = false;

        match result {
            Ok(events) => {
                info!(count = events.len(), "Loaded event catalog");
                self.state.events = events;
                self.state.error = None;
                self.phase = Phase::CatalogReady;
            }
            Err(err) => {
                warn!(error = %err, "Event catalog request failed");
                self.state.events.clear();
                self.state.error = Some(CATALOG_ERROR.to_string());
                self.phase = Phase::CatalogError;
            }
        }
    }

    pub fn options(&self) -> Vec<EventOption> {
        table::event_options(&self.state.events)
    }

    pub fn rows(&self) -> Vec<TableRow> {
        table::table_rows(&self.state.participants)
    }

    /// Select an event by id; an empty id clears the selection.
    pub fn select_event(&mut self, event_id: &str) -> RosterResult<()> {
        if self.state.loading || self.state.exporting {
            return Err(RosterError::Busy);
        }

        if !event_id.is_empty() && !self.state.events.iter().any(|e| e.id == event_id) {
            return Err(RosterError::UnknownEvent(event_id.to_string()));
        }

        self.state.selected_event_id = event_id.to_string();
        Ok(())
    }

    pub fn can_submit(&self) -> bool {
        !self.state.selected_event_id.is_empty()
            && !self.state.loading
            && !self.state.exporting
            && self.phase.accepts_submit()
    }

    /// Start a participant fetch for the selected event.
    pub fn begin_fetch(&mut self) -> RosterResult<FetchTicket> {
        if self.state.selected_event_id.is_empty() {
            return Err(RosterError::NoEventSelected);
        }
        if self.state.loading || self.state.exporting {
            return Err(RosterError::Busy);
        }
        if !self.phase.accepts_submit() {
            return Err(RosterError::CatalogNotReady);
        }

        self.generation += 1;
        self.settled_phase = self.phase;
        self.phase = Phase::SubmittingFetch;
        self.state.loading = true;

        Ok(FetchTicket {
            generation: self.generation,
            event_id: self.state.selected_event_id.clone(),
        })
    }

    /// Apply the outcome of a fetch. Returns `false` when the ticket has been
    /// superseded and the outcome was dropped.
    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        result: RosterResult<Vec<Participant>>,
    ) -> bool {
        if ticket.generation != self.generation || self.phase != Phase::SubmittingFetch {
            debug!(event_id = %ticket.event_id, "Dropping stale participant response");
            return false;
        }

        self.state.loading = false;

        match result {
            Ok(participants) => {
                info!(
                    event_id = %ticket.event_id,
                    count = participants.len(),
                    "Loaded participants"
                );
                self.state.participants = participants;
                self.state.error = None;
                self.phase = Phase::ParticipantsReady;
            }
            Err(err) => {
                warn!(event_id = %ticket.event_id, error = %err, "Participant request failed");
                self.state.participants.clear();
                self.state.error = Some(FETCH_ERROR.to_string());
                self.phase = Phase::FetchError;
            }
        }

        true
    }

    /// Abandon the in-flight fetch; its outcome will be dropped when it
    /// arrives.
    pub fn cancel_fetch(&mut self) {
        if self.phase != Phase::SubmittingFetch {
            return;
        }

        self.generation += 1;
        self.state.loading = false;
        self.phase = self.settled_phase;
    }

    /// Fetch participants for the selected event and settle the result.
    pub async fn submit(&mut self) -> RosterResult<()> {
        let ticket = self.begin_fetch()?;
        let result = self.backend.fetch_participants(ticket.event_id()).await;
        self.finish_fetch(ticket, result);
        Ok(())
    }

    pub fn can_export(&self) -> bool {
        !self.state.participants.is_empty() && !self.state.loading && !self.state.exporting
    }

    /// Write `participants.xlsx` into `dir`.
    pub fn export_to(&mut self, dir: &Path) -> RosterResult<PathBuf> {
        self.exporting(|participants| export::write_file(participants, dir))
    }

    /// Serialize the workbook without touching the filesystem.
    pub fn export_bytes(&mut self) -> RosterResult<Vec<u8>> {
        self.exporting(export::to_buffer)
    }

    fn exporting<T>(
        &mut self,
        write: impl FnOnce(&[Participant]) -> RosterResult<T>,
    ) -> RosterResult<T> {
        if self.state.participants.is_empty() {
            return Err(RosterError::NothingToExport);
        }
        if self.state.loading || self.state.exporting {
            return Err(RosterError::Busy);
        }

        let resume = self.phase;
        self.phase = Phase::Exporting;

        let result = {
            let _flag = FlagGuard::raise(&mut self.state.exporting);
            write(&self.state.participants)
        };

        self.phase = resume;
        result
    }
}
