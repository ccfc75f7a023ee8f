//! Core types for roster.
//!
//! This crate holds everything the participant screen needs apart from the
//! terminal itself:
//! - `Event` and `Participant` as served by the event backend
//! - `client` for the two backend endpoints
//! - `workflow` for the catalog → fetch → export session state
//! - `export` for the participants spreadsheet

pub mod client;
pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod participant;
pub mod protocol;
pub mod table;
pub mod workflow;

#[cfg(test)]
mod testing;

pub use event::Event;
pub use participant::{GraduationYear, Participant};
