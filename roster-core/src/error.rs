//! Error types for roster.

use thiserror::Error;

/// Errors that can occur while talking to the backend or exporting.
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server responded with {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Malformed response payload: {0}")]
    Payload(String),

    #[error("Event '{0}' is not in the catalog")]
    UnknownEvent(String),

    #[error("No event selected")]
    NoEventSelected,

    #[error("Another request is still in flight")]
    Busy,

    #[error("The event catalog has not been loaded")]
    CatalogNotReady,

    #[error("No participants to export")]
    NothingToExport,

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),
}

/// Result type alias for roster operations.
pub type RosterResult<T> = Result<T, RosterError>;
