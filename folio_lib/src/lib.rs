//! Library layer for the folio admin tools: typed admin client, agenda
//! grid, validation, and dashboard summaries.
//!
//! Wraps the `folio_api` crate with typed operations for the dashboard
//! and scheduling panel, plus the pure helpers the CLI renders from.

pub mod agenda;
pub mod client;
pub mod config;
pub mod error;
pub mod summary;
pub mod validation;

pub use folio_api;
pub use folio_api::types;
pub use folio_api::{format_error, ApiError, ClientConfig, ErrorKind, FormattedError};

pub use agenda::{DayCell, Scheduled, ViewMode};
pub use client::{AdminClient, BookingFilter};
pub use error::FolioError;
