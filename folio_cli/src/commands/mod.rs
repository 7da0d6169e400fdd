//! CLI subcommand implementations.

pub mod agenda;
pub mod availability;
pub mod bookings;
pub mod event_types;
pub mod messages;
pub mod posts;
pub mod projects;
pub mod stats;
