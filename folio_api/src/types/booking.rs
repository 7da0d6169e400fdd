//! Scheduling types: bookings, event types and availability rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a booking (UUID string).
pub type BookingID = String;

/// Unique identifier for an event type (UUID string).
pub type EventTypeID = String;

/// A visitor's reservation of one slot of an event type.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: BookingID,

    pub event_type_id: EventTypeID,

    /// Title of the event type, when the endpoint joins it in.
    #[serde(default)]
    pub event_type_title: Option<String>,

    pub guest_name: String,

    pub guest_email: String,

    /// ISO 8601 timestamp as sent by the server. Kept textual: calendar
    /// placement matches on its date prefix without timezone conversion.
    pub start_time: String,

    pub end_time: String,

    pub status: BookingStatus,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Lifecycle state of a booking.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Requested, awaiting confirmation.
    Pending,
    Confirmed,
    Cancelled,
    /// The meeting took place.
    Completed,
}
impl BookingStatus {
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Cancelled,
        BookingStatus::Completed,
    ];
}
impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                BookingStatus::Pending => "pending",
                BookingStatus::Confirmed => "confirmed",
                BookingStatus::Cancelled => "cancelled",
                BookingStatus::Completed => "completed",
            }
        )
    }
}

/// Body of a booking status change.
#[derive(Serialize, Debug, Clone)]
pub struct BookingStatusUpdate {
    pub status: BookingStatus,
    /// Whether the server should email the guest about the change.
    pub notify_guest: bool,
}

/// A bookable kind of meeting (e.g. "30 min intro call").
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EventType {
    pub id: EventTypeID,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    pub duration_minutes: u32,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    pub is_active: bool,
}

/// Body for creating or editing an event type. Unset fields are left alone.
#[derive(Serialize, Debug, Clone, Default)]
pub struct EventTypeInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Weekly availability window. `day_of_week` counts from Sunday = 0.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AvailabilityRule {
    pub id: String,
    pub day_of_week: u8,
    /// `HH:MM`, local to the site owner.
    pub start_time: String,
    pub end_time: String,
    pub is_active: bool,
}
