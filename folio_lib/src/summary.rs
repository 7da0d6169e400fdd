//! Dashboard summaries computed from already fetched data.
//!
//! Nothing here touches the network.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use folio_api::types::{Booking, BookingStatus, ContactMessage};

/// Counts bookings per status. Every status appears, possibly with zero.
pub fn bookings_by_status(bookings: &[Booking]) -> BTreeMap<BookingStatus, usize> {
    let mut counts: BTreeMap<BookingStatus, usize> =
        BookingStatus::ALL.iter().map(|s| (*s, 0)).collect();
    for booking in bookings {
        *counts.entry(booking.status).or_default() += 1;
    }
    counts
}

/// Parses a booking's start timestamp. Unparseable timestamps yield `None`.
fn start_instant(booking: &Booking) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&booking.start_time)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Pending or confirmed bookings starting at or after `now`, soonest first.
///
/// Bookings whose start cannot be parsed are skipped with a warning.
pub fn upcoming_bookings(bookings: &[Booking], now: DateTime<Utc>, limit: usize) -> Vec<&Booking> {
    let mut upcoming: Vec<(DateTime<Utc>, &Booking)> = bookings
        .iter()
        .filter(|b| matches!(b.status, BookingStatus::Pending | BookingStatus::Confirmed))
        .filter_map(|b| match start_instant(b) {
            Some(start) => Some((start, b)),
            None => {
                tracing::warn!("Skipping booking {} with unparseable start {}", b.id, b.start_time);
                None
            }
        })
        .filter(|(start, _)| *start >= now)
        .collect();
    upcoming.sort_by_key(|(start, _)| *start);
    upcoming.truncate(limit);
    upcoming.into_iter().map(|(_, b)| b).collect()
}

/// Number of contact messages not yet marked read.
pub fn unread_count(messages: &[ContactMessage]) -> usize {
    messages.iter().filter(|m| !m.read).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn booking(id: &str, start: &str, status: BookingStatus) -> Booking {
        Booking {
            id: id.to_string(),
            event_type_id: "et-1".to_string(),
            event_type_title: None,
            guest_name: "Guest".to_string(),
            guest_email: "guest@example.com".to_string(),
            start_time: start.to_string(),
            end_time: start.to_string(),
            status,
            notes: None,
            created_at: None,
        }
    }

    fn message(read: bool) -> ContactMessage {
        ContactMessage {
            id: "m".to_string(),
            name: "n".to_string(),
            email: "e@example.com".to_string(),
            subject: None,
            message: "hi".to_string(),
            read,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn counts_include_every_status() {
        let bookings = vec![
            booking("1", "2024-03-15T09:00:00Z", BookingStatus::Pending),
            booking("2", "2024-03-15T10:00:00Z", BookingStatus::Pending),
            booking("3", "2024-03-15T11:00:00Z", BookingStatus::Cancelled),
        ];
        let counts = bookings_by_status(&bookings);
        assert_eq!(counts.len(), 4);
        assert_eq!(counts[&BookingStatus::Pending], 2);
        assert_eq!(counts[&BookingStatus::Cancelled], 1);
        assert_eq!(counts[&BookingStatus::Confirmed], 0);
    }

    #[test]
    fn upcoming_filters_sorts_and_limits() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
        let bookings = vec![
            booking("past", "2024-03-15T09:00:00Z", BookingStatus::Confirmed),
            booking("later", "2024-03-17T09:00:00Z", BookingStatus::Confirmed),
            booking("cancelled", "2024-03-16T09:00:00Z", BookingStatus::Cancelled),
            booking("soon", "2024-03-15T12:00:00+01:00", BookingStatus::Pending),
            booking("broken", "tomorrow", BookingStatus::Pending),
            booking("last", "2024-03-20T09:00:00Z", BookingStatus::Pending),
        ];
        let ids: Vec<&str> = upcoming_bookings(&bookings, now, 2)
            .iter()
            .map(|b| b.id.as_str())
            .collect();
        assert_eq!(ids, vec!["soon", "later"]);
    }

    #[test]
    fn unread() {
        assert_eq!(unread_count(&[message(false), message(true), message(false)]), 2);
        assert_eq!(unread_count(&[]), 0);
    }
}
