//! Input checks for values typed on the command line before they are sent
//! to the admin API.

use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveTime};
use folio_api::types::BookingStatus;
use regex::Regex;

use crate::error::FolioError;

pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_SLUG_LENGTH: usize = 100;
pub const MAX_EMAIL_LENGTH: usize = 254;
pub const MAX_DURATION_MINUTES: u32 = 8 * 60;

fn slug_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug pattern compiles"))
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles")
    })
}

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, FolioError> {
    if input.len() > max_len {
        return Err(FolioError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(FolioError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate a post or event type title.
pub fn validate_title(input: &str) -> Result<String, FolioError> {
    sanitize_text(input, MAX_TITLE_LENGTH)
}

/// Validate a URL slug: lowercase letters, digits, single dashes between words.
pub fn validate_slug(input: &str) -> Result<String, FolioError> {
    let trimmed = input.trim();
    if trimmed.len() > MAX_SLUG_LENGTH {
        return Err(FolioError::InvalidInput(format!(
            "slug exceeds maximum length of {} bytes",
            MAX_SLUG_LENGTH
        )));
    }
    if slug_re().is_match(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(FolioError::InvalidInput(format!(
            "invalid slug '{}'. Use lowercase letters, digits and dashes (e.g. intro-call)",
            input
        )))
    }
}

/// Turn a title into a slug candidate ("Intro Call!" -> "intro-call").
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Validate an email address shape. Deliverability is the server's problem.
pub fn validate_email(input: &str) -> Result<String, FolioError> {
    let trimmed = input.trim();
    if trimmed.len() <= MAX_EMAIL_LENGTH && email_re().is_match(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(FolioError::InvalidInput(format!(
            "invalid email address '{}'",
            input
        )))
    }
}

/// Validate a booking status: case-insensitive, accepts "canceled" too.
pub fn validate_booking_status(input: &str) -> Result<BookingStatus, FolioError> {
    match input.trim().to_lowercase().as_str() {
        "pending" => Ok(BookingStatus::Pending),
        "confirmed" | "confirm" => Ok(BookingStatus::Confirmed),
        "cancelled" | "canceled" | "cancel" => Ok(BookingStatus::Cancelled),
        "completed" | "done" => Ok(BookingStatus::Completed),
        _ => Err(FolioError::InvalidInput(format!(
            "unknown booking status '{}'. Valid values: pending, confirmed, cancelled, completed",
            input
        ))),
    }
}

/// Validate a date in YYYY-MM-DD format.
pub fn validate_date(input: &str) -> Result<NaiveDate, FolioError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        FolioError::InvalidInput(format!(
            "invalid date '{}', expected YYYY-MM-DD",
            input
        ))
    })
}

/// Validate a time of day in HH:MM format.
pub fn validate_time_of_day(input: &str) -> Result<NaiveTime, FolioError> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M").map_err(|_| {
        FolioError::InvalidInput(format!("invalid time '{}', expected HH:MM", input))
    })
}

/// Validate a meeting duration (must be 5..=480 minutes, multiple of 5).
pub fn validate_duration(minutes: u32) -> Result<u32, FolioError> {
    if !(5..=MAX_DURATION_MINUTES).contains(&minutes) || minutes % 5 != 0 {
        return Err(FolioError::InvalidInput(format!(
            "duration must be a multiple of 5 between 5 and {} minutes",
            MAX_DURATION_MINUTES
        )));
    }
    Ok(minutes)
}

/// Name of a weekday as counted by availability rules (Sunday = 0).
pub fn weekday_name(day_of_week: u8) -> Result<&'static str, FolioError> {
    const NAMES: [&str; 7] = [
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ];
    NAMES
        .get(day_of_week as usize)
        .copied()
        .ok_or_else(|| FolioError::InvalidInput(format!("day_of_week {} out of range 0-6", day_of_week)))
}
