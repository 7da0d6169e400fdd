use std::collections::BTreeMap;

use folio_lib::agenda::DayCell;
use folio_lib::types::{
    AvailabilityRule, Booking, BookingStatus, ContactMessage, DashboardStats, EventType, Post,
    Project,
};
use serde::Serialize;
use folio_lib::validation::weekday_name;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Self {
        match s {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled)]
struct BookingRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "Guest")]
    guest: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Event")]
    event: String,
    #[tabled(rename = "Status")]
    status: String,
}

#[derive(Tabled)]
struct AgendaRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "Bookings")]
    bookings: String,
}

#[derive(Serialize)]
struct AgendaDay<'a> {
    date: String,
    bookings: Vec<&'a Booking>,
}

#[derive(Tabled)]
struct EventTypeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Minutes")]
    minutes: u32,
    #[tabled(rename = "Active")]
    active: String,
}

#[derive(Tabled)]
struct AvailabilityRow {
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Active")]
    active: String,
}

#[derive(Tabled)]
struct PostRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Published")]
    published: String,
}

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Tech")]
    tech: String,
    #[tabled(rename = "Featured")]
    featured: String,
}

#[derive(Tabled)]
struct MessageRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Received")]
    received: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "Subject")]
    subject: String,
    #[tabled(rename = "Read")]
    read: String,
}

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Count")]
    count: i64,
}

#[derive(Tabled)]
struct StatusRow {
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Bookings")]
    count: usize,
}

// -- Row builders --

fn yes_no(b: bool) -> String {
    let s = if b { "yes" } else { "no" };
    s.to_string()
}

fn build_booking_rows(bookings: &[&Booking]) -> Vec<BookingRow> {
    bookings
        .iter()
        .map(|b| BookingRow {
            id: b.id.clone(),
            start: b.start_time.clone(),
            guest: b.guest_name.clone(),
            email: b.guest_email.clone(),
            event: b
                .event_type_title
                .clone()
                .unwrap_or_else(|| b.event_type_id.clone()),
            status: b.status.to_string(),
        })
        .collect()
}

/// Short "09:00 Ada (confirmed)" line for an agenda cell.
fn agenda_entry(b: &Booking) -> String {
    let time = b.start_time.get(11..16).unwrap_or("--:--");
    format!("{} {} ({})", time, b.guest_name, b.status)
}

fn build_agenda_rows(cells: &[DayCell<'_, Booking>]) -> Vec<AgendaRow> {
    cells
        .iter()
        .map(|cell| AgendaRow {
            date: cell.date.format("%Y-%m-%d").to_string(),
            day: cell.date.format("%a").to_string(),
            bookings: if cell.is_empty() {
                "-".to_string()
            } else {
                cell.items
                    .iter()
                    .map(|b| agenda_entry(b))
                    .collect::<Vec<_>>()
                    .join("\n")
            },
        })
        .collect()
}

fn print_table<T: Tabled>(rows: Vec<T>) {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

// -- Public printers --

pub fn print_json<T: Serialize + ?Sized>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize output: {}", e),
    }
}

pub fn print_bookings(bookings: &[&Booking], format: &OutputFormat) {
    match format {
        OutputFormat::Table => print_table(build_booking_rows(bookings)),
        OutputFormat::Json => print_json(bookings),
    }
}

pub fn print_agenda(label: &str, cells: &[DayCell<'_, Booking>], format: &OutputFormat) {
    match format {
        OutputFormat::Table => {
            println!("{}", label);
            print_table(build_agenda_rows(cells));
        }
        OutputFormat::Json => {
            let days: Vec<AgendaDay<'_>> = cells
                .iter()
                .map(|cell| AgendaDay {
                    date: cell.date.format("%Y-%m-%d").to_string(),
                    bookings: cell.items.clone(),
                })
                .collect();
            print_json(&days);
        }
    }
}

pub fn print_event_types(event_types: &[EventType], format: &OutputFormat) {
    match format {
        OutputFormat::Table => print_table(
            event_types
                .iter()
                .map(|e| EventTypeRow {
                    id: e.id.clone(),
                    title: e.title.clone(),
                    slug: e.slug.clone(),
                    minutes: e.duration_minutes,
                    active: yes_no(e.is_active),
                })
                .collect(),
        ),
        OutputFormat::Json => print_json(event_types),
    }
}

pub fn print_availability(rules: &[AvailabilityRule], format: &OutputFormat) {
    match format {
        OutputFormat::Table => print_table(
            rules
                .iter()
                .map(|r| AvailabilityRow {
                    day: weekday_name(r.day_of_week)
                        .map(str::to_string)
                        .unwrap_or_else(|_| format!("day {}", r.day_of_week)),
                    from: r.start_time.clone(),
                    to: r.end_time.clone(),
                    active: yes_no(r.is_active),
                })
                .collect(),
        ),
        OutputFormat::Json => print_json(rules),
    }
}

pub fn print_posts(posts: &[Post], format: &OutputFormat) {
    match format {
        OutputFormat::Table => print_table(
            posts
                .iter()
                .map(|p| PostRow {
                    id: p.id.clone(),
                    title: p.title.clone(),
                    slug: p.slug.clone(),
                    published: match (p.published, p.published_at) {
                        (true, Some(at)) => at.format("%Y-%m-%d").to_string(),
                        (true, None) => "yes".to_string(),
                        (false, _) => "draft".to_string(),
                    },
                })
                .collect(),
        ),
        OutputFormat::Json => print_json(posts),
    }
}

pub fn print_projects(projects: &[Project], format: &OutputFormat) {
    match format {
        OutputFormat::Table => print_table(
            projects
                .iter()
                .map(|p| ProjectRow {
                    id: p.id.clone(),
                    title: p.title.clone(),
                    tech: p.technologies.join(", "),
                    featured: yes_no(p.featured),
                })
                .collect(),
        ),
        OutputFormat::Json => print_json(projects),
    }
}

pub fn print_messages(messages: &[&ContactMessage], format: &OutputFormat) {
    match format {
        OutputFormat::Table => print_table(
            messages
                .iter()
                .map(|m| MessageRow {
                    id: m.id.clone(),
                    received: m.created_at.format("%Y-%m-%d %H:%M").to_string(),
                    from: format!("{} <{}>", m.name, m.email),
                    subject: m.subject.clone().unwrap_or_default(),
                    read: yes_no(m.read),
                })
                .collect(),
        ),
        OutputFormat::Json => print_json(messages),
    }
}

pub fn print_stats(stats: &DashboardStats, format: &OutputFormat) {
    match format {
        OutputFormat::Table => print_table(vec![
            StatRow { metric: "Posts", count: stats.posts },
            StatRow { metric: "Projects", count: stats.projects },
            StatRow { metric: "Messages", count: stats.messages },
            StatRow { metric: "Unread messages", count: stats.unread_messages },
            StatRow { metric: "Bookings", count: stats.bookings },
            StatRow { metric: "Pending bookings", count: stats.pending_bookings },
        ]),
        OutputFormat::Json => print_json(stats),
    }
}

pub fn print_status_counts(counts: &BTreeMap<BookingStatus, usize>, format: &OutputFormat) {
    match format {
        OutputFormat::Table => print_table(
            counts
                .iter()
                .map(|(status, count)| StatusRow {
                    status: status.to_string(),
                    count: *count,
                })
                .collect(),
        ),
        OutputFormat::Json => print_json(counts),
    }
}
