use anyhow::Result;
use chrono::Local;
use clap::Args;
use folio_lib::agenda::{self, ViewMode};
use folio_lib::{validation, AdminClient, BookingFilter};

use crate::output::{print_agenda, OutputFormat};

#[derive(Args)]
pub struct AgendaArgs {
    /// Grid to show: week or month
    #[arg(long, default_value = "week")]
    pub view: String,

    /// Reference date (YYYY-MM-DD). Defaults to today
    #[arg(long)]
    pub date: Option<String>,

    /// Periods to move from the reference date (e.g. 1 = next, -1 = previous)
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub offset: i32,

    /// Only show bookings with this status
    #[arg(long)]
    pub status: Option<String>,
}

pub async fn run(args: &AgendaArgs, client: &AdminClient, format: &OutputFormat) -> Result<()> {
    let mode: ViewMode = args.view.parse()?;
    let reference = match args.date {
        Some(ref date) => validation::validate_date(date)?,
        None => Local::now().date_naive(),
    };
    let reference = agenda::shift(reference, mode, args.offset)?;

    let dates = agenda::visible_dates(reference, mode);
    let (first, last) = match (dates.first(), dates.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Ok(()),
    };

    let mut filter = BookingFilter::between(first, last);
    if let Some(ref status) = args.status {
        filter = filter.with_status(validation::validate_booking_status(status)?);
    }

    let bookings = client.list_bookings(&filter).await?;
    let mut cells = agenda::bucket(&dates, &bookings);
    for cell in cells.iter_mut() {
        agenda::sort_by_start(&mut cell.items);
    }

    let placed: usize = cells.iter().map(|c| c.items.len()).sum();
    eprintln!("{} booking(s) in view", placed);

    print_agenda(&agenda::period_label(reference, mode), &cells, format);
    Ok(())
}
