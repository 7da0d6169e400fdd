use anyhow::Result;
use chrono::Utc;
use clap::Args;
use folio_lib::{summary, AdminClient, BookingFilter};

use crate::output::{print_bookings, print_stats, print_status_counts, OutputFormat};

#[derive(Args)]
pub struct StatsArgs {
    /// Also list the next N pending or confirmed bookings
    #[arg(long, default_value = "0")]
    pub upcoming: usize,

    /// Also break bookings down by status
    #[arg(long)]
    pub by_status: bool,
}

pub async fn run(args: &StatsArgs, client: &AdminClient, format: &OutputFormat) -> Result<()> {
    let needs_bookings = args.upcoming > 0 || args.by_status;
    let default_filter = BookingFilter::default();
    let (stats, bookings) = if needs_bookings {
        tokio::try_join!(
            client.get_stats(),
            client.list_bookings(&default_filter)
        )?
    } else {
        (client.get_stats().await?, Vec::new())
    };

    print_stats(&stats, format);

    if args.by_status {
        print_status_counts(&summary::bookings_by_status(&bookings), format);
    }

    if args.upcoming > 0 {
        let upcoming = summary::upcoming_bookings(&bookings, Utc::now(), args.upcoming);
        eprintln!("Next {} booking(s):", upcoming.len());
        print_bookings(&upcoming, format);
    }
    Ok(())
}
