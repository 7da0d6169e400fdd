use anyhow::Result;
use clap::{Args, Subcommand};
use folio_lib::{validation, AdminClient, BookingFilter};

use crate::output::{print_bookings, print_json, OutputFormat};

#[derive(Args)]
pub struct BookingsArgs {
    #[command(subcommand)]
    pub action: BookingsAction,
}

#[derive(Subcommand)]
pub enum BookingsAction {
    /// List bookings, soonest first
    List {
        /// Filter by status: pending, confirmed, cancelled, completed
        #[arg(long)]
        status: Option<String>,

        /// First start date to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Last start date to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Only bookings made with this guest email
        #[arg(long)]
        guest: Option<String>,
    },
    /// Change a booking's status
    SetStatus {
        id: String,

        /// New status: pending, confirmed, cancelled, completed
        status: String,

        /// Email the guest about the change
        #[arg(long)]
        notify: bool,
    },
    /// Delete a booking
    Delete { id: String },
}

pub async fn run(args: &BookingsArgs, client: &AdminClient, format: &OutputFormat) -> Result<()> {
    match &args.action {
        BookingsAction::List {
            status,
            from,
            to,
            guest,
        } => {
            let mut filter = BookingFilter::default();
            if let Some(status) = status {
                filter.status = Some(validation::validate_booking_status(status)?);
            }
            if let Some(from) = from {
                filter.from = Some(validation::validate_date(from)?);
            }
            if let Some(to) = to {
                filter.to = Some(validation::validate_date(to)?);
            }

            let guest = guest
                .as_deref()
                .map(validation::validate_email)
                .transpose()?;

            let bookings = client.list_bookings(&filter).await?;
            let mut sorted: Vec<_> = bookings
                .iter()
                .filter(|b| {
                    guest
                        .as_deref()
                        .map_or(true, |g| b.guest_email.eq_ignore_ascii_case(g))
                })
                .collect();
            folio_lib::agenda::sort_by_start(&mut sorted);

            eprintln!("{} booking(s)", sorted.len());
            print_bookings(&sorted, format);
        }
        BookingsAction::SetStatus { id, status, notify } => {
            let status = validation::validate_booking_status(status)?;
            let booking = client.update_booking_status(id, status, *notify).await?;
            match format {
                OutputFormat::Json => print_json(&booking),
                OutputFormat::Table => print_bookings(&[&booking], format),
            }
        }
        BookingsAction::Delete { id } => {
            let ack = client.delete_booking(id).await?;
            print_json(&ack);
        }
    }
    Ok(())
}
