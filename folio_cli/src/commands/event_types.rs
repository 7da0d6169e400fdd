use anyhow::Result;
use clap::{Args, Subcommand};
use folio_lib::types::EventTypeInput;
use folio_lib::{validation, AdminClient};

use crate::output::{print_event_types, print_json, OutputFormat};

#[derive(Args)]
pub struct EventTypesArgs {
    #[command(subcommand)]
    pub action: EventTypesAction,
}

#[derive(Subcommand)]
pub enum EventTypesAction {
    /// List event types
    List,
    /// Create an event type
    Create {
        /// Display title (e.g. "Intro call")
        #[arg(long)]
        title: String,

        /// URL slug. Derived from the title when omitted
        #[arg(long)]
        slug: Option<String>,

        /// Duration in minutes
        #[arg(long, default_value = "30")]
        duration: u32,

        #[arg(long)]
        description: Option<String>,

        /// Meeting location or video link
        #[arg(long)]
        location: Option<String>,

        /// Create the event type disabled
        #[arg(long)]
        inactive: bool,
    },
    /// Enable or disable an event type
    Toggle {
        id: String,

        /// Disable instead of enable
        #[arg(long)]
        off: bool,
    },
    /// Delete an event type
    Delete { id: String },
}

pub async fn run(args: &EventTypesArgs, client: &AdminClient, format: &OutputFormat) -> Result<()> {
    match &args.action {
        EventTypesAction::List => {
            let event_types = client.list_event_types().await?;
            print_event_types(&event_types, format);
        }
        EventTypesAction::Create {
            title,
            slug,
            duration,
            description,
            location,
            inactive,
        } => {
            let title = validation::validate_title(title)?;
            let slug = match slug {
                Some(slug) => validation::validate_slug(slug)?,
                None => validation::validate_slug(&validation::slugify(&title))?,
            };
            let input = EventTypeInput {
                title: Some(title),
                slug: Some(slug),
                description: description
                    .as_deref()
                    .map(|d| validation::sanitize_text(d, 2000))
                    .transpose()?,
                duration_minutes: Some(validation::validate_duration(*duration)?),
                location: location.clone(),
                is_active: Some(!*inactive),
            };
            let created = client.create_event_type(&input).await?;
            print_event_types(&[created], format);
        }
        EventTypesAction::Toggle { id, off } => {
            let input = EventTypeInput {
                is_active: Some(!*off),
                ..EventTypeInput::default()
            };
            let updated = client.update_event_type(id, &input).await?;
            print_event_types(&[updated], format);
        }
        EventTypesAction::Delete { id } => {
            let ack = client.delete_event_type(id).await?;
            print_json(&ack);
        }
    }
    Ok(())
}
