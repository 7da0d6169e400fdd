mod commands;
mod output;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio_lib::{format_error, AdminClient, ApiError, ClientConfig};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Manage bookings and site content from the folio admin API")]
struct Cli {
    /// Output format: table or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Site origin, overrides FOLIO_ORIGIN (e.g. https://example.com)
    #[arg(long, global = true)]
    origin: Option<String>,

    /// Prefix for relative endpoints, overrides FOLIO_API_BASE
    #[arg(long, global = true)]
    base_path: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show bookings on a week or month grid
    Agenda(commands::agenda::AgendaArgs),
    /// List and manage bookings
    Bookings(commands::bookings::BookingsArgs),
    /// List and manage bookable event types
    EventTypes(commands::event_types::EventTypesArgs),
    /// Show weekly availability rules
    Availability(commands::availability::AvailabilityArgs),
    /// List and manage blog posts
    Posts(commands::posts::PostsArgs),
    /// List and manage portfolio projects
    Projects(commands::projects::ProjectsArgs),
    /// Read and manage contact messages
    Messages(commands::messages::MessagesArgs),
    /// Show dashboard counters
    Stats(commands::stats::StatsArgs),
}

fn build_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = folio_lib::config::from_env()?;
    if let Some(ref origin) = cli.origin {
        config = ClientConfig {
            base_path: config.base_path,
            session_cookie: config.session_cookie,
            timeout: config.timeout,
            ..ClientConfig::with_origin(origin)
                .with_context(|| format!("invalid --origin '{}'", origin))?
        };
    }
    if let Some(ref base) = cli.base_path {
        config = config.base_path(base.as_str());
    }
    Ok(config)
}

async fn run(cli: Cli) -> Result<()> {
    let format = OutputFormat::parse(&cli.output);

    let client = AdminClient::new(build_config(&cli)?)?;
    if !client.is_configured() {
        tracing::info!("No origin configured, talking to {}", client.api().config().origin);
    }

    match &cli.command {
        Commands::Agenda(args) => commands::agenda::run(args, &client, &format).await?,
        Commands::Bookings(args) => commands::bookings::run(args, &client, &format).await?,
        Commands::EventTypes(args) => commands::event_types::run(args, &client, &format).await?,
        Commands::Availability(args) => commands::availability::run(args, &client, &format).await?,
        Commands::Posts(args) => commands::posts::run(args, &client, &format).await?,
        Commands::Projects(args) => commands::projects::run(args, &client, &format).await?,
        Commands::Messages(args) => commands::messages::run(args, &client, &format).await?,
        Commands::Stats(args) => commands::stats::run(args, &client, &format).await?,
    }

    Ok(())
}

fn report(err: &anyhow::Error) {
    let source: &(dyn std::error::Error + 'static) = err.as_ref();
    let formatted = format_error(source);
    eprintln!("Error: {}", formatted.message);
    if let Some(details) = formatted.details {
        for line in details.lines() {
            eprintln!("  {}", line);
        }
    }

    let auth = err
        .chain()
        .find_map(|e| e.downcast_ref::<ApiError>())
        .is_some_and(ApiError::is_auth_error);
    if auth {
        eprintln!("Sign in to the dashboard again and update FOLIO_SESSION.");
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("folio=info".parse().unwrap()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}
