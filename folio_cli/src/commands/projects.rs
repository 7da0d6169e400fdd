use anyhow::Result;
use clap::{Args, Subcommand};
use folio_lib::AdminClient;

use crate::output::{print_json, print_projects, OutputFormat};

#[derive(Args)]
pub struct ProjectsArgs {
    #[command(subcommand)]
    pub action: ProjectsAction,
}

#[derive(Subcommand)]
pub enum ProjectsAction {
    /// List portfolio projects
    List,
    /// Delete a project
    Delete { id: String },
}

pub async fn run(args: &ProjectsArgs, client: &AdminClient, format: &OutputFormat) -> Result<()> {
    match &args.action {
        ProjectsAction::List => {
            let projects = client.list_projects().await?;
            print_projects(&projects, format);
        }
        ProjectsAction::Delete { id } => {
            let ack = client.delete_project(id).await?;
            print_json(&ack);
        }
    }
    Ok(())
}
