use anyhow::Result;
use clap::{Args, Subcommand};
use folio_lib::{summary, AdminClient};

use crate::output::{print_json, print_messages, OutputFormat};

#[derive(Args)]
pub struct MessagesArgs {
    #[command(subcommand)]
    pub action: MessagesAction,
}

#[derive(Subcommand)]
pub enum MessagesAction {
    /// List contact messages, newest first
    List {
        /// Only unread messages
        #[arg(long)]
        unread: bool,
    },
    /// Mark a message as read
    Read {
        id: String,

        /// Mark as unread instead
        #[arg(long)]
        unread: bool,
    },
    /// Delete a message
    Delete { id: String },
}

pub async fn run(args: &MessagesArgs, client: &AdminClient, format: &OutputFormat) -> Result<()> {
    match &args.action {
        MessagesAction::List { unread } => {
            let messages = client.list_messages().await?;
            eprintln!(
                "{} message(s), {} unread",
                messages.len(),
                summary::unread_count(&messages)
            );

            let mut shown: Vec<_> = messages.iter().filter(|m| !*unread || !m.read).collect();
            shown.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            print_messages(&shown, format);
        }
        MessagesAction::Read { id, unread } => {
            let ack = client.mark_message_read(id, !*unread).await?;
            print_json(&ack);
        }
        MessagesAction::Delete { id } => {
            let ack = client.delete_message(id).await?;
            print_json(&ack);
        }
    }
    Ok(())
}
