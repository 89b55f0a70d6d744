use anyhow::Result;
use clap::{Args, Subcommand};
use socialfeed_lib::notifications::RECENT_LIMIT;
use socialfeed_lib::{Client, Inbox, Route, Session};

use crate::output::{print_notifications, OutputFormat};

#[derive(Args)]
pub struct NotificationsArgs {
    #[command(subcommand)]
    pub command: NotificationsCommand,
}

#[derive(Subcommand)]
pub enum NotificationsCommand {
    /// Show recent notifications
    List {
        /// Show every notification, not just the latest five
        #[arg(long)]
        all: bool,
    },
    /// Mark a notification as read
    Read { id: i64 },
}

pub async fn run(
    args: &NotificationsArgs,
    client: &Client,
    session: &Session,
    format: &OutputFormat,
) -> Result<()> {
    super::require_access(Route::Home, session)?;
    let mut inbox = Inbox::new();
    inbox.refresh(client, session).await?;

    match &args.command {
        NotificationsCommand::List { all } => {
            let items = if *all {
                inbox.items()
            } else {
                inbox.recent(RECENT_LIMIT)
            };
            print_notifications(items, format)?;
            if *format == OutputFormat::Table {
                eprintln!("{} unread", inbox.unread());
            }
        }
        NotificationsCommand::Read { id } => {
            inbox.mark_read(client, session, *id).await?;
            println!("Marked as read. {} unread.", inbox.unread());
        }
    }
    Ok(())
}
