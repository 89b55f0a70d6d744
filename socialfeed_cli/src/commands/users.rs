use anyhow::Result;
use clap::{Args, Subcommand};
use socialfeed_lib::{Client, Route, Session, UserSearch};

use crate::output::{print_users, OutputFormat};

#[derive(Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Subcommand)]
pub enum UsersCommand {
    /// Find people by name; lists everyone without a term
    Search { term: Option<String> },
    /// Follow a user
    Follow { id: i64 },
}

pub async fn run(args: &UsersArgs, client: &Client, session: &Session, format: &OutputFormat) -> Result<()> {
    match &args.command {
        UsersCommand::Search { term } => {
            let route = term
                .as_deref()
                .and_then(Route::search)
                .unwrap_or(Route::Home);
            super::require_access(route, session)?;
            let mut search = UserSearch::new();
            let users = search.run(client, session, term.as_deref()).await?;
            print_users(users, format)?;
        }
        UsersCommand::Follow { id } => {
            super::require_access(Route::Home, session)?;
            let mut search = UserSearch::new();
            search.run(client, session, None).await?;
            let notice = search.follow(client, session, *id).await?;
            println!("{}", notice);
        }
    }
    Ok(())
}
