use anyhow::Result;
use clap::{Args, Subcommand};
use socialfeed_lib::{Client, CommentThread, Route, Session};

use crate::output::{print_comments, OutputFormat};

#[derive(Args)]
pub struct CommentsArgs {
    #[command(subcommand)]
    pub command: CommentsCommand,
}

#[derive(Subcommand)]
pub enum CommentsCommand {
    /// Show the comments on a post
    List { post_id: i64 },
    /// Comment on a post
    Add { post_id: i64, text: String },
}

pub async fn run(args: &CommentsArgs, client: &Client, session: &Session, format: &OutputFormat) -> Result<()> {
    super::require_access(Route::Home, session)?;
    match &args.command {
        CommentsCommand::List { post_id } => {
            let mut thread = CommentThread::for_post(*post_id, 0);
            thread.toggle_visibility(client, session).await?;
            print_comments(&thread.comments, format)?;
        }
        CommentsCommand::Add { post_id, text } => {
            let mut thread = CommentThread::for_post(*post_id, 0);
            let notice = thread.submit(client, session, text).await?;
            println!("{}", notice);
            print_comments(&thread.comments, format)?;
        }
    }
    Ok(())
}
