use std::cell::RefCell;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use socialfeed_lib::types::Post;
use socialfeed_lib::{
    posts, toggle_like, Client, Feed, FeedKind, FilePart, LikeState, PostDraft, Route, Session,
    Settled,
};

#[derive(Args)]
pub struct PostsArgs {
    #[command(subcommand)]
    pub command: PostsCommand,
}

#[derive(Subcommand)]
pub enum PostsCommand {
    /// Publish a new post
    Create(DraftArgs),
    /// Replace the content of one of your posts
    Update {
        id: i64,
        #[command(flatten)]
        draft: DraftArgs,
    },
    /// Delete one of your posts
    Delete { id: i64 },
    /// Like a post
    Like { id: i64 },
    /// Remove your like from a post
    Unlike { id: i64 },
}

#[derive(Args)]
pub struct DraftArgs {
    /// Post text
    pub content: String,

    /// Image or video to attach
    #[arg(long)]
    pub media: Option<PathBuf>,
}

impl DraftArgs {
    fn to_draft(&self) -> Result<PostDraft> {
        let mut draft = PostDraft::new(&self.content);
        if let Some(path) = &self.media {
            draft = draft.with_media(FilePart::from_path(path)?);
        }
        Ok(draft)
    }
}

fn report<T>(settled: Settled<T>) -> Result<()> {
    let Settled { notice, outcome } = settled;
    outcome?;
    println!("{}", notice);
    Ok(())
}

pub async fn run(args: &PostsArgs, client: &Client, session: &Session) -> Result<()> {
    super::require_access(Route::Home, session)?;
    match &args.command {
        PostsCommand::Create(draft) => {
            let notice = posts::save(client, session, &draft.to_draft()?, None).await?;
            println!("{}", notice);
        }
        PostsCommand::Update { id, draft } => {
            let notice = posts::save(client, session, &draft.to_draft()?, Some(*id)).await?;
            println!("{}", notice);
        }
        PostsCommand::Delete { id } => {
            let mut feed: Feed<Post> = Feed::for_kind(FeedKind::Mine);
            report(feed.delete_post(client, session, *id).await)?;
        }
        PostsCommand::Like { id } => {
            let state = RefCell::new(LikeState::new(false, 0));
            report(toggle_like(client, session, &state, *id).await)?;
        }
        PostsCommand::Unlike { id } => {
            let state = RefCell::new(LikeState::new(true, 0));
            report(toggle_like(client, session, &state, *id).await)?;
        }
    }
    Ok(())
}
