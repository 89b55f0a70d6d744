use anyhow::Result;
use clap::Args;
use socialfeed_lib::types::Post;
use socialfeed_lib::validation;
use socialfeed_lib::{Client, Feed, FeedKind, Route, Session};

use crate::output::{print_posts, OutputFormat};

#[derive(Args)]
pub struct FeedArgs {
    /// Show your own posts instead of the explore feed
    #[arg(long)]
    pub mine: bool,

    /// How many pages to load
    #[arg(long, default_value = "1")]
    pub pages: u32,
}

pub async fn run(args: &FeedArgs, client: &Client, session: &Session, format: &OutputFormat) -> Result<()> {
    super::require_access(Route::Home, session)?;
    let kind = if args.mine { FeedKind::Mine } else { FeedKind::Explore };
    let pages = validation::validate_page_count(args.pages)?;
    let mut feed: Feed<Post> = Feed::for_kind(kind);

    for _ in 0..pages {
        if !feed.has_more() {
            break;
        }
        feed.load_next_page(client, session).await?;
    }

    print_posts(feed.items(), format)?;
    if *format == OutputFormat::Table && !feed.has_more() {
        eprintln!("No more posts.");
    }
    Ok(())
}
