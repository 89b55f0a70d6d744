mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use socialfeed_lib::{Config, Session};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "socialfeed")]
#[command(about = "Read and post to a social feed from the terminal")]
struct Cli {
    /// Output format: table, json, csv or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Bearer token printed by `login`
    #[arg(long, env = "SOCIALFEED_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and print a token
    Login(commands::auth::LoginArgs),
    /// Create an account
    Register(commands::auth::RegisterArgs),
    /// Invalidate the current token
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Browse the explore feed or your own posts
    Feed(commands::feed::FeedArgs),
    /// Create, edit, delete and like posts
    Posts(commands::posts::PostsArgs),
    /// Read and write comments
    Comments(commands::comments::CommentsArgs),
    /// List notifications or mark them read
    Notifications(commands::notifications::NotificationsArgs),
    /// Search and follow people
    Users(commands::users::UsersArgs),
    /// View or edit your profile
    Profile(commands::profile::ProfileArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("socialfeed=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output);

    let client = Config::from_env()?.client()?;
    let mut session = cli
        .token
        .as_deref()
        .map(Session::with_token)
        .unwrap_or_default();

    match &cli.command {
        Commands::Login(args) => commands::auth::login(args, &client, &mut session).await?,
        Commands::Register(args) => commands::auth::register(args, &client, &mut session).await?,
        Commands::Logout => commands::auth::logout(&client, &mut session).await?,
        Commands::Whoami => commands::auth::whoami(&client, &mut session, &format).await?,
        Commands::Feed(args) => commands::feed::run(args, &client, &session, &format).await?,
        Commands::Posts(args) => commands::posts::run(args, &client, &session).await?,
        Commands::Comments(args) => commands::comments::run(args, &client, &session, &format).await?,
        Commands::Notifications(args) => {
            commands::notifications::run(args, &client, &session, &format).await?
        }
        Commands::Users(args) => commands::users::run(args, &client, &session, &format).await?,
        Commands::Profile(args) => commands::profile::run(args, &client, &mut session, &format).await?,
    }

    Ok(())
}
