use anyhow::Result;
use clap::Args;
use socialfeed_lib::session::{self, Credentials, Registration};
use socialfeed_lib::{gate, profile, Client, Route, Session};

use crate::output::{print_profile, OutputFormat};

#[derive(Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long, env = "SOCIALFEED_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    /// Starts with a letter; letters, digits, `.` and `_`
    #[arg(long)]
    pub user_name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long, env = "SOCIALFEED_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Defaults to --password
    #[arg(long)]
    pub password_confirmation: Option<String>,
}

fn warn_if_signed_in(route: Route, session: &Session) {
    if gate(route, session) == Route::Home {
        eprintln!("Already signed in; the current token will be replaced.");
    }
}

pub async fn login(args: &LoginArgs, client: &Client, session: &mut Session) -> Result<()> {
    warn_if_signed_in(Route::Login, session);
    let credentials = Credentials::new(&args.email, &args.password);
    let notice = session::login(client, session, &credentials).await?;
    println!("{}", notice);
    if let Some(token) = session.token() {
        println!("export SOCIALFEED_TOKEN='{}'", token);
    }
    Ok(())
}

pub async fn register(args: &RegisterArgs, client: &Client, session: &mut Session) -> Result<()> {
    warn_if_signed_in(Route::Register, session);
    let registration = Registration {
        first_name: args.first_name.clone(),
        last_name: args.last_name.clone(),
        user_name: args.user_name.clone(),
        email: args.email.clone(),
        password: args.password.clone(),
        password_confirmation: args
            .password_confirmation
            .clone()
            .unwrap_or_else(|| args.password.clone()),
    };
    let notice = session::register(client, session, &registration).await?;
    println!("{}", notice);
    match session.token() {
        Some(token) => println!("export SOCIALFEED_TOKEN='{}'", token),
        None => println!("Run `socialfeed login` to sign in."),
    }
    Ok(())
}

pub async fn logout(client: &Client, session: &mut Session) -> Result<()> {
    let notice = session::logout(client, session).await?;
    println!("{}", notice);
    Ok(())
}

pub async fn whoami(client: &Client, session: &mut Session, format: &OutputFormat) -> Result<()> {
    super::require_access(Route::Home, session)?;
    let user = profile::fetch(client, session).await?;
    print_profile(&user, format)
}
