use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use socialfeed_lib::{profile, Client, FilePart, ProfileUpdate, Route, Session};

use crate::output::{print_profile, OutputFormat};

#[derive(Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommand,
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Show your profile
    Show,
    /// Change profile fields; anything omitted keeps its current value
    Update(UpdateArgs),
}

#[derive(Args)]
pub struct UpdateArgs {
    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub bio: Option<String>,

    /// public, private or friends
    #[arg(long)]
    pub post_visibility: Option<String>,

    /// public, private or friends
    #[arg(long)]
    pub profile_visibility: Option<String>,

    #[arg(long)]
    pub profile_picture: Option<PathBuf>,

    #[arg(long)]
    pub cover_photo: Option<PathBuf>,
}

impl UpdateArgs {
    fn apply(&self, form: &mut ProfileUpdate) -> Result<()> {
        let text_fields = [
            (&self.email, &mut form.email),
            (&self.first_name, &mut form.first_name),
            (&self.last_name, &mut form.last_name),
            (&self.bio, &mut form.bio),
            (&self.post_visibility, &mut form.post_visibility),
            (&self.profile_visibility, &mut form.profile_visibility),
        ];
        for (arg, field) in text_fields {
            if let Some(value) = arg {
                *field = value.clone();
            }
        }
        if let Some(path) = &self.profile_picture {
            form.profile_picture = Some(FilePart::from_path(path)?);
        }
        if let Some(path) = &self.cover_photo {
            form.cover_photo = Some(FilePart::from_path(path)?);
        }
        Ok(())
    }
}

pub async fn run(
    args: &ProfileArgs,
    client: &Client,
    session: &mut Session,
    format: &OutputFormat,
) -> Result<()> {
    super::require_access(Route::Home, session)?;
    let current = profile::fetch(client, session).await?;
    match &args.command {
        ProfileCommand::Show => print_profile(&current, format)?,
        ProfileCommand::Update(update) => {
            let mut form = ProfileUpdate::from_user(&current);
            update.apply(&mut form)?;
            let notice = profile::update(client, session, &form).await?;
            println!("{}", notice);
        }
    }
    Ok(())
}
