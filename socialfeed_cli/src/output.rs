use anyhow::Result;
use serde::Serialize;
use socialfeed_lib::types::{Comment, Notification, Post, User, UserSummary};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    pub fn parse(name: &str) -> Self {
        match name {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
struct PostRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Author")]
    #[serde(rename = "Author")]
    author: String,
    #[tabled(rename = "Content")]
    #[serde(rename = "Content")]
    content: String,
    #[tabled(rename = "Likes")]
    #[serde(rename = "Likes")]
    likes: String,
    #[tabled(rename = "Comments")]
    #[serde(rename = "Comments")]
    comments: i64,
    #[tabled(rename = "Posted")]
    #[serde(rename = "Posted")]
    posted: String,
}

#[derive(Tabled, Serialize)]
struct UserRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "User")]
    #[serde(rename = "User")]
    user_name: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Bio")]
    #[serde(rename = "Bio")]
    bio: String,
    #[tabled(rename = "Following")]
    #[serde(rename = "Following")]
    following: String,
}

#[derive(Tabled, Serialize)]
struct CommentRow {
    #[tabled(rename = "User")]
    #[serde(rename = "User")]
    user_name: String,
    #[tabled(rename = "Comment")]
    #[serde(rename = "Comment")]
    comment: String,
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
}

#[derive(Tabled, Serialize)]
struct NotificationRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Message")]
    #[serde(rename = "Message")]
    message: String,
    #[tabled(rename = "Read")]
    #[serde(rename = "Read")]
    read: String,
    #[tabled(rename = "When")]
    #[serde(rename = "When")]
    when: String,
}

#[derive(Tabled, Serialize)]
struct ProfileRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "User")]
    #[serde(rename = "User")]
    user_name: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    #[serde(rename = "Email")]
    email: String,
    #[tabled(rename = "Followers")]
    #[serde(rename = "Followers")]
    followers: i64,
    #[tabled(rename = "Following")]
    #[serde(rename = "Following")]
    following: i64,
    #[tabled(rename = "Posts")]
    #[serde(rename = "Posts")]
    posts: i64,
    #[tabled(rename = "Visibility")]
    #[serde(rename = "Visibility")]
    visibility: String,
}

// -- Row builders --

fn build_post_rows(posts: &[Post]) -> Vec<PostRow> {
    posts
        .iter()
        .map(|p| PostRow {
            id: p.id,
            author: p.author_name(),
            content: excerpt(&p.content, 60),
            likes: if p.is_liked_by_user {
                format!("{} (liked)", p.likes_count)
            } else {
                p.likes_count.to_string()
            },
            comments: p.comments_count,
            posted: p.created_at_human.clone().unwrap_or_default(),
        })
        .collect()
}

fn build_user_rows(users: &[UserSummary]) -> Vec<UserRow> {
    users
        .iter()
        .map(|u| UserRow {
            id: u.id,
            user_name: u.user_name.as_deref().map(handle).unwrap_or_default(),
            name: u.full_name.clone().unwrap_or_default(),
            bio: excerpt(u.bio.as_deref().unwrap_or_default(), 40),
            following: yes_no(u.is_followed()),
        })
        .collect()
}

fn build_comment_rows(comments: &[Comment]) -> Vec<CommentRow> {
    comments
        .iter()
        .map(|c| CommentRow {
            user_name: handle(&c.user.user_name),
            comment: c.comment.clone(),
            date: c
                .created_at
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        })
        .collect()
}

fn build_notification_rows(notifications: &[Notification]) -> Vec<NotificationRow> {
    notifications
        .iter()
        .map(|n| NotificationRow {
            id: n.id,
            message: n.message.clone(),
            read: yes_no(n.read),
            when: n.created_at_human.clone().unwrap_or_default(),
        })
        .collect()
}

fn build_profile_rows(user: &User) -> Vec<ProfileRow> {
    let visibility = |v: Option<socialfeed_lib::types::Visibility>| {
        v.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
    };
    vec![ProfileRow {
        id: user.id,
        user_name: user.user_name.as_deref().map(handle).unwrap_or_default(),
        name: user.full_name.clone().unwrap_or_else(|| {
            format!(
                "{} {}",
                user.first_name.as_deref().unwrap_or_default(),
                user.last_name.as_deref().unwrap_or_default()
            )
            .trim()
            .to_string()
        }),
        email: user.email.clone().unwrap_or_default(),
        followers: user.followers_count,
        following: user.following_count,
        posts: user.posts_count,
        visibility: format!(
            "posts: {}, profile: {}",
            visibility(user.post_visibility),
            visibility(user.profile_visibility)
        ),
    }]
}

// -- Printers --

fn print_rows<R: Tabled + Serialize>(rows: Vec<R>, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => print_json(&rows),
    }
    Ok(())
}

pub fn print_posts(posts: &[Post], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&posts);
            Ok(())
        }
        _ => print_rows(build_post_rows(posts), format),
    }
}

pub fn print_users(users: &[UserSummary], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&users);
            Ok(())
        }
        _ => print_rows(build_user_rows(users), format),
    }
}

pub fn print_comments(comments: &[Comment], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&comments);
            Ok(())
        }
        _ => print_rows(build_comment_rows(comments), format),
    }
}

pub fn print_notifications(notifications: &[Notification], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&notifications);
            Ok(())
        }
        _ => print_rows(build_notification_rows(notifications), format),
    }
}

pub fn print_profile(user: &User, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(user);
            Ok(())
        }
        _ => print_rows(build_profile_rows(user), format),
    }
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn handle(user_name: &str) -> String {
    format!("@{}", user_name)
}

fn yes_no(flag: bool) -> String {
    let text = if flag { "yes" } else { "no" };
    text.to_string()
}

/// First line of `text`, cut to `max` characters.
fn excerpt(text: &str, max: usize) -> String {
    let line = text.lines().next().unwrap_or_default();
    if line.chars().count() <= max && line.len() == text.trim_end().len() {
        return line.to_string();
    }
    let cut: String = line.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut.trim_end())
}
