use regex::Regex;
use socialfeed_api::types::Visibility;

use crate::error::SocialFeedError;

pub const MAX_SEARCH_LENGTH: usize = 100;
pub const MAX_NAME_LENGTH: usize = 50;
pub const MAX_BIO_LENGTH: usize = 250;
pub const MAX_USER_NAME_LENGTH: usize = 30;
pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MAX_COMMENT_LENGTH: usize = 1000;
pub const MAX_POST_LENGTH: usize = 5000;

/// Loose check used on the sign-in and sign-up forms: something@something.
const LOOSE_EMAIL_PATTERN: &str = r"^\S+@\S+$";
/// Stricter check used on the profile form.
const STRICT_EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";
const USER_NAME_PATTERN: &str = r"^[a-zA-Z][a-zA-Z0-9._]*$";
const USER_NAME_REPEAT_PATTERN: &str = r"[_.]{2}";

fn pattern(re: &str) -> Result<Regex, SocialFeedError> {
    Regex::new(re)
        .map_err(|e| SocialFeedError::InvalidInput(format!("pattern compile error: {}", e)))
}

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a character-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, SocialFeedError> {
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ' || *c == '\n')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.chars().count() > max_len {
        return Err(SocialFeedError::InvalidInput(format!(
            "input exceeds maximum length of {} characters",
            max_len
        )));
    }
    if sanitized.is_empty() {
        return Err(SocialFeedError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

fn required(input: &str, label: &str, max_len: usize) -> Result<String, SocialFeedError> {
    match sanitize_text(input, usize::MAX) {
        Err(_) => Err(SocialFeedError::InvalidInput(format!("{} is required", label))),
        Ok(text) if text.chars().count() > max_len => Err(SocialFeedError::InvalidInput(format!(
            "{} can't be longer than {} characters",
            label, max_len
        ))),
        Ok(text) => Ok(text),
    }
}

/// Validate a search term: enforce length, strip control chars, trim.
pub fn validate_search(input: &str) -> Result<String, SocialFeedError> {
    sanitize_text(input, MAX_SEARCH_LENGTH)
}

/// Validate a sign-in/sign-up email address.
pub fn validate_email(input: &str) -> Result<String, SocialFeedError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SocialFeedError::InvalidInput("Email is required".to_string()));
    }
    if !pattern(LOOSE_EMAIL_PATTERN)?.is_match(trimmed) {
        return Err(SocialFeedError::InvalidInput("Invalid email address".to_string()));
    }
    Ok(trimmed.to_string())
}

/// Validate the email on the profile form, which requires a dotted domain.
pub fn validate_profile_email(input: &str) -> Result<String, SocialFeedError> {
    let trimmed = validate_email(input)?;
    if !pattern(STRICT_EMAIL_PATTERN)?.is_match(&trimmed) {
        return Err(SocialFeedError::InvalidInput("Invalid email address".to_string()));
    }
    Ok(trimmed)
}

/// Validate a user name: starts with a letter, 1-30 characters of letters,
/// digits, `.` and `_`, never two of `.`/`_` in a row.
pub fn validate_user_name(input: &str) -> Result<String, SocialFeedError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SocialFeedError::InvalidInput("User name is required".to_string()));
    }
    let valid = trimmed.chars().count() <= MAX_USER_NAME_LENGTH
        && pattern(USER_NAME_PATTERN)?.is_match(trimmed)
        && !pattern(USER_NAME_REPEAT_PATTERN)?.is_match(trimmed);
    if !valid {
        return Err(SocialFeedError::InvalidInput(
            "Username must start with a letter, be 1-30 characters long, and not contain consecutive underscores or dots"
                .to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Validate a first or last name (required, at most 50 characters).
pub fn validate_name(input: &str, label: &str) -> Result<String, SocialFeedError> {
    required(input, label, MAX_NAME_LENGTH)
}

/// Validate a bio (required, at most 250 characters).
pub fn validate_bio(input: &str) -> Result<String, SocialFeedError> {
    required(input, "Bio", MAX_BIO_LENGTH)
}

/// A password only needs a minimum length. It is never trimmed.
pub fn validate_password(input: &str) -> Result<String, SocialFeedError> {
    if input.is_empty() {
        return Err(SocialFeedError::InvalidInput("Password is required".to_string()));
    }
    if input.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(SocialFeedError::InvalidInput(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(input.to_string())
}

/// The confirmation must repeat the password exactly.
pub fn validate_password_confirmation(password: &str, confirmation: &str) -> Result<(), SocialFeedError> {
    if confirmation.is_empty() {
        return Err(SocialFeedError::InvalidInput(
            "Please confirm your password".to_string(),
        ));
    }
    if password != confirmation {
        return Err(SocialFeedError::InvalidInput("Passwords do not match".to_string()));
    }
    Ok(())
}

/// Validate a visibility setting: public, private or friends, case-insensitive.
pub fn validate_visibility(input: &str) -> Result<Visibility, SocialFeedError> {
    input.trim().to_lowercase().parse::<Visibility>().map_err(|_| {
        SocialFeedError::InvalidInput(format!(
            "unknown visibility '{}'. Valid values: public, private, friends",
            input
        ))
    })
}

/// Validate post content (required).
pub fn validate_post_content(input: &str) -> Result<String, SocialFeedError> {
    required(input, "Content", MAX_POST_LENGTH)
}

/// Validate comment text (required).
pub fn validate_comment(input: &str) -> Result<String, SocialFeedError> {
    required(input, "Comment", MAX_COMMENT_LENGTH)
}

/// How many feed pages to load in one go; zero would load nothing.
pub fn validate_page_count(pages: u32) -> Result<u32, SocialFeedError> {
    if pages == 0 {
        return Err(SocialFeedError::InvalidInput(
            "At least one page must be loaded".to_string(),
        ));
    }
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Email --

    #[test]
    fn email_valid() {
        assert_eq!(validate_email(" jane@example.com ").unwrap(), "jane@example.com");
    }

    #[test]
    fn email_loose_allows_bare_host() {
        assert!(validate_email("jane@localhost").is_ok());
    }

    #[test]
    fn email_missing_at() {
        assert!(validate_email("jane.example.com").is_err());
    }

    #[test]
    fn email_empty() {
        let err = validate_email("").unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: Email is required");
    }

    #[test]
    fn profile_email_requires_domain_suffix() {
        assert!(validate_profile_email("jane@localhost").is_err());
        assert!(validate_profile_email("jane@example.co").is_ok());
    }

    // -- User name --

    #[test]
    fn user_name_valid() {
        assert_eq!(validate_user_name("jane_doe.1").unwrap(), "jane_doe.1");
    }

    #[test]
    fn user_name_single_letter() {
        assert!(validate_user_name("j").is_ok());
    }

    #[test]
    fn user_name_must_start_with_letter() {
        assert!(validate_user_name("1jane").is_err());
        assert!(validate_user_name("_jane").is_err());
    }

    #[test]
    fn user_name_rejects_consecutive_separators() {
        assert!(validate_user_name("jane__doe").is_err());
        assert!(validate_user_name("jane._doe").is_err());
        assert!(validate_user_name("jane.doe").is_ok());
    }

    #[test]
    fn user_name_length_limit() {
        assert!(validate_user_name(&format!("a{}", "b".repeat(29))).is_ok());
        assert!(validate_user_name(&format!("a{}", "b".repeat(30))).is_err());
    }

    #[test]
    fn user_name_rejects_spaces() {
        assert!(validate_user_name("jane doe").is_err());
    }

    // -- Password --

    #[test]
    fn password_min_length() {
        assert!(validate_password("12345").is_err());
        assert!(validate_password("123456").is_ok());
    }

    #[test]
    fn password_not_trimmed() {
        assert_eq!(validate_password(" abcde ").unwrap(), " abcde ");
    }

    #[test]
    fn password_confirmation_mismatch() {
        let err = validate_password_confirmation("secret1", "secret2").unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: Passwords do not match");
        assert!(validate_password_confirmation("secret1", "").is_err());
        assert!(validate_password_confirmation("secret1", "secret1").is_ok());
    }

    // -- Names and bio --

    #[test]
    fn name_limits() {
        assert!(validate_name(&"a".repeat(50), "First Name").is_ok());
        let err = validate_name(&"a".repeat(51), "First Name").unwrap_err();
        assert!(err.to_string().contains("First Name can't be longer than 50"));
        assert!(validate_name("   ", "Last Name").is_err());
    }

    #[test]
    fn bio_limit_counts_characters_not_bytes() {
        assert!(validate_bio(&"é".repeat(250)).is_ok());
        assert!(validate_bio(&"é".repeat(251)).is_err());
    }

    // -- Visibility --

    #[test]
    fn visibility_values() {
        assert_eq!(validate_visibility("Public").unwrap(), Visibility::Public);
        assert_eq!(validate_visibility("friends").unwrap(), Visibility::Friends);
        assert!(validate_visibility("everyone").is_err());
        assert!(validate_visibility("").is_err());
    }

    // -- Content --

    #[test]
    fn post_content_required() {
        assert!(validate_post_content(" \n ").is_err());
        assert_eq!(validate_post_content("  hello\n").unwrap(), "hello");
    }

    #[test]
    fn comment_strips_control_chars() {
        assert_eq!(validate_comment("nice\u{0007} one").unwrap(), "nice one");
    }

    #[test]
    fn search_too_long() {
        assert!(validate_search(&"a".repeat(101)).is_err());
    }

    #[test]
    fn page_count_must_be_positive() {
        assert!(validate_page_count(0).is_err());
        assert_eq!(validate_page_count(3).unwrap(), 3);
    }
}
