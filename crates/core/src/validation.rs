//! Content validation for submitted comment and note payloads.

use crate::error::CoreError;
use crate::policy::ContentPolicy;

pub const FIELD_TEXT: &str = "text";
pub const FIELD_TITLE: &str = "title";
pub const FIELD_SLUG: &str = "slug";
pub const FIELD_USERNAME: &str = "username";

/// Message for a required field left blank.
pub const REQUIRED_MESSAGE: &str = "Обязательное поле.";

/// Reject blank values for a required field.
pub fn validate_required(field: &'static str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::validation(field, REQUIRED_MESSAGE));
    }
    Ok(())
}

fn validate_max_chars(field: &'static str, value: &str, max: usize) -> Result<(), CoreError> {
    let len = value.chars().count();
    if len > max {
        return Err(CoreError::validation(
            field,
            format!("Ensure this value has at most {max} characters (it has {len})."),
        ));
    }
    Ok(())
}

/// Validate comment text against the forbidden word list.
///
/// Matching is a case-sensitive substring scan. Whichever word matches, the
/// rejection carries the same fixed warning.
pub fn validate_comment_text(policy: &ContentPolicy, text: &str) -> Result<(), CoreError> {
    validate_required(FIELD_TEXT, text)?;
    if policy
        .forbidden_words
        .iter()
        .any(|word| text.contains(word.as_str()))
    {
        return Err(CoreError::validation(
            FIELD_TEXT,
            policy.forbidden_words_warning.clone(),
        ));
    }
    Ok(())
}

/// Validate the title and body of a note. The slug is checked separately by
/// [`crate::slug::resolve_slug`], which consults the store.
pub fn validate_note_fields(
    policy: &ContentPolicy,
    title: &str,
    text: &str,
) -> Result<(), CoreError> {
    validate_required(FIELD_TITLE, title)?;
    validate_max_chars(FIELD_TITLE, title, policy.max_note_title_length)?;
    validate_required(FIELD_TEXT, text)?;
    Ok(())
}

/// Usernames: non-blank, bounded, letters/digits and `@.+-_` plus spaces.
pub fn validate_username(policy: &ContentPolicy, username: &str) -> Result<(), CoreError> {
    validate_required(FIELD_USERNAME, username)?;
    validate_max_chars(FIELD_USERNAME, username, policy.max_username_length)?;
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_' | ' '))
    {
        return Err(CoreError::validation(
            FIELD_USERNAME,
            "Username may contain only letters, digits, spaces and @/./+/-/_",
        ));
    }
    Ok(())
}
