//! Note slug derivation and uniqueness checks.
//!
//! A slug is either supplied by the user or derived from the title by
//! transliterating Cyrillic to Latin and collapsing whitespace into hyphens.
//! Either way it must be unique among notes; the store enforces the same
//! rule with a unique index.

use std::future::Future;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;
use crate::policy::ContentPolicy;
use crate::validation::FIELD_SLUG;

static AMPERSAND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&amp;|&").expect("valid regex"));
static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("valid regex"));
static NON_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("valid regex"));

/// Lowercase Cyrillic (Russian and Ukrainian) to Latin.
///
/// Hard and soft signs map to quote characters that the final cleanup pass
/// strips, so they vanish from slugs.
const TRANSLIT_TABLE: &[(char, &str)] = &[
    ('а', "a"),
    ('б', "b"),
    ('в', "v"),
    ('г', "g"),
    ('д', "d"),
    ('е', "e"),
    ('ё', "yo"),
    ('ж', "zh"),
    ('з', "z"),
    ('и', "i"),
    ('й', "j"),
    ('к', "k"),
    ('л', "l"),
    ('м', "m"),
    ('н', "n"),
    ('о', "o"),
    ('п', "p"),
    ('р', "r"),
    ('с', "s"),
    ('т', "t"),
    ('у', "u"),
    ('ф', "f"),
    ('х', "h"),
    ('ц', "ts"),
    ('ч', "ch"),
    ('ш', "sh"),
    ('щ', "sch"),
    ('ъ', "`"),
    ('ы', "yi"),
    ('ь', "'"),
    ('э', "e"),
    ('ю', "yu"),
    ('я', "ya"),
    ('є', "ye"),
    ('ї', "yi"),
    ('і', "i"),
    ('ґ', "g"),
];

fn transliterate(c: char) -> Option<&'static str> {
    TRANSLIT_TABLE
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
}

fn in_slug_alphabet(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || transliterate(c).is_some()
}

/// Derive a URL slug from free text.
///
/// Deterministic: the same input always yields the same slug.
///
/// ```
/// use newsroom_core::slug::slugify;
///
/// assert_eq!(slugify("Новая заметка"), "novaya-zametka");
/// assert_eq!(slugify("Rock & Roll"), "rock-and-roll");
/// ```
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let lowered = AMPERSAND_RE.replace_all(&lowered, " and ");
    let hyphenated = SEPARATOR_RE.replace_all(&lowered, "-");

    let mut latin = String::with_capacity(hyphenated.len());
    for c in hyphenated.chars().filter(|c| in_slug_alphabet(*c)) {
        match transliterate(c) {
            Some(to) => latin.push_str(to),
            None => latin.push(c),
        }
    }

    NON_WORD_RE
        .replace_all(&latin, "")
        .trim()
        .to_lowercase()
}

/// Truncate to at most `max` characters without splitting a code point.
fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

/// A user-supplied slug may only contain ASCII letters, digits, `-` and `_`.
pub fn validate_slug_format(policy: &ContentPolicy, slug: &str) -> Result<(), CoreError> {
    if slug
        .chars()
        .any(|c| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
    {
        return Err(CoreError::validation(
            FIELD_SLUG,
            "Enter a valid slug consisting of letters, numbers, underscores or hyphens.",
        ));
    }
    if slug.chars().count() > policy.max_slug_length {
        return Err(CoreError::validation(
            FIELD_SLUG,
            format!(
                "Ensure this value has at most {} characters.",
                policy.max_slug_length
            ),
        ));
    }
    Ok(())
}

/// The slug a note would get before the uniqueness check.
///
/// A blank `provided` slug counts as absent.
pub fn candidate_slug(
    policy: &ContentPolicy,
    title: &str,
    provided: Option<&str>,
) -> Result<String, CoreError> {
    match provided.map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) => {
            validate_slug_format(policy, slug)?;
            Ok(slug.to_string())
        }
        None => {
            let derived = truncate_chars(&slugify(title), policy.max_slug_length);
            if derived.is_empty() {
                return Err(CoreError::validation(
                    FIELD_SLUG,
                    "Could not derive a slug from the title; please provide one.",
                ));
            }
            Ok(derived)
        }
    }
}

/// Reject `slug` if it is already taken.
///
/// The message embeds the colliding value followed by the configured suffix.
pub fn ensure_unique(policy: &ContentPolicy, slug: &str, taken: bool) -> Result<(), CoreError> {
    if taken {
        return Err(CoreError::validation(
            FIELD_SLUG,
            format!("{slug}{}", policy.slug_collision_suffix),
        ));
    }
    Ok(())
}

/// Resolve the final slug for a note.
///
/// `is_taken` answers whether a slug already belongs to another note; it is
/// asked once, for the candidate. Derived slugs are checked for collisions
/// exactly like provided ones.
pub async fn resolve_slug<F, Fut, E>(
    policy: &ContentPolicy,
    title: &str,
    provided: Option<&str>,
    is_taken: F,
) -> Result<String, E>
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
    E: From<CoreError>,
{
    let slug = candidate_slug(policy, title, provided)?;
    let taken = is_taken(slug.clone()).await?;
    ensure_unique(policy, &slug, taken)?;
    Ok(slug)
}
