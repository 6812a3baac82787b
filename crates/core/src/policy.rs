//! Content policy: the tunable limits and word list the validators and
//! listing functions are constructed with.

/// Words rejected in comment text.
pub const DEFAULT_FORBIDDEN_WORDS: &[&str] = &["редиска", "негодяй"];

/// Message attached to the `text` field when a forbidden word is found.
pub const DEFAULT_FORBIDDEN_WORDS_WARNING: &str = "Не ругайтесь!";

/// Appended to a colliding slug in the rejection message.
pub const DEFAULT_SLUG_COLLISION_SUFFIX: &str =
    " - такой slug уже существует, придумайте уникальное значение!";

/// News items shown on the home page.
pub const DEFAULT_NEWS_COUNT_ON_HOME_PAGE: usize = 10;

pub const DEFAULT_MAX_NOTE_TITLE_LENGTH: usize = 100;
pub const DEFAULT_MAX_SLUG_LENGTH: usize = 100;
pub const DEFAULT_MAX_USERNAME_LENGTH: usize = 150;

#[derive(Debug, Clone)]
pub struct ContentPolicy {
    pub forbidden_words: Vec<String>,
    pub forbidden_words_warning: String,
    pub slug_collision_suffix: String,
    pub news_count_on_home_page: usize,
    pub max_note_title_length: usize,
    pub max_slug_length: usize,
    pub max_username_length: usize,
}

impl Default for ContentPolicy {
    fn default() -> Self {
        Self {
            forbidden_words: DEFAULT_FORBIDDEN_WORDS
                .iter()
                .map(|w| w.to_string())
                .collect(),
            forbidden_words_warning: DEFAULT_FORBIDDEN_WORDS_WARNING.to_string(),
            slug_collision_suffix: DEFAULT_SLUG_COLLISION_SUFFIX.to_string(),
            news_count_on_home_page: DEFAULT_NEWS_COUNT_ON_HOME_PAGE,
            max_note_title_length: DEFAULT_MAX_NOTE_TITLE_LENGTH,
            max_slug_length: DEFAULT_MAX_SLUG_LENGTH,
            max_username_length: DEFAULT_MAX_USERNAME_LENGTH,
        }
    }
}

impl ContentPolicy {
    /// Replace the forbidden word list, dropping blank entries.
    pub fn with_forbidden_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.forbidden_words = words
            .into_iter()
            .map(Into::into)
            .filter(|w: &String| !w.trim().is_empty())
            .collect();
        self
    }

    pub fn with_news_count_on_home_page(mut self, count: usize) -> Self {
        self.news_count_on_home_page = count;
        self
    }
}
