//! List parameters shared by every repository `get_list`.

use uuid::Uuid;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Page/limit plus the optional filters a list query may apply.
///
/// Values are stored as received; [`ListParams::offset`] and
/// [`ListParams::limit`] always report the clamped values, so a negative
/// page or zero limit can never reach SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub page: i64,
    pub limit: i64,
    pub search: Option<String>,
    pub user_id: Option<Uuid>,
    pub tweet_id: Option<Uuid>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
    }
}

impl ListParams {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page,
            limit,
            search: None,
            user_id: None,
            tweet_id: None,
        }
    }

    /// Sets the search term. Empty or whitespace-only terms disable search.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        let trimmed = search.trim();
        self.search = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    pub fn with_user_id(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_tweet_id(mut self, tweet_id: Uuid) -> Self {
        self.tweet_id = Some(tweet_id);
        self
    }

    /// Returns a copy with page and limit clamped into their valid ranges.
    pub fn normalized(mut self) -> Self {
        self.page = self.page();
        self.limit = self.limit();
        self
    }

    pub fn page(&self) -> i64 {
        self.page.max(1)
    }

    pub fn limit(&self) -> i64 {
        match self.limit {
            l if l <= 0 => DEFAULT_LIMIT,
            l if l > MAX_LIMIT => MAX_LIMIT,
            l => l,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }

    /// `ILIKE` pattern for the search term, with `\`, `%` and `_` escaped so
    /// the term is matched as a literal substring.
    pub fn search_pattern(&self) -> Option<String> {
        self.search.as_deref().map(|term| {
            let mut pattern = String::with_capacity(term.len() + 2);
            pattern.push('%');
            for c in term.chars() {
                if matches!(c, '\\' | '%' | '_') {
                    pattern.push('\\');
                }
                pattern.push(c);
            }
            pattern.push('%');
            pattern
        })
    }
}

/// One page of rows plus the total number of rows matching the filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub count: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, count: i64) -> Self {
        Self { items, count }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            count: self.count,
        }
    }
}
