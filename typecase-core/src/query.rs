//! Catalog filtering (made by Kotype)

use regex::Regex;

use crate::catalog::CatalogEntry;

/// The sentinel category the UI sends when no category is selected.
const CATEGORY_ALL: &str = "All";

/// Filter over catalog entries. Absent keys impose no constraint; present
/// keys all have to hold.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    category: Option<String>,
    search: Option<String>,
    style: Option<String>,
    premium: Option<bool>,
    variable: Option<bool>,
    name_patterns: Vec<Regex>,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Case-insensitive substring match on the family name.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Exact match on the lead style name.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_premium(mut self, premium: bool) -> Self {
        self.premium = Some(premium);
        self
    }

    pub fn with_variable(mut self, variable: bool) -> Self {
        self.variable = Some(variable);
        self
    }

    /// Regex patterns of which at least one must match the family name.
    pub fn with_name_patterns(mut self, patterns: Vec<Regex>) -> Self {
        self.name_patterns = patterns;
        self
    }

    /// Check whether the entry satisfies every present filter key.
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        if let Some(category) = &self.category {
            if category.as_str() != CATEGORY_ALL && entry.category != *category {
                return false;
            }
        }

        if let Some(search) = &self.search {
            if !entry
                .name
                .to_lowercase()
                .contains(&search.to_lowercase())
            {
                return false;
            }
        }

        if let Some(style) = &self.style {
            if entry.style != *style {
                return false;
            }
        }

        if let Some(premium) = self.premium {
            if entry.is_premium != premium {
                return false;
            }
        }

        if let Some(variable) = self.variable {
            if entry.variable != variable {
                return false;
            }
        }

        if !self.name_patterns.is_empty() {
            let matched = self
                .name_patterns
                .iter()
                .any(|re| re.is_match(&entry.name));
            if !matched {
                return false;
            }
        }

        true
    }
}
