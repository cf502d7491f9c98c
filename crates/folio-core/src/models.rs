use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fallback shown wherever a project has nothing to say about itself
pub const NO_DESCRIPTION: &str = "No description";

/// Repository as fetched from the forge - immutable for one load cycle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepositoryRecord {
    /// Slug, case preserved
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub updated_at: DateTime<Utc>,
}

impl RepositoryRecord {
    /// Lower-cased slug used for featured lookups
    pub fn slug_key(&self) -> String {
        self.name.to_lowercase()
    }
}

/// One entry of the featured allow-list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeaturedEntry {
    pub slug: String,
    /// Display order. Unset ranks fall back to declaration position.
    #[serde(default)]
    pub rank: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl FeaturedEntry {
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            rank: None,
            title: None,
            description: None,
            visible: true,
        }
    }

    pub fn with_rank(mut self, rank: i64) -> Self {
        self.rank = Some(rank);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// What a card and the detail overlay actually show
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectDisplayRecord {
    pub title: String,
    pub description: String,
    /// No link, no "view on GitHub" button
    pub link: Option<String>,
}

impl ProjectDisplayRecord {
    pub fn has_link(&self) -> bool {
        self.link.is_some()
    }
}

/// The slice of side projects currently on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub index: usize,
    pub size: usize,
}

impl PageWindow {
    pub fn start(&self) -> usize {
        self.index * self.size
    }

    pub fn end(&self) -> usize {
        self.start() + self.size
    }
}

/// Which card container a card lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardSlot {
    /// The main-projects carousel
    Featured,
    /// The paginated side-projects grid
    Side,
}

impl std::fmt::Display for CardSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardSlot::Featured => write!(f, "Main Projects"),
            CardSlot::Side => write!(f, "Side Projects"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_window_offsets() {
        let window = PageWindow { index: 2, size: 9 };
        assert_eq!(window.start(), 18);
        assert_eq!(window.end(), 27);
    }

    #[test]
    fn test_featured_entry_defaults_visible() {
        let entry: FeaturedEntry = toml::from_str("slug = \"HackerGO\"").unwrap();
        assert!(entry.visible);
        assert_eq!(entry.rank, None);
        assert_eq!(entry, FeaturedEntry::new("HackerGO"));
    }
}
