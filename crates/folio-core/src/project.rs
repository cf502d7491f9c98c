// Presentation projector: repository records in, cards out
use crate::models::{
    CardSlot, FeaturedEntry, PageWindow, ProjectDisplayRecord, RepositoryRecord, NO_DESCRIPTION,
};

/// The rendering surface, whatever it happens to be
///
/// The core never touches a UI toolkit directly. The terminal front end
/// implements this; tests use a recorder.
pub trait Renderer {
    /// Replace the contents of a card container
    fn render_cards(&mut self, slot: CardSlot, cards: &[ProjectCard]);

    /// Report which side-project page is showing
    fn set_page(&mut self, window: PageWindow, page_count: usize);

    fn show_overlay(&mut self, record: &ProjectDisplayRecord);

    fn hide_overlay(&mut self);

    /// Replace the featured container with a message
    fn show_error(&mut self, message: &str);
}

/// A rendered card. Activating it is the only way to open the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCard {
    pub slot: CardSlot,
    /// Position within the full featured or residual list, not the page
    pub position: usize,
    pub record: ProjectDisplayRecord,
}

pub fn cards_for(slot: CardSlot, records: &[ProjectDisplayRecord], offset: usize) -> Vec<ProjectCard> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| ProjectCard {
            slot,
            position: offset + i,
            record: record.clone(),
        })
        .collect()
}

/// Project a repository with no curation
pub fn project(repo: &RepositoryRecord) -> ProjectDisplayRecord {
    ProjectDisplayRecord {
        title: repo.name.clone(),
        description: describe(None, repo.description.as_deref()),
        link: Some(repo.url.clone()),
    }
}

/// Project a featured repository, preferring curated text
pub fn project_featured(repo: &RepositoryRecord, entry: &FeaturedEntry) -> ProjectDisplayRecord {
    let title = entry
        .title
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(&repo.name)
        .to_string();

    ProjectDisplayRecord {
        title,
        description: describe(entry.description.as_deref(), repo.description.as_deref()),
        link: Some(repo.url.clone()),
    }
}

/// Curated, then raw, then the fallback. Blank strings count as missing.
fn describe(curated: Option<&str>, raw: Option<&str>) -> String {
    curated
        .filter(|d| !d.trim().is_empty())
        .or(raw.filter(|d| !d.trim().is_empty()))
        .unwrap_or(NO_DESCRIPTION)
        .to_string()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::aggregate::tests::record;

    /// Renderer that writes down everything it is asked to do
    #[derive(Debug, Default)]
    pub(crate) struct RecordingRenderer {
        pub featured: Vec<ProjectCard>,
        pub side: Vec<ProjectCard>,
        pub page: Option<(PageWindow, usize)>,
        pub overlay: Option<ProjectDisplayRecord>,
        pub error: Option<String>,
    }

    impl Renderer for RecordingRenderer {
        fn render_cards(&mut self, slot: CardSlot, cards: &[ProjectCard]) {
            match slot {
                CardSlot::Featured => {
                    self.error = None;
                    self.featured = cards.to_vec();
                }
                CardSlot::Side => self.side = cards.to_vec(),
            }
        }

        fn set_page(&mut self, window: PageWindow, page_count: usize) {
            self.page = Some((window, page_count));
        }

        fn show_overlay(&mut self, record: &ProjectDisplayRecord) {
            self.overlay = Some(record.clone());
        }

        fn hide_overlay(&mut self) {
            self.overlay = None;
        }

        fn show_error(&mut self, message: &str) {
            self.featured.clear();
            self.error = Some(message.to_string());
        }
    }

    #[test]
    fn test_project_falls_back_to_no_description() {
        let mut repo = record("foo", 1);
        assert_eq!(project(&repo).description, NO_DESCRIPTION);

        repo.description = Some("   ".into());
        assert_eq!(project(&repo).description, NO_DESCRIPTION);

        repo.description = Some("a tool".into());
        assert_eq!(project(&repo).description, "a tool");
    }

    #[test]
    fn test_project_featured_uses_raw_when_not_curated() {
        let mut repo = record("MultiVol", 1);
        repo.description = Some("volume mixer".into());

        let display = project_featured(&repo, &FeaturedEntry::new("multivol"));
        assert_eq!(display.title, "MultiVol");
        assert_eq!(display.description, "volume mixer");
        assert!(display.has_link());
    }

    #[test]
    fn test_cards_for_numbers_from_offset() {
        let records = vec![project(&record("a", 1)), project(&record("b", 2))];
        let cards = cards_for(CardSlot::Side, &records, 9);

        assert_eq!(cards[0].position, 9);
        assert_eq!(cards[1].position, 10);
        assert_eq!(cards[1].record.title, "b");
    }
}
