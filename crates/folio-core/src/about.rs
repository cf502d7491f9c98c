//! "About Me": the inline read-more toggle and the paged popup used on
//! compact screens.

use serde::{Deserialize, Serialize};

/// A project mentioned in the about text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutProject {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Raw about-section content, straight from config
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutContent {
    #[serde(default)]
    pub summary: Vec<String>,
    #[serde(default)]
    pub projects: Vec<AboutProject>,
    #[serde(default)]
    pub extra: Vec<String>,
}

/// One page of the popup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slide {
    Paragraph(String),
    /// A single project, used on compact screens
    Project(AboutProject),
    /// Every project on one page, used on wide screens
    ProjectList(Vec<AboutProject>),
}

impl AboutContent {
    /// Summary paragraphs, then projects, then the extra paragraphs
    pub fn slides(&self, compact: bool) -> Vec<Slide> {
        let mut slides: Vec<Slide> = self.summary.iter().cloned().map(Slide::Paragraph).collect();

        if compact {
            slides.extend(self.projects.iter().cloned().map(Slide::Project));
        } else if !self.projects.is_empty() {
            slides.push(Slide::ProjectList(self.projects.clone()));
        }

        slides.extend(self.extra.iter().cloned().map(Slide::Paragraph));
        slides
    }
}

/// Paged popup. Navigation stops at the ends rather than wrapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AboutPopup {
    slides: Vec<Slide>,
    index: usize,
    open: bool,
}

impl AboutPopup {
    pub fn new(slides: Vec<Slide>) -> Self {
        Self {
            slides,
            index: 0,
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The page behind the popup is blurred exactly while it is open
    pub fn background_blurred(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) -> bool {
        let was_open = self.open;
        self.open = false;
        was_open
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn current(&self) -> Option<&Slide> {
        self.slides.get(self.index)
    }

    pub fn can_prev(&self) -> bool {
        self.index > 0
    }

    pub fn can_next(&self) -> bool {
        self.index + 1 < self.slides.len()
    }

    pub fn prev(&mut self) -> bool {
        if !self.can_prev() {
            return false;
        }
        self.index -= 1;
        true
    }

    pub fn next(&mut self) -> bool {
        if !self.can_next() {
            return false;
        }
        self.index += 1;
        true
    }
}

/// What pressing "Read More" should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMoreAction {
    OpenPopup,
    Expanded,
    /// Collapsed again; the about section should be scrolled back into view
    Collapsed,
}

/// Inline expand/collapse state of the about section on wide screens
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadMore {
    expanded: bool,
}

impl ReadMore {
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn label(&self) -> &'static str {
        if self.expanded {
            "Show Less"
        } else {
            "Read More"
        }
    }

    pub fn press(&mut self, compact: bool) -> ReadMoreAction {
        if compact {
            return ReadMoreAction::OpenPopup;
        }
        self.expanded = !self.expanded;
        if self.expanded {
            ReadMoreAction::Expanded
        } else {
            ReadMoreAction::Collapsed
        }
    }
}
