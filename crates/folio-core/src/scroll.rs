//! Scroll-driven presentation: the collapsed/expanded landing transition and
//! reveal-once fade-ins.

use std::collections::HashSet;
use std::time::Duration;

/// Fraction of the viewport height the about section must scroll above
pub const DEFAULT_THRESHOLD_RATIO: f32 = 0.2;

/// Fraction of a section that must be visible before it fades in
pub const REVEAL_THRESHOLD: f32 = 0.1;

/// Delay before the about text and profile picture fade in on start-up
pub const INTRO_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollState {
    #[default]
    Collapsed,
    Expanded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Enter,
    Exit,
}

/// Flags applied to the landing page surfaces
///
/// Entering the expanded state sets every flag; leaving clears exactly the
/// same set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Presentation {
    pub about_faded: bool,
    pub profile_sticky: bool,
    pub hero_shrunk: bool,
    pub projects_visible: bool,
    pub scroll_hint_hidden: bool,
}

impl Presentation {
    pub fn apply(&mut self, transition: Transition) {
        let on = transition == Transition::Enter;
        self.about_faded = on;
        self.profile_sticky = on;
        self.hero_shrunk = on;
        self.projects_visible = on;
        self.scroll_hint_hidden = on;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTransition {
    state: ScrollState,
    threshold_ratio: f32,
    presentation: Presentation,
}

impl Default for ScrollTransition {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD_RATIO)
    }
}

impl ScrollTransition {
    /// Starts collapsed with projects hidden and the scroll hint showing
    pub fn new(threshold_ratio: f32) -> Self {
        Self {
            state: ScrollState::Collapsed,
            threshold_ratio,
            presentation: Presentation::default(),
        }
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    /// Feed the tracked element's bottom edge, relative to the viewport top
    ///
    /// Returns the transition only when the state actually flips, so a
    /// stream of scroll events inside one state does nothing.
    pub fn observe(&mut self, element_bottom: f32, viewport_height: f32) -> Option<Transition> {
        let threshold = viewport_height * self.threshold_ratio;
        let transition = match self.state {
            ScrollState::Collapsed if element_bottom <= threshold => Transition::Enter,
            ScrollState::Expanded if element_bottom > threshold => Transition::Exit,
            _ => return None,
        };

        self.state = match transition {
            Transition::Enter => ScrollState::Expanded,
            Transition::Exit => ScrollState::Collapsed,
        };
        self.presentation.apply(transition);
        Some(transition)
    }
}

/// Fades sections in the first time enough of them scrolls into view
#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    observed: HashSet<String>,
    revealed: HashSet<String>,
}

impl RevealTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start watching a section. Manually controlled sections are skipped.
    pub fn observe(&mut self, id: impl Into<String>, manual_control: bool) {
        let id = id.into();
        if !manual_control && !self.revealed.contains(&id) {
            self.observed.insert(id);
        }
    }

    /// Report how much of a section is on screen (0.0..=1.0)
    ///
    /// Returns true the one time the section is revealed; after that it is
    /// no longer watched.
    pub fn intersect(&mut self, id: &str, visible_fraction: f32) -> bool {
        if visible_fraction < REVEAL_THRESHOLD || !self.observed.remove(id) {
            return false;
        }
        self.revealed.insert(id.to_string());
        true
    }

    /// Reveal a section directly, e.g. the intro fade after start-up
    pub fn reveal(&mut self, id: &str) {
        self.observed.remove(id);
        self.revealed.insert(id.to_string());
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.contains(id)
    }

    pub fn is_observed(&self, id: &str) -> bool {
        self.observed.contains(id)
    }
}

/// Fraction of a span `[top, top + height)` that lies inside `[0, viewport)`
pub fn visible_fraction(top: f32, height: f32, viewport_height: f32) -> f32 {
    if height <= 0.0 {
        return 0.0;
    }
    let visible = (top + height).min(viewport_height) - top.max(0.0);
    (visible / height).clamp(0.0, 1.0)
}
