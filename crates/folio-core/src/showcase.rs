//! The owned state behind the portfolio page.
//!
//! Every UI event ends up as a call on `Showcase`, which updates its state
//! and tells the `Renderer` what changed. Nothing here knows what the
//! renderer draws with.

use tracing::{debug, info, warn};

use crate::carousel::Carousel;
use crate::classify::{classify, Classification, ExclusionPolicy};
use crate::models::{CardSlot, FeaturedEntry, ProjectDisplayRecord, RepositoryRecord};
use crate::overlay::{Overlay, PointerTarget};
use crate::paginate::{Breakpoints, Pager};
use crate::project::{cards_for, Renderer};
use crate::Result;

/// The one message a failed load ever shows
pub const LOAD_FAILED: &str = "Failed to load repositories.";

/// Identifies one load cycle. Only the most recent ticket is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug)]
pub struct Showcase {
    featured_config: Vec<FeaturedEntry>,
    policy: ExclusionPolicy,
    classification: Classification,
    pager: Pager,
    carousel: Carousel,
    overlay: Overlay,
    generation: u64,
    loading: bool,
    error: Option<String>,
}

impl Showcase {
    pub fn new(
        featured_config: Vec<FeaturedEntry>,
        policy: ExclusionPolicy,
        breakpoints: Breakpoints,
        width: f32,
    ) -> Self {
        Self {
            featured_config,
            policy,
            classification: Classification::default(),
            pager: Pager::new(breakpoints, width),
            carousel: Carousel::default(),
            overlay: Overlay::default(),
            generation: 0,
            loading: false,
            error: None,
        }
    }

    pub fn featured(&self) -> &[ProjectDisplayRecord] {
        &self.classification.featured
    }

    pub fn residual(&self) -> &[ProjectDisplayRecord] {
        &self.classification.residual
    }

    /// Side projects on the current page
    pub fn page(&self) -> &[ProjectDisplayRecord] {
        self.pager.slice(&self.classification.residual)
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn page_count(&self) -> usize {
        self.pager.page_count(self.classification.residual.len())
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut Carousel {
        &mut self.carousel
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Start a load cycle. Any load still in flight becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.loading = true;
        LoadTicket(self.generation)
    }

    /// Apply the outcome of a load
    ///
    /// Results for a superseded ticket are dropped and `false` is returned.
    /// A failure replaces the featured container with `LOAD_FAILED` and
    /// empties the side grid; nothing from a partial load is shown.
    pub fn finish_load<R: Renderer>(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<RepositoryRecord>>,
        renderer: &mut R,
    ) -> bool {
        if ticket.0 != self.generation {
            debug!("Dropping stale load {} (current is {})", ticket.0, self.generation);
            return false;
        }
        self.loading = false;

        match result {
            Ok(repos) => {
                self.classification = classify(&repos, &self.featured_config, self.policy);
                self.error = None;
                info!(
                    "{} featured, {} side projects",
                    self.classification.featured.len(),
                    self.classification.residual.len()
                );
            }
            Err(err) => {
                warn!("Repository load failed: {}", err);
                self.classification = Classification::default();
                self.error = Some(LOAD_FAILED.to_string());
            }
        }

        self.carousel.set_len(self.classification.featured.len());
        self.pager.reset();

        match &self.error {
            Some(message) => renderer.show_error(message),
            None => renderer.render_cards(
                CardSlot::Featured,
                &cards_for(CardSlot::Featured, &self.classification.featured, 0),
            ),
        }
        self.render_page(renderer);
        true
    }

    pub fn render_page<R: Renderer>(&self, renderer: &mut R) {
        let window = self.pager.window();
        let page = self.page();
        renderer.render_cards(CardSlot::Side, &cards_for(CardSlot::Side, page, window.start()));
        renderer.set_page(window, self.page_count());
    }

    pub fn next_page<R: Renderer>(&mut self, renderer: &mut R) {
        self.pager.next(self.classification.residual.len());
        self.render_page(renderer);
    }

    /// New viewport width: recompute the page size and go back to page one
    ///
    /// The carousel index is left alone; only its offset depends on width.
    pub fn resize<R: Renderer>(&mut self, width: f32, renderer: &mut R) {
        self.pager.resize(width);
        self.render_page(renderer);
    }

    /// A card was clicked. Returns false if there is no such card.
    pub fn activate<R: Renderer>(&mut self, slot: CardSlot, position: usize, renderer: &mut R) -> bool {
        let list = match slot {
            CardSlot::Featured => &self.classification.featured,
            CardSlot::Side => &self.classification.residual,
        };
        let Some(record) = list.get(position) else {
            return false;
        };

        self.overlay.open(record.clone());
        renderer.show_overlay(record);
        true
    }

    pub fn close_overlay<R: Renderer>(&mut self, renderer: &mut R) {
        if self.overlay.close() {
            renderer.hide_overlay();
        }
    }

    pub fn overlay_pointer<R: Renderer>(&mut self, target: PointerTarget, renderer: &mut R) {
        if self.overlay.pointer(target) {
            renderer.hide_overlay();
        }
    }
}
