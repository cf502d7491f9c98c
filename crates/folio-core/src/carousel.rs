//! Cyclic carousel over the featured projects.
//!
//! The index wraps at both ends. With no items the carousel is inert: every
//! transition is a no-op and the offset stays at zero.

/// Gap between carousel items when the surface does not report one
pub const DEFAULT_GAP: f32 = 40.0;

/// Horizontal drag distance that counts as a swipe
pub const SWIPE_THRESHOLD: f32 = 50.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    len: usize,
}

/// Navigation keys the carousel understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKey {
    Left,
    Right,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// New item count after a reload; keeps the index when it still fits
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 || self.index >= len {
            self.index = 0;
        }
    }

    pub fn next(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }

    pub fn prev(&mut self) {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
    }

    pub fn go_to(&mut self, i: usize) {
        if self.len > 0 {
            self.index = i % self.len;
        }
    }

    /// Finish a horizontal drag. Returns true if it moved the carousel.
    ///
    /// Dragging left (negative displacement) shows the next item, dragging
    /// right the previous one. Short drags are ignored.
    pub fn swipe(&mut self, start_x: f32, end_x: f32, threshold: f32) -> bool {
        let dx = end_x - start_x;
        if dx.abs() <= threshold || self.is_empty() {
            return false;
        }
        if dx < 0.0 {
            self.next();
        } else {
            self.prev();
        }
        true
    }

    /// Arrow keys only act while focus is inside the carousel
    pub fn key(&mut self, key: ArrowKey, focus_within: bool) -> bool {
        if !focus_within || self.is_empty() {
            return false;
        }
        match key {
            ArrowKey::Left => self.prev(),
            ArrowKey::Right => self.next(),
        }
        true
    }

    /// Track translation for item-based layouts
    ///
    /// Recomputed from the current measurements on every call, so a resize
    /// changes the offset but never the index.
    pub fn offset(&self, item_width: f32, gap: Option<f32>) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let step = item_width + gap.unwrap_or(DEFAULT_GAP);
        -(self.index as f32 * step)
    }

    /// Track translation for slide-based layouts, in percent of track width
    pub fn slide_offset_percent(&self, slide_percent: f32) -> f32 {
        -(self.index as f32 * slide_percent)
    }
}
