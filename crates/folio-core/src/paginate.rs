//! Responsive paging over the side-project list.

use serde::{Deserialize, Serialize};

use crate::models::PageWindow;

/// Width breakpoints deciding how many side projects fit on a page
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoints {
    /// At or below this width: one project per page
    #[serde(default = "default_narrow_max")]
    pub narrow_max: f32,
    /// At or below this width: six per page. Wider: nine.
    #[serde(default = "default_medium_max")]
    pub medium_max: f32,
}

fn default_narrow_max() -> f32 {
    600.0
}

fn default_medium_max() -> f32 {
    900.0
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            narrow_max: default_narrow_max(),
            medium_max: default_medium_max(),
        }
    }
}

impl Breakpoints {
    pub fn page_size_for(&self, width: f32) -> usize {
        if width <= self.narrow_max {
            1
        } else if width <= self.medium_max {
            6
        } else {
            9
        }
    }

    /// Phone or tablet layout - the About section switches to a popup here
    pub fn is_compact(&self, width: f32) -> bool {
        width <= self.medium_max
    }
}

/// Page size for the default breakpoints
pub fn page_size_for(width: f32) -> usize {
    Breakpoints::default().page_size_for(width)
}

/// Number of pages, never less than one so wraparound has a target
pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    len.div_ceil(page_size).max(1)
}

/// The items on page `index`, or nothing if the page is past the end
pub fn current_page<T>(items: &[T], index: usize, page_size: usize) -> &[T] {
    let start = index.saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Next page index, wrapping back to the first page
pub fn advance(index: usize, len: usize, page_size: usize) -> usize {
    (index + 1) % page_count(len, page_size)
}

/// Page state for the side-project grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pager {
    breakpoints: Breakpoints,
    index: usize,
    size: usize,
}

impl Pager {
    pub fn new(breakpoints: Breakpoints, width: f32) -> Self {
        Self {
            breakpoints,
            index: 0,
            size: breakpoints.page_size_for(width),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    pub fn window(&self) -> PageWindow {
        PageWindow {
            index: self.index,
            size: self.size,
        }
    }

    /// Recompute the page size and go back to the first page
    ///
    /// This resets even when the size did not change, so a resize always
    /// lands on page one.
    pub fn resize(&mut self, width: f32) {
        self.size = self.breakpoints.page_size_for(width);
        self.index = 0;
    }

    pub fn next(&mut self, len: usize) {
        self.index = advance(self.index, len, self.size);
    }

    /// Back to the first page, e.g. after a reload
    pub fn reset(&mut self) {
        self.index = 0;
    }

    pub fn page_count(&self, len: usize) -> usize {
        page_count(len, self.size)
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        current_page(items, self.index, self.size)
    }
}
