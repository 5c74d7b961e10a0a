//! Page geometry abstraction.
//!
//! The tracker never talks to a real DOM. It queries document, viewport and
//! element geometry through the [`PageMetrics`] trait, so any host - a
//! browser bridge, a headless renderer, or the in-memory [`SimulatedPage`] -
//! can supply the numbers.
//!
//! # Thread Safety
//!
//! Implementations must be `Send + Sync`: the tracker is typically owned by
//! a background task while the host mutates the page from elsewhere.
//! `SimulatedPage` uses a `parking_lot::RwLock` for interior mutability.

use std::collections::HashMap;

use parking_lot::RwLock;

/// Read-only view of the geometry the tracker needs.
///
/// All values are layout pixels. Heights and offsets are measured from the
/// document top; `scroll_top` is the top edge of the visible area.
///
/// # Example
///
/// ```
/// use scrolldepth::page::{PageMetrics, SimulatedPage};
///
/// let page = SimulatedPage::new(2000, 600);
/// page.place_element("footer", 1800);
///
/// assert_eq!(page.document_height(), 2000);
/// assert_eq!(page.element_top("footer"), Some(1800));
/// assert_eq!(page.element_top("missing"), None);
/// ```
pub trait PageMetrics: Send + Sync {
    /// Total height of the document.
    fn document_height(&self) -> u64;

    /// Height of the visible viewport.
    fn viewport_height(&self) -> u64;

    /// Current scroll offset (top edge of the viewport).
    fn scroll_top(&self) -> u64;

    /// Offset of an element from the document top.
    ///
    /// Returns `None` when no element with the given identifier exists in
    /// the page. The tracker skips absent elements without firing.
    fn element_top(&self, id: &str) -> Option<u64>;
}

#[derive(Debug)]
struct PageState {
    document_height: u64,
    viewport_height: u64,
    scroll_top: u64,
    elements: HashMap<String, u64>,
}

/// In-memory page used by tests, the replay module and the CLI.
///
/// Geometry can be mutated at any time to model dynamic content: document
/// growth, element insertion/removal, and of course scrolling.
#[derive(Debug)]
pub struct SimulatedPage {
    state: RwLock<PageState>,
}

impl SimulatedPage {
    /// Create a page with the given document and viewport heights, scrolled
    /// to the top, with no elements placed.
    pub fn new(document_height: u64, viewport_height: u64) -> Self {
        Self {
            state: RwLock::new(PageState {
                document_height,
                viewport_height,
                scroll_top: 0,
                elements: HashMap::new(),
            }),
        }
    }

    /// Set the current scroll offset.
    pub fn set_scroll_top(&self, top: u64) {
        self.state.write().scroll_top = top;
    }

    /// Change the document height (dynamic content growth or shrinkage).
    pub fn set_document_height(&self, height: u64) {
        self.state.write().document_height = height;
    }

    /// Change the viewport height (window resize).
    pub fn set_viewport_height(&self, height: u64) {
        self.state.write().viewport_height = height;
    }

    /// Place (or move) an element at the given offset from the document top.
    pub fn place_element(&self, id: impl Into<String>, top: u64) {
        self.state.write().elements.insert(id.into(), top);
    }

    /// Remove an element from the page.
    ///
    /// Returns `true` if the element existed.
    pub fn remove_element(&self, id: &str) -> bool {
        self.state.write().elements.remove(id).is_some()
    }
}

impl PageMetrics for SimulatedPage {
    fn document_height(&self) -> u64 {
        self.state.read().document_height
    }

    fn viewport_height(&self) -> u64 {
        self.state.read().viewport_height
    }

    fn scroll_top(&self) -> u64 {
        self.state.read().scroll_top
    }

    fn element_top(&self, id: &str) -> Option<u64> {
        self.state.read().elements.get(id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_new_page_starts_at_top() {
        let page = SimulatedPage::new(2000, 600);
        assert_eq!(page.document_height(), 2000);
        assert_eq!(page.viewport_height(), 600);
        assert_eq!(page.scroll_top(), 0);
    }

    #[test]
    fn test_scroll_and_resize() {
        let page = SimulatedPage::new(2000, 600);

        page.set_scroll_top(750);
        assert_eq!(page.scroll_top(), 750);

        page.set_document_height(4000);
        page.set_viewport_height(800);
        assert_eq!(page.document_height(), 4000);
        assert_eq!(page.viewport_height(), 800);
    }

    #[test]
    fn test_element_placement_and_removal() {
        let page = SimulatedPage::new(2000, 600);

        assert_eq!(page.element_top("footer"), None);

        page.place_element("footer", 1800);
        assert_eq!(page.element_top("footer"), Some(1800));

        // Moving an element overwrites its offset.
        page.place_element("footer", 1900);
        assert_eq!(page.element_top("footer"), Some(1900));

        assert!(page.remove_element("footer"));
        assert!(!page.remove_element("footer"));
        assert_eq!(page.element_top("footer"), None);
    }

    #[test]
    fn test_trait_object_usage() {
        let page: Arc<dyn PageMetrics> = Arc::new(SimulatedPage::new(1000, 400));
        assert_eq!(page.document_height(), 1000);
        assert_eq!(page.element_top("anything"), None);
    }
}
