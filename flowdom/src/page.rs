use crate::element::{find_element, Element};
use crate::layout::{layout, LayoutResult, Rect};

/// One frame of UI: the root tree plus a floating overlay layer.
///
/// Overlay entries render above the root in push order and hit-test
/// above it in reverse push order. Each entry is laid out against the
/// full screen rect, so an absolutely positioned entry places itself in
/// page coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub root: Element,
    pub overlay: Vec<Element>,
}

impl Page {
    pub fn new(root: Element) -> Self {
        Self {
            root,
            overlay: Vec::new(),
        }
    }

    pub fn push_overlay(&mut self, element: Element) {
        self.overlay.push(element);
    }

    /// Depth-first lookup across the root and overlay entries.
    pub fn find(&self, id: &str) -> Option<&Element> {
        if let Some(found) = find_element(&self.root, id) {
            return Some(found);
        }
        self.overlay
            .iter()
            .find_map(|entry| find_element(entry, id))
    }
}

/// Lay out the whole page: the root and every overlay entry, each
/// against the full screen rect.
pub fn layout_page(page: &Page, screen: Rect) -> LayoutResult {
    let mut result = layout(&page.root, screen);
    for entry in &page.overlay {
        result.extend(layout(entry, screen));
    }
    result
}
