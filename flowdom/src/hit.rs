use crate::element::{Content, Element};
use crate::layout::LayoutResult;
use crate::page::Page;

/// Find the topmost clickable or draggable element at the given
/// coordinates. Returns None if no interactive element contains the point.
pub fn hit_test_interactive(
    layout: &LayoutResult,
    root: &Element,
    x: u16,
    y: u16,
) -> Option<String> {
    hit_test_element(layout, root, x, y, |e| e.clickable || e.draggable)
}

/// Find the topmost hoverable element at the given coordinates.
pub fn hit_test_hoverable(layout: &LayoutResult, root: &Element, x: u16, y: u16) -> Option<String> {
    hit_test_element(layout, root, x, y, |e| e.hoverable)
}

/// Find any element at the given coordinates.
/// Returns the topmost element containing the point.
pub fn hit_test_any(layout: &LayoutResult, root: &Element, x: u16, y: u16) -> Option<String> {
    hit_test_element(layout, root, x, y, |_| true)
}

/// Page-level variant of [`hit_test_interactive`]: overlay entries sit
/// above the root and later entries above earlier ones.
pub fn hit_test_interactive_page(
    layout: &LayoutResult,
    page: &Page,
    x: u16,
    y: u16,
) -> Option<String> {
    hit_test_page(layout, page, x, y, |e| e.clickable || e.draggable)
}

/// Page-level variant of [`hit_test_hoverable`].
pub fn hit_test_hoverable_page(
    layout: &LayoutResult,
    page: &Page,
    x: u16,
    y: u16,
) -> Option<String> {
    hit_test_page(layout, page, x, y, |e| e.hoverable)
}

/// Page-level variant of [`hit_test_any`].
pub fn hit_test_any_page(layout: &LayoutResult, page: &Page, x: u16, y: u16) -> Option<String> {
    hit_test_page(layout, page, x, y, |_| true)
}

fn hit_test_page(
    layout: &LayoutResult,
    page: &Page,
    x: u16,
    y: u16,
    matches: fn(&Element) -> bool,
) -> Option<String> {
    for entry in page.overlay.iter().rev() {
        if let Some(id) = hit_test_element(layout, entry, x, y, matches) {
            return Some(id);
        }
    }
    hit_test_element(layout, &page.root, x, y, matches)
}

fn hit_test_element(
    layout: &LayoutResult,
    element: &Element,
    x: u16,
    y: u16,
    matches: fn(&Element) -> bool,
) -> Option<String> {
    let rect = layout.get(&element.id)?;

    if !rect.contains(x, y) {
        return None;
    }

    // Check children in reverse order (last rendered = on top)
    if let Content::Children(children) = &element.content {
        for child in children.iter().rev() {
            if let Some(id) = hit_test_element(layout, child, x, y, matches) {
                return Some(id);
            }
        }
    }

    if matches(element) {
        Some(element.id.clone())
    } else {
        None
    }
}
