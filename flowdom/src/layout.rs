use std::collections::HashMap;

use crate::element::{Content, Element};
use crate::text::display_width;
use crate::types::{Align, Border, Direction, Justify, Position, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_size(width: u16, height: u16) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub const fn left(&self) -> u16 {
        self.x
    }

    pub const fn right(&self) -> u16 {
        self.x + self.width
    }

    pub const fn top(&self) -> u16 {
        self.y
    }

    pub const fn bottom(&self) -> u16 {
        self.y + self.height
    }

    pub fn shrink(self, top: u16, right: u16, bottom: u16, left: u16) -> Self {
        let x = self.x.saturating_add(left);
        let y = self.y.saturating_add(top);
        let width = self.width.saturating_sub(left + right);
        let height = self.height.saturating_sub(top + bottom);
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Get the center point of this rectangle.
    pub const fn center(&self) -> (u16, u16) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }
}

pub type LayoutResult = HashMap<String, Rect>;

/// Lay out an element tree within the available rect.
///
/// Every element in the tree gets an entry in the result, including
/// elements scrolled out of a clipped viewport (those get empty rects).
pub fn layout(element: &Element, available: Rect) -> LayoutResult {
    let mut result = LayoutResult::new();
    layout_element(element, available, &mut result);
    result
}

fn layout_element(element: &Element, available: Rect, result: &mut LayoutResult) {
    if element.position == Position::Absolute {
        // At the top level the available rect is the offset parent.
        layout_absolute(element, available, result);
        return;
    }

    // Apply margin - shrink available space and offset position
    let margin = &element.margin;
    let after_margin = available.shrink(margin.top, margin.right, margin.bottom, margin.left);

    let width = resolve_size(element.width, after_margin.width, element, true);
    let height = resolve_size(element.height, after_margin.height, element, false);
    let rect = Rect::new(after_margin.x, after_margin.y, width, height);
    result.insert(element.id.clone(), rect);

    layout_children(element, rect, result);
}

/// Absolute children resolve against the parent's content box.
fn layout_absolute(element: &Element, content_box: Rect, result: &mut LayoutResult) {
    let width = resolve_size(element.width, content_box.width, element, true);
    let height = resolve_size(element.height, content_box.height, element, false);
    let x = content_box.x as i32 + element.left.unwrap_or(0) as i32;
    let y = content_box.y as i32 + element.top.unwrap_or(0) as i32;
    let rect = Rect::new(x.max(0) as u16, y.max(0) as u16, width, height);
    result.insert(element.id.clone(), rect);
    layout_children(element, rect, result);
}

fn layout_children(element: &Element, rect: Rect, result: &mut LayoutResult) {
    let Content::Children(children) = &element.content else {
        return;
    };

    if children.is_empty() {
        return;
    }

    // Separate flow children from absolute children
    let flow_children: Vec<_> = children
        .iter()
        .filter(|c| c.position != Position::Absolute)
        .collect();
    let absolute_children: Vec<_> = children
        .iter()
        .filter(|c| c.position == Position::Absolute)
        .collect();

    // Account for border
    let border_size = if element.style.border == Border::None {
        0
    } else {
        1
    };

    let inner = rect.shrink(
        element.padding.top + border_size,
        element.padding.right + border_size,
        element.padding.bottom + border_size,
        element.padding.left + border_size,
    );

    let is_row = element.direction == Direction::Row;
    let main_size = if is_row { inner.width } else { inner.height };
    let cross_size = if is_row { inner.height } else { inner.width };

    // First pass: calculate fixed sizes and count fill items (flow children only)
    let mut fixed_total = 0u16;
    let mut fill_count = 0u16;
    let gap_total = element.gap * flow_children.len().saturating_sub(1) as u16;

    for child in &flow_children {
        let child_margin_main = if is_row {
            child.margin.horizontal_total()
        } else {
            child.margin.vertical_total()
        };

        let child_main_size = if is_row { child.width } else { child.height };
        match child_main_size {
            Size::Fixed(n) => fixed_total += n + child_margin_main,
            Size::Auto => {
                let estimated = estimate_size(child, is_row);
                fixed_total += estimated + child_margin_main;
            }
            Size::Fill => fill_count += 1,
        }
    }

    // Remaining space is shared equally between fill items
    let remaining = main_size.saturating_sub(fixed_total + gap_total);
    let fill_size = if fill_count > 0 {
        remaining / fill_count
    } else {
        0
    };

    // Calculate child sizes (including margins)
    let mut child_sizes: Vec<(u16, u16, u16)> = Vec::with_capacity(flow_children.len());
    let mut total_child_size = 0u16;

    for child in &flow_children {
        let (margin_before, margin_after) = if is_row {
            (child.margin.left, child.margin.right)
        } else {
            (child.margin.top, child.margin.bottom)
        };

        let child_main_size = if is_row { child.width } else { child.height };
        let main = match child_main_size {
            Size::Fixed(n) => n,
            Size::Auto => estimate_size(child, is_row),
            Size::Fill => fill_size,
        };

        child_sizes.push((main, margin_before, margin_after));
        total_child_size += main + margin_before + margin_after;
    }

    // Calculate justify spacing
    let total_with_gaps = total_child_size + gap_total;
    let extra_space = main_size.saturating_sub(total_with_gaps);

    let (start_offset, between_gap) = match element.justify {
        Justify::Start => (0, element.gap),
        Justify::End => (extra_space, element.gap),
        Justify::Center => (extra_space / 2, element.gap),
        Justify::SpaceBetween => {
            if flow_children.len() > 1 {
                (0, extra_space / (flow_children.len() - 1) as u16 + element.gap)
            } else {
                (0, element.gap)
            }
        }
    };

    // A clipped parent shifts flow children up by the scroll offset and
    // confines them to the content box, so scrolled-out children end up
    // with empty rects and can be neither painted nor hit.
    let scroll_shift = if element.clip {
        element.scroll_y as i32
    } else {
        0
    };

    // Second pass: assign rects to flow children with justify
    let mut offset = start_offset as i32 - scroll_shift;

    for (i, child) in flow_children.iter().enumerate() {
        let (main, margin_before, margin_after) = child_sizes[i];

        let (cross_margin_before, cross_margin_after) = if is_row {
            (child.margin.top, child.margin.bottom)
        } else {
            (child.margin.left, child.margin.right)
        };

        let child_cross_size = if is_row { child.height } else { child.width };
        let available_cross = cross_size.saturating_sub(cross_margin_before + cross_margin_after);

        let cross = match child_cross_size {
            Size::Fixed(n) => n,
            Size::Fill => available_cross,
            Size::Auto => {
                if element.align == Align::Stretch {
                    available_cross
                } else {
                    estimate_size(child, !is_row).min(available_cross)
                }
            }
        };

        // Clamp to available space
        let room = (main_size as i32 - offset - margin_before as i32).max(0) as u16;
        let clamped_main = main.min(room);
        let clamped_cross = cross.min(available_cross);

        let cross_offset = match element.align {
            Align::Start | Align::Stretch => cross_margin_before,
            Align::Center => {
                cross_margin_before + (available_cross.saturating_sub(clamped_cross)) / 2
            }
            Align::End => cross_margin_before + available_cross.saturating_sub(clamped_cross),
        };

        let main_pos = offset + margin_before as i32;
        let (x, y, w, h) = if is_row {
            (
                inner.x as i32 + main_pos,
                (inner.y + cross_offset) as i32,
                clamped_main,
                clamped_cross,
            )
        } else {
            (
                (inner.x + cross_offset) as i32,
                inner.y as i32 + main_pos,
                clamped_cross,
                clamped_main,
            )
        };

        let child_rect = if element.clip {
            confine(x, y, w, h, inner)
        } else {
            Rect::new(x.max(0) as u16, y.max(0) as u16, w, h)
        };

        result.insert(child.id.clone(), child_rect);
        layout_children(child, child_rect, result);

        offset += margin_before as i32 + main as i32 + margin_after as i32 + between_gap as i32;
    }

    // Absolute children position themselves against the content box
    for child in absolute_children {
        layout_absolute(child, inner, result);
    }
}

/// Intersect a child rect (in signed coordinates) with the parent's
/// content box.
fn confine(x: i32, y: i32, width: u16, height: u16, bounds: Rect) -> Rect {
    let x0 = x.max(bounds.x as i32);
    let y0 = y.max(bounds.y as i32);
    let x1 = (x + width as i32).min(bounds.right() as i32);
    let y1 = (y + height as i32).min(bounds.bottom() as i32);
    if x1 <= x0 || y1 <= y0 {
        return Rect::new(x0.max(0) as u16, y0.max(0) as u16, 0, 0);
    }
    Rect::new(x0 as u16, y0 as u16, (x1 - x0) as u16, (y1 - y0) as u16)
}

fn resolve_size(size: Size, available: u16, element: &Element, is_width: bool) -> u16 {
    match size {
        Size::Fixed(n) => n.min(available),
        Size::Fill => available,
        Size::Auto => estimate_size(element, is_width).min(available),
    }
}

fn estimate_size(element: &Element, is_width: bool) -> u16 {
    let border_size = if element.style.border == Border::None {
        0
    } else {
        2
    };
    let padding = if is_width {
        element.padding.horizontal_total()
    } else {
        element.padding.vertical_total()
    };

    let content_size = match &element.content {
        Content::Text(text) => {
            if is_width {
                text.lines()
                    .map(|line| display_width(line) as u16)
                    .max()
                    .unwrap_or(0)
            } else {
                text.lines().count().max(1) as u16
            }
        }
        Content::Children(children) => {
            if children.is_empty() {
                0
            } else if element.direction == Direction::Row && is_width
                || element.direction == Direction::Column && !is_width
            {
                // Sum along main axis
                let gap_total = element.gap * (children.len().saturating_sub(1)) as u16;
                children
                    .iter()
                    .filter(|c| c.position != Position::Absolute)
                    .map(|c| estimate_size(c, is_width))
                    .sum::<u16>()
                    + gap_total
            } else {
                // Max along cross axis
                children
                    .iter()
                    .filter(|c| c.position != Position::Absolute)
                    .map(|c| estimate_size(c, is_width))
                    .max()
                    .unwrap_or(0)
            }
        }
        Content::None => 0,
    };

    content_size + padding + border_size
}
