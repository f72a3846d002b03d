use crate::animation::AnimationState;
use crate::buffer::{Buffer, Cell};
use crate::element::{Content, Element};
use crate::layout::{LayoutResult, Rect};
use crate::page::Page;
use crate::text::{align_offset, char_width, display_width, truncate_to_width};
use crate::types::{Border, Color, Rgb};

/// One element ready to paint: resolved rect, accumulated clip, opacity
/// product, and animated colors.
struct RenderItem<'a> {
    element: &'a Element,
    /// 0 for the root tree, 1.. for overlay entries in push order.
    layer: usize,
    z_index: i16,
    tree_order: usize,
    rect: Rect,
    clip: Option<Rect>,
    opacity: f32,
    background: Option<Color>,
    foreground: Option<Color>,
}

/// Values inherited down the tree during collection.
#[derive(Clone, Copy)]
struct Inherited {
    layer: usize,
    z_index: i16,
    clip: Option<Rect>,
    /// Cumulative animated position delta from ancestors.
    offset: (i16, i16),
    /// Cumulative opacity product from ancestors.
    opacity: f32,
}

/// Paint a whole page into the buffer.
///
/// Collects paint items depth-first with accumulated position deltas,
/// opacity products and clip rects; sorts by (layer, z-index, tree
/// order) so overlay entries always sit above the root; then paints
/// backgrounds, borders and text per item.
pub fn render_to_buffer(
    page: &Page,
    layout: &LayoutResult,
    animation: &AnimationState,
    buf: &mut Buffer,
) {
    let mut render_list: Vec<RenderItem> = Vec::new();

    let mut order = collect_elements(
        &page.root,
        layout,
        animation,
        &mut render_list,
        0,
        Inherited {
            layer: 0,
            z_index: page.root.z_index,
            clip: None,
            offset: (0, 0),
            opacity: 1.0,
        },
    );
    for (i, entry) in page.overlay.iter().enumerate() {
        order = collect_elements(
            entry,
            layout,
            animation,
            &mut render_list,
            order,
            Inherited {
                layer: i + 1,
                z_index: entry.z_index,
                clip: None,
                offset: (0, 0),
                opacity: 1.0,
            },
        );
    }

    // Stable sort preserves tree order within a layer and z level
    render_list.sort_by_key(|item| (item.layer, item.z_index, item.tree_order));

    for item in &render_list {
        paint_item(item, buf);
    }
}

fn collect_elements<'a>(
    element: &'a Element,
    layout: &LayoutResult,
    animation: &AnimationState,
    list: &mut Vec<RenderItem<'a>>,
    tree_order: usize,
    inherited: Inherited,
) -> usize {
    let mut order = tree_order;

    let Some(layout_rect) = layout.get(&element.id) else {
        return order;
    };

    // Children inherit the parent's z_index as a minimum
    let effective_z = element.z_index.max(inherited.z_index);

    let resolved = animation.resolve(&element.id);
    let offset = (
        inherited.offset.0 + resolved.dx,
        inherited.offset.1 + resolved.dy,
    );
    let opacity = inherited.opacity * resolved.opacity.unwrap_or(element.opacity);

    // Position after animated deltas, size after animated overrides
    let rect = Rect::new(
        (layout_rect.x as i16 + offset.0).max(0) as u16,
        (layout_rect.y as i16 + offset.1).max(0) as u16,
        resolved.width.unwrap_or(layout_rect.width),
        resolved.height.unwrap_or(layout_rect.height),
    );

    // Children clip to the content box when the element clips or its
    // size is mid-animation (a panel growing open reveals its rows).
    let animating_size = resolved.width.is_some() || resolved.height.is_some();
    let child_clip = if element.clip || animating_size {
        Some(intersect_rects(
            content_box(element, rect),
            inherited.clip,
        ))
    } else {
        inherited.clip
    };

    list.push(RenderItem {
        element,
        layer: inherited.layer,
        z_index: effective_z,
        tree_order: order,
        rect,
        clip: inherited.clip,
        opacity,
        background: resolved.background.or(element.style.background),
        foreground: resolved.foreground.or(element.style.foreground),
    });
    order += 1;

    if let Content::Children(children) = &element.content {
        let child_inherited = Inherited {
            layer: inherited.layer,
            z_index: effective_z,
            clip: child_clip,
            offset,
            opacity,
        };
        for child in children {
            order = collect_elements(child, layout, animation, list, order, child_inherited);
        }
    }

    order
}

/// The rect inside an element's border and padding.
fn content_box(element: &Element, rect: Rect) -> Rect {
    let border_size = if element.style.border == Border::None {
        0
    } else {
        1
    };
    rect.shrink(
        element.padding.top + border_size,
        element.padding.right + border_size,
        element.padding.bottom + border_size,
        element.padding.left + border_size,
    )
}

fn intersect_rects(rect: Rect, parent_clip: Option<Rect>) -> Rect {
    match parent_clip {
        None => rect,
        Some(clip) => {
            let x = rect.x.max(clip.x);
            let y = rect.y.max(clip.y);
            let right = rect.right().min(clip.right());
            let bottom = rect.bottom().min(clip.bottom());
            Rect::new(x, y, right.saturating_sub(x), bottom.saturating_sub(y))
        }
    }
}

fn paint_item(item: &RenderItem, buf: &mut Buffer) {
    if item.opacity <= 0.001 {
        return;
    }

    let visible_rect = intersect_rects(item.rect, item.clip);
    if visible_rect.is_empty() {
        return;
    }

    if let Some(bg) = item.background {
        fill_rect(buf, visible_rect, bg, item.opacity);
    }

    render_border(item, buf);

    if let Content::Text(text) = &item.element.content {
        render_text(text, item, buf);
    }
}

/// Fill a rect with a background color.
///
/// An opaque fill clears the glyph; a translucent fill composites over
/// whatever is already in the cell and preserves the glyph, which is how
/// the indicator pill tints the label under it instead of erasing it.
fn fill_rect(buf: &mut Buffer, rect: Rect, bg: Color, opacity: f32) {
    let color = bg.with_alpha(bg.a * opacity);
    if color.is_transparent() {
        return;
    }
    let opaque = color.is_opaque();
    for y in rect.y..rect.bottom().min(buf.height()) {
        for x in rect.x..rect.right().min(buf.width()) {
            if let Some(cell) = buf.get_mut(x, y) {
                if opaque {
                    cell.symbol = ' ';
                    cell.bg = Rgb::new(color.r, color.g, color.b);
                    cell.wide_continuation = false;
                } else {
                    cell.bg = color.over(cell.bg);
                }
            }
        }
    }
}

fn render_border(item: &RenderItem, buf: &mut Buffer) {
    let (tl, tr, bl, br, h, v) = match item.element.style.border {
        Border::None => return,
        Border::Single => ('┌', '┐', '└', '┘', '─', '│'),
        Border::Rounded => ('╭', '╮', '╰', '╯', '─', '│'),
    };

    let rect = item.rect;
    if rect.width < 2 || rect.height < 2 {
        return;
    }

    let color = item
        .element
        .style
        .border_color
        .or(item.foreground)
        .unwrap_or(Color::white(1.0));
    let color = color.with_alpha(color.a * item.opacity);
    if color.is_transparent() {
        return;
    }

    let clip = item.clip;
    let is_visible =
        |x: u16, y: u16| -> bool { clip.is_none_or(|c| c.contains(x, y)) };

    // Corners
    if is_visible(rect.x, rect.y) {
        set_symbol(buf, rect.x, rect.y, tl, color);
    }
    if is_visible(rect.right() - 1, rect.y) {
        set_symbol(buf, rect.right() - 1, rect.y, tr, color);
    }
    if is_visible(rect.x, rect.bottom() - 1) {
        set_symbol(buf, rect.x, rect.bottom() - 1, bl, color);
    }
    if is_visible(rect.right() - 1, rect.bottom() - 1) {
        set_symbol(buf, rect.right() - 1, rect.bottom() - 1, br, color);
    }

    // Horizontal lines
    for x in (rect.x + 1)..(rect.right() - 1) {
        if is_visible(x, rect.y) {
            set_symbol(buf, x, rect.y, h, color);
        }
        if is_visible(x, rect.bottom() - 1) {
            set_symbol(buf, x, rect.bottom() - 1, h, color);
        }
    }

    // Vertical lines
    for y in (rect.y + 1)..(rect.bottom() - 1) {
        if is_visible(rect.x, y) {
            set_symbol(buf, rect.x, y, v, color);
        }
        if is_visible(rect.right() - 1, y) {
            set_symbol(buf, rect.right() - 1, y, v, color);
        }
    }
}

/// Place a glyph, compositing its color against the cell background.
fn set_symbol(buf: &mut Buffer, x: u16, y: u16, symbol: char, color: Color) {
    if let Some(cell) = buf.get_mut(x, y) {
        cell.symbol = symbol;
        cell.fg = color.over(cell.bg);
        cell.wide_continuation = false;
    }
}

fn render_text(text: &str, item: &RenderItem, buf: &mut Buffer) {
    let fg = item.foreground.unwrap_or(Color::white(1.0));
    let fg = fg.with_alpha(fg.a * item.opacity);
    if fg.is_transparent() {
        return;
    }

    let element = item.element;
    let inner = content_box(element, item.rect);
    if inner.is_empty() {
        return;
    }
    let max_width = inner.width as usize;
    let clip = item.clip;

    for (line_idx, line) in text.lines().enumerate() {
        let y = inner.y + line_idx as u16;
        if y >= inner.bottom() {
            break;
        }
        if let Some(c) = clip {
            if y < c.y || y >= c.bottom() {
                continue;
            }
        }

        let line = truncate_to_width(line, max_width);
        let x_offset = align_offset(display_width(&line), max_width, element.text_align) as u16;
        let mut x = inner.x + x_offset;

        for ch in line.chars() {
            let ch_w = char_width(ch);
            if ch_w == 0 {
                // Zero-width char (combining mark, etc.)
                continue;
            }
            if x + ch_w as u16 > inner.right() {
                break;
            }
            if let Some(c) = clip {
                if x < c.x || x >= c.right() {
                    x += ch_w as u16;
                    continue;
                }
            }

            let below = buf.get(x, y).map(|cell| cell.bg).unwrap_or_default();
            buf.set(
                x,
                y,
                Cell::new(ch)
                    .with_fg(fg.over(below))
                    .with_bg(below)
                    .with_style(element.style.text_style),
            );

            // Wide chars (CJK) occupy a second cell via a continuation marker
            if ch_w == 2 && x + 1 < inner.right() {
                let cont_x = x + 1;
                if clip.is_none_or(|c| c.contains(cont_x, y)) {
                    let below = buf.get(cont_x, y).map(|cell| cell.bg).unwrap_or_default();
                    let mut continuation = Cell::new(' ')
                        .with_fg(fg.over(below))
                        .with_bg(below)
                        .with_style(element.style.text_style);
                    continuation.wide_continuation = true;
                    buf.set(cont_x, y, continuation);
                }
            }

            x += ch_w as u16;
        }
    }
}
