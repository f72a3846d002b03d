//! Liquid menu switcher - a horizontal menu bar whose indicator pill
//! slides between entries and can be grabbed and dragged directly.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use flowdom::{
    Easing, Element, Event, Position, Size, Style, TextAlign, ThemeMode, Transitions,
};

use crate::palette::Palette;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

const DEFAULT_WIDTH: u16 = 48;
const BAR_HEIGHT: u16 = 3;
/// Pill snap and label fade animation.
const SNAP_ANIMATION: Duration = Duration::from_millis(200);

/// Emitted to the selection callback when a menu entry is committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectEvent {
    pub index: usize,
    pub label: String,
}

/// Pill drag bookkeeping, in fractional cells relative to the track.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragState {
    /// Pill left edge when the drag started.
    base_left: f32,
    /// Pointer column when the drag started.
    base_x: f32,
    /// Current pill left edge.
    left: f32,
    /// Entry the pill currently sits over.
    index: usize,
}

/// A menu switcher with a liquid indicator pill.
///
/// The host owns the widget, renders `build(theme)` into its tree each
/// frame, and forwards events to `handle_event`. Tapping an entry or
/// releasing a dragged pill commits the selection and fires the
/// callback; the pill animates to its new rest position.
pub struct MenuSwitcher {
    id: String,
    labels: Vec<String>,
    width: u16,
    selected: usize,
    highlight: usize,
    pressed: Option<usize>,
    drag: Option<DragState>,
    on_select: Option<Box<dyn FnMut(&SelectEvent)>>,
}

impl Default for MenuSwitcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuSwitcher {
    /// A switcher with the stock menu entries. The first entry starts
    /// selected without firing the callback.
    pub fn new() -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            id: format!("switcher-{id}"),
            labels: ["Menu", "App", "Settings", "Account"]
                .map(String::from)
                .to_vec(),
            width: DEFAULT_WIDTH,
            selected: 0,
            highlight: 0,
            pressed: None,
            drag: None,
            on_select: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn labels(mut self, labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.labels = labels.into_iter().map(Into::into).collect();
        self.selected = 0;
        self.highlight = 0;
        self
    }

    /// Overall bar width in cells, borders included.
    pub fn width(mut self, width: u16) -> Self {
        self.width = width.max(4);
        self
    }

    /// Called on every committed selection, tap or drag release.
    pub fn on_select(mut self, on_select: impl FnMut(&SelectEvent) + 'static) -> Self {
        self.on_select = Some(Box::new(on_select));
        self
    }

    /// Index of the committed selection.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// True while the pill is being dragged.
    pub fn dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn build(&self, theme: ThemeMode) -> Element {
        let palette = Palette::of(theme);
        let slot = self.slot_width();

        let mut track = Element::row()
            .id(format!("{}-track", self.id))
            .position(Position::Absolute)
            .left(1)
            .top(1)
            .width(Size::Fixed(self.inner_width()))
            .height(Size::Fixed(1))
            .style(Style::new().background(palette.track));
        for (i, label) in self.labels.iter().enumerate() {
            let (start, end) = self.button_span(i);
            let fg = if self.highlight == i {
                palette.label_active
            } else {
                palette.label
            };
            let opacity = if self.pressed == Some(i) { 0.7 } else { 1.0 };
            track = track.child(
                Element::text(label)
                    .id(format!("{}-btn-{}", self.id, i))
                    .width(Size::Fixed(end.saturating_sub(start)))
                    .height(Size::Fixed(1))
                    .text_align(TextAlign::Center)
                    .clickable(true)
                    .opacity(opacity)
                    .style(Style::new().foreground(fg))
                    .transitions(Transitions::new().fade(SNAP_ANIMATION, Easing::EaseOut)),
            );
        }

        let mut bar = Element::box_()
            .id(&self.id)
            .width(Size::Fixed(self.width))
            .height(Size::Fixed(BAR_HEIGHT))
            .child(track);
        if let Some(pill) = self.pill(&palette, slot) {
            bar = bar.child(pill);
        }
        bar
    }

    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Press { target, .. } => {
                if let Some(i) = self.button_index(target) {
                    self.pressed = Some(i);
                }
            }
            Event::Tap { target, .. } => {
                self.pressed = None;
                if let Some(i) = target.as_deref().and_then(|t| self.button_index(t)) {
                    self.switch_to(i);
                }
            }
            Event::DragStart { target, x, .. } if self.is_pill(target) => {
                if self.labels.is_empty() {
                    return;
                }
                let base = self.rest_base_left();
                self.drag = Some(DragState {
                    base_left: base,
                    base_x: *x as f32,
                    left: base,
                    index: self.selected,
                });
                log::debug!("switcher {} drag start at {base}", self.id);
            }
            Event::DragUpdate { target, x, .. } if self.is_pill(target) => {
                let Some(mut drag) = self.drag else { return };
                let slot = self.slot_width();
                let max_left = (self.labels.len().saturating_sub(1)) as f32 * slot;
                drag.left = (drag.base_left + (*x as f32 - drag.base_x)).clamp(0.0, max_left);
                drag.index =
                    ((drag.left / slot).round() as usize).min(self.labels.len().saturating_sub(1));
                self.highlight = drag.index;
                self.drag = Some(drag);
            }
            Event::DragEnd { target, .. } if self.is_pill(target) => {
                let Some(drag) = self.drag.take() else { return };
                log::debug!("switcher {} drag end on {}", self.id, drag.index);
                self.pressed = None;
                self.selected = drag.index;
                self.highlight = drag.index;
                self.fire();
            }
            _ => {}
        }
    }

    /// Commit a selection as if its entry had been tapped.
    pub fn switch_to(&mut self, index: usize) {
        if self.labels.is_empty() {
            return;
        }
        let index = index.min(self.labels.len() - 1);
        self.drag = None;
        self.selected = index;
        self.highlight = index;
        self.fire();
    }

    fn fire(&mut self) {
        let Some(label) = self.labels.get(self.selected) else {
            return;
        };
        let event = SelectEvent {
            index: self.selected,
            label: label.clone(),
        };
        log::debug!("switcher {} selected {} {:?}", self.id, event.index, event.label);
        if let Some(on_select) = &mut self.on_select {
            on_select(&event);
        }
    }

    /// The indicator pill. At rest it underlines the selected entry and
    /// animates between positions; while dragged it swells to a full
    /// height slot that tracks the pointer without animation.
    fn pill(&self, palette: &Palette, slot: f32) -> Option<Element> {
        if self.labels.is_empty() {
            return None;
        }
        let pill = Element::box_()
            .id(format!("{}-pill", self.id))
            .position(Position::Absolute)
            .draggable(true);
        Some(if let Some(drag) = &self.drag {
            pill.left(1 + drag.left.round() as i16)
                .top(0)
                .width(Size::Fixed(slot.round() as u16))
                .height(Size::Fixed(BAR_HEIGHT))
                .style(Style::new().background(palette.indicator_drag))
        } else {
            let (left, width) = self.rest_pill_span();
            pill.left(1 + left as i16)
                .top(1)
                .width(Size::Fixed(width))
                .height(Size::Fixed(1))
                .style(Style::new().background(palette.indicator))
                .transitions(
                    Transitions::new()
                        .position(SNAP_ANIMATION, Easing::EaseOut)
                        .size(SNAP_ANIMATION, Easing::EaseOut),
                )
        })
    }

    fn inner_width(&self) -> u16 {
        self.width.saturating_sub(2)
    }

    /// Track cells per entry, fractional so uneven widths distribute.
    fn slot_width(&self) -> f32 {
        if self.labels.is_empty() {
            return 1.0;
        }
        (self.inner_width() as f32 / self.labels.len() as f32).max(1.0)
    }

    /// Cell span of an entry's button within the track.
    fn button_span(&self, index: usize) -> (u16, u16) {
        let slot = self.slot_width();
        let start = (index as f32 * slot).round() as u16;
        let end = ((index + 1) as f32 * slot).round() as u16;
        (start, end.min(self.inner_width()))
    }

    /// Rest pill placement: edge entries pull the pill inward by the
    /// same nudge the drag baseline uses, so it never kisses the border.
    fn rest_pill_span(&self) -> (u16, u16) {
        let (start, end) = self.button_span(self.selected);
        let span = end.saturating_sub(start);
        if self.labels.len() == 1 {
            return (start, span);
        }
        if self.selected == 0 {
            (start + 2, span.saturating_sub(2))
        } else if self.selected == self.labels.len() - 1 {
            (start, span.saturating_sub(2))
        } else {
            (start, span)
        }
    }

    /// Drag origin for the pill, nudged off the track edges.
    fn rest_base_left(&self) -> f32 {
        let slot = self.slot_width();
        let mut base = self.selected as f32 * slot;
        if self.selected == 0 {
            base += 1.0;
        }
        if self.selected + 1 == self.labels.len() {
            base -= 1.0;
        }
        base.max(0.0)
    }

    fn button_index(&self, target: &str) -> Option<usize> {
        let rest = target.strip_prefix(self.id.as_str())?.strip_prefix("-btn-")?;
        rest.parse().ok().filter(|i| *i < self.labels.len())
    }

    fn is_pill(&self, target: &str) -> bool {
        target.strip_prefix(self.id.as_str()) == Some("-pill")
    }
}
