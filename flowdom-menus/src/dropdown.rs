//! Dropdown select - a compact control that floats an option menu into
//! the page overlay.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use flowdom::{
    Border, Color, Easing, Element, Event, LayoutResult, Position, Size, Style, TextAlign,
    ThemeMode, Transitions,
};

use crate::palette::Palette;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

const ANCHOR_HEIGHT: u16 = 3;
const DEFAULT_WIDTH: u16 = 16;
const DEFAULT_MAX_VISIBLE: usize = 3;
/// Height and fade animation for the menu panel.
const MENU_ANIMATION: Duration = Duration::from_millis(300);
/// How long a freshly mounted panel is held at zero size, so its first
/// frame snapshots at zero and the growth animates.
const MOUNT_DELAY: Duration = Duration::from_millis(20);
/// Time from close to removal: the exit fade plus a beat.
const REMOVE_DELAY: Duration = Duration::from_millis(310);

/// Menu lifecycle. Mounting holds the panel collapsed for one mount
/// delay; Closing keeps it in the overlay while the exit animation runs.
#[derive(Debug, Clone, Copy, PartialEq)]
enum MenuPhase {
    Mounting { since: Instant },
    Shown,
    Closing { since: Instant },
}

/// Floating panel state while the menu is open: position captured from
/// the anchor's laid-out rect, hover and scroll bookkeeping, and the
/// lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayMenu {
    left: u16,
    top: u16,
    width: u16,
    hovered: Option<usize>,
    scroll: usize,
    phase: MenuPhase,
}

/// An animated dropdown select.
///
/// The host owns the widget, renders `build(theme)` into its tree and
/// `overlay(theme)` into the page overlay, forwards events to
/// `handle_event`, and calls `tick()` once per frame to advance the
/// menu lifecycle.
///
/// # Example
///
/// ```ignore
/// let mut city = Dropdown::new(["Tokyo", "Osaka", "Kyoto"])
///     .id("city")
///     .default_value("Pick a city")
///     .on_select(|label| log::info!("picked {label}"));
/// ```
pub struct Dropdown {
    id: String,
    options: Vec<String>,
    value: String,
    width: u16,
    max_visible: usize,
    anchor_hovered: bool,
    menu: Option<OverlayMenu>,
    on_select: Option<Box<dyn FnMut(&str)>>,
}

impl Dropdown {
    pub fn new(options: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            id: format!("dropdown-{id}"),
            options: options.into_iter().map(Into::into).collect(),
            value: "None".to_string(),
            width: DEFAULT_WIDTH,
            max_visible: DEFAULT_MAX_VISIBLE,
            anchor_hovered: false,
            menu: None,
            on_select: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Anchor and menu width in cells. Values below 2 are clamped.
    pub fn width(mut self, width: u16) -> Self {
        self.width = width.max(2);
        self
    }

    /// Rows shown before the menu scrolls. Zero is treated as one.
    pub fn max_visible(mut self, max_visible: usize) -> Self {
        self.max_visible = max_visible.max(1);
        self
    }

    /// Display text before anything is selected.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Called with the selected label, before the display text updates.
    pub fn on_select(mut self, on_select: impl FnMut(&str) + 'static) -> Self {
        self.on_select = Some(Box::new(on_select));
        self
    }

    /// Current display text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// True while the menu is mounted, including the closing phase.
    pub fn is_open(&self) -> bool {
        self.menu.is_some()
    }

    /// Advance the menu lifecycle by wall clock. Call once per frame.
    pub fn tick(&mut self) {
        let Some(menu) = &mut self.menu else { return };
        match menu.phase {
            MenuPhase::Mounting { since } => {
                if since.elapsed() >= MOUNT_DELAY {
                    log::debug!("dropdown {} menu shown", self.id);
                    menu.phase = MenuPhase::Shown;
                }
            }
            MenuPhase::Shown => {}
            MenuPhase::Closing { since } => {
                if since.elapsed() >= REMOVE_DELAY {
                    log::debug!("dropdown {} menu removed", self.id);
                    self.menu = None;
                }
            }
        }
    }

    /// The anchor control showing the current selection.
    pub fn build(&self, theme: ThemeMode) -> Element {
        let palette = Palette::of(theme);
        let fill = if self.anchor_hovered {
            palette.anchor_hover
        } else {
            palette.anchor_bg
        };

        Element::text(&self.value)
            .id(&self.id)
            .width(Size::Fixed(self.width))
            .height(Size::Fixed(ANCHOR_HEIGHT))
            .text_align(TextAlign::Center)
            .hoverable(true)
            .clickable(true)
            .style(
                Style::new()
                    .background(fill)
                    .foreground(palette.text)
                    .border(Border::Rounded)
                    .border_color(palette.border),
            )
    }

    /// The overlay entry while the menu is open: a full-screen scrim
    /// that catches outside taps, holding the absolutely positioned
    /// panel. The panel mounts collapsed and grows to its target height;
    /// the exit fades it out at full size.
    pub fn overlay(&self, theme: ThemeMode) -> Option<Element> {
        let menu = self.menu.as_ref()?;
        let palette = Palette::of(theme);

        let target_height = self.menu_height();
        let (height, opacity) = match menu.phase {
            MenuPhase::Mounting { .. } => (0, 0.0),
            MenuPhase::Shown => (target_height, 1.0),
            MenuPhase::Closing { .. } => (target_height, 0.0),
        };

        let mut rows = Element::col()
            .id(format!("{}-rows", self.id))
            .width(Size::Fill)
            .height(Size::Fill)
            .clip(true)
            .scroll_y(menu.scroll as u16);
        for (i, option) in self.options.iter().enumerate() {
            let fill = if menu.hovered == Some(i) {
                palette.row_hover
            } else {
                Color::white(0.0)
            };
            rows = rows.child(
                Element::text(option)
                    .id(format!("{}-opt-{}", self.id, i))
                    .width(Size::Fill)
                    .height(Size::Fixed(1))
                    .text_align(TextAlign::Center)
                    .hoverable(true)
                    .clickable(true)
                    .style(Style::new().background(fill).foreground(palette.text)),
            );
        }

        let panel = Element::box_()
            .id(format!("{}-menu", self.id))
            .position(Position::Absolute)
            .left(menu.left as i16)
            .top(menu.top as i16)
            .z_index(100) // Render above other content
            .width(Size::Fixed(menu.width))
            .height(Size::Fixed(height))
            .opacity(opacity)
            .style(
                Style::new()
                    .background(palette.surface)
                    .border(Border::Rounded)
                    .border_color(palette.border),
            )
            .transitions(
                Transitions::new()
                    .height(MENU_ANIMATION, Easing::EaseOut)
                    .fade(MENU_ANIMATION, Easing::EaseOut),
            )
            .child(rows);

        Some(
            Element::box_()
                .id(format!("{}-scrim", self.id))
                .width(Size::Fill)
                .height(Size::Fill)
                .clickable(true)
                .child(panel),
        )
    }

    pub fn handle_event(&mut self, event: &Event, layout: &LayoutResult) {
        match event {
            Event::HoverEnter { target } if *target == self.id => {
                self.anchor_hovered = true;
            }
            Event::HoverExit { target } if *target == self.id => {
                self.anchor_hovered = false;
            }
            Event::HoverEnter { target } => {
                if let Some(i) = self.row_index(target) {
                    if let Some(menu) = &mut self.menu {
                        menu.hovered = Some(i);
                    }
                }
            }
            Event::HoverExit { target } => {
                if let Some(i) = self.row_index(target) {
                    if let Some(menu) = &mut self.menu {
                        if menu.hovered == Some(i) {
                            menu.hovered = None;
                        }
                    }
                }
            }
            Event::Tap {
                target: Some(target),
                ..
            } if *target == self.id => {
                self.open(layout);
            }
            Event::Tap { target, .. } => {
                let Some(menu) = &self.menu else { return };
                if matches!(menu.phase, MenuPhase::Closing { .. }) {
                    return;
                }
                if let Some(i) = target.as_deref().and_then(|t| self.row_index(t)) {
                    self.select(i);
                } else {
                    // Scrim or anywhere outside the rows
                    log::debug!("dropdown {} dismissed", self.id);
                    self.begin_close();
                }
            }
            Event::Scroll {
                target: Some(target),
                delta,
                ..
            } => {
                if !self.menu_contains(target) || self.options.len() <= self.max_visible {
                    return;
                }
                let max_scroll = (self.options.len() - self.max_visible) as i32;
                if let Some(menu) = &mut self.menu {
                    menu.scroll = (menu.scroll as i32 + *delta as i32).clamp(0, max_scroll) as usize;
                }
            }
            _ => {}
        }
    }

    /// Target panel height: visible rows plus the border.
    fn menu_height(&self) -> u16 {
        self.options.len().min(self.max_visible) as u16 + 2
    }

    fn open(&mut self, layout: &LayoutResult) {
        if self.menu.is_some() || self.options.is_empty() {
            return;
        }
        let Some(anchor) = layout.get(&self.id) else {
            return;
        };
        log::debug!(
            "dropdown {} opening at ({}, {})",
            self.id,
            anchor.x,
            anchor.bottom()
        );
        self.menu = Some(OverlayMenu {
            left: anchor.x,
            top: anchor.bottom(),
            width: anchor.width,
            hovered: None,
            scroll: 0,
            phase: MenuPhase::Mounting {
                since: Instant::now(),
            },
        });
    }

    fn begin_close(&mut self) {
        if let Some(menu) = &mut self.menu {
            if !matches!(menu.phase, MenuPhase::Closing { .. }) {
                menu.phase = MenuPhase::Closing {
                    since: Instant::now(),
                };
            }
        }
    }

    fn select(&mut self, index: usize) {
        let Some(option) = self.options.get(index) else {
            return;
        };
        let option = option.clone();
        log::debug!("dropdown {} selected {option:?}", self.id);
        if let Some(on_select) = &mut self.on_select {
            on_select(&option);
        }
        // Callback first, then the display text
        self.value = option;
        self.begin_close();
    }

    fn row_index(&self, target: &str) -> Option<usize> {
        let rest = target.strip_prefix(self.id.as_str())?.strip_prefix("-opt-")?;
        rest.parse().ok()
    }

    /// Whether a hit target is part of the open menu panel.
    fn menu_contains(&self, target: &str) -> bool {
        if self.menu.is_none() {
            return false;
        }
        let Some(rest) = target.strip_prefix(self.id.as_str()) else {
            return false;
        };
        rest == "-menu" || rest == "-rows" || rest.starts_with("-opt-")
    }
}
