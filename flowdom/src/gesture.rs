use crossterm::event::{
    Event as CrosstermEvent, KeyEventKind, MouseButton as CrosstermButton, MouseEventKind,
};

use crate::event::{Event, Key, Modifiers};
use crate::hit::{hit_test_any_page, hit_test_hoverable_page, hit_test_interactive_page};
use crate::layout::LayoutResult;
use crate::page::Page;

/// Per-session pointer tracker translating raw crossterm events into
/// high-level gestures against the current page.
///
/// Owns the hover, press and drag bookkeeping so widgets only ever see
/// resolved events: `Press`/`Tap` for clicks, `HoverEnter`/`HoverExit`
/// diffs, and captured `DragStart`/`DragUpdate`/`DragEnd` sequences.
#[derive(Debug, Default)]
pub struct PointerState {
    hovered: Option<String>,
    pressed: Option<Pressed>,
    drag: Option<String>,
}

#[derive(Debug, Clone)]
struct Pressed {
    /// Topmost interactive element under the press, if any.
    target: Option<String>,
    x: u16,
    y: u16,
    draggable: bool,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently hovered element ID.
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Target of the drag in flight, if any.
    pub fn dragging(&self) -> Option<&str> {
        self.drag.as_deref()
    }

    /// Process raw crossterm events and produce high-level events.
    pub fn process(
        &mut self,
        raw: &[CrosstermEvent],
        page: &Page,
        layout: &LayoutResult,
    ) -> Vec<Event> {
        let mut events = Vec::new();

        for raw_event in raw {
            match raw_event {
                CrosstermEvent::Key(key_event) => {
                    // Only process key press events (not release/repeat on some terminals)
                    if key_event.kind != KeyEventKind::Press {
                        continue;
                    }
                    let Some(key) = Key::from_crossterm(key_event.code) else {
                        continue;
                    };
                    let modifiers: Modifiers = key_event.modifiers.into();
                    events.push(Event::Key { key, modifiers });
                }

                CrosstermEvent::Mouse(mouse_event) => {
                    let x = mouse_event.column;
                    let y = mouse_event.row;

                    match mouse_event.kind {
                        MouseEventKind::Moved => {
                            self.track_hover(page, layout, x, y, &mut events);
                        }

                        MouseEventKind::Down(CrosstermButton::Left) => {
                            let target = hit_test_interactive_page(layout, page, x, y);
                            let draggable = target
                                .as_deref()
                                .and_then(|id| page.find(id))
                                .is_some_and(|el| el.draggable);
                            if let Some(target) = &target {
                                log::trace!("press on {target} at ({x}, {y})");
                                events.push(Event::Press {
                                    target: target.clone(),
                                    x,
                                    y,
                                });
                            }
                            self.pressed = Some(Pressed {
                                target,
                                x,
                                y,
                                draggable,
                            });
                        }

                        MouseEventKind::Drag(CrosstermButton::Left) => {
                            if let Some(target) = &self.drag {
                                events.push(Event::DragUpdate {
                                    target: target.clone(),
                                    x,
                                    y,
                                });
                            } else if let Some(Pressed {
                                target: Some(target),
                                x: press_x,
                                y: press_y,
                                draggable: true,
                            }) = &self.pressed
                            {
                                // Capture the pointer: the drag target stays
                                // fixed for the whole gesture.
                                let target = target.clone();
                                log::debug!("drag start on {target} at ({press_x}, {press_y})");
                                events.push(Event::DragStart {
                                    target: target.clone(),
                                    x: *press_x,
                                    y: *press_y,
                                });
                                events.push(Event::DragUpdate {
                                    target: target.clone(),
                                    x,
                                    y,
                                });
                                self.drag = Some(target);
                            } else if self.pressed.is_none() {
                                // Motion with a button we never saw go down
                                self.track_hover(page, layout, x, y, &mut events);
                            }
                        }

                        MouseEventKind::Up(CrosstermButton::Left) => {
                            if let Some(target) = self.drag.take() {
                                log::debug!("drag end on {target} at ({x}, {y})");
                                events.push(Event::DragEnd { target, x, y });
                            } else {
                                let target = hit_test_interactive_page(layout, page, x, y);
                                log::debug!("tap on {target:?} at ({x}, {y})");
                                events.push(Event::Tap { target, x, y });
                            }
                            self.pressed = None;
                        }

                        MouseEventKind::ScrollUp => {
                            let target = hit_test_any_page(layout, page, x, y);
                            events.push(Event::Scroll {
                                target,
                                delta: -1,
                                x,
                                y,
                            });
                        }

                        MouseEventKind::ScrollDown => {
                            let target = hit_test_any_page(layout, page, x, y);
                            events.push(Event::Scroll {
                                target,
                                delta: 1,
                                x,
                                y,
                            });
                        }

                        _ => {}
                    }
                }

                CrosstermEvent::Resize(width, height) => {
                    events.push(Event::Resize {
                        width: *width,
                        height: *height,
                    });
                }

                _ => {}
            }
        }

        events
    }

    /// Diff the hovered element, emitting exit-then-enter on change.
    /// Suppressed while a drag is in flight.
    fn track_hover(
        &mut self,
        page: &Page,
        layout: &LayoutResult,
        x: u16,
        y: u16,
        events: &mut Vec<Event>,
    ) {
        if self.drag.is_some() {
            return;
        }
        let target = hit_test_hoverable_page(layout, page, x, y);
        if target == self.hovered {
            return;
        }
        log::trace!("hover {:?} -> {:?}", self.hovered, target);
        if let Some(old) = self.hovered.take() {
            events.push(Event::HoverExit { target: old });
        }
        if let Some(new) = &target {
            events.push(Event::HoverEnter {
                target: new.clone(),
            });
        }
        self.hovered = target;
    }
}
