use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use crate::element::{Content, Element};
use crate::layout::LayoutResult;
use crate::page::Page;
use crate::transitions::{Easing, TransitionConfig};
use crate::types::Color;

/// Which property is being transitioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionProperty {
    Left,
    Top,
    Width,
    Height,
    Opacity,
    Background,
    Foreground,
}

const ALL_PROPERTIES: [TransitionProperty; 7] = [
    TransitionProperty::Left,
    TransitionProperty::Top,
    TransitionProperty::Width,
    TransitionProperty::Height,
    TransitionProperty::Opacity,
    TransitionProperty::Background,
    TransitionProperty::Foreground,
];

/// A property value that can be interpolated.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    I16(i16),
    U16(u16),
    F32(f32),
    Color(Color),
}

/// Last-seen target values for one element: laid-out position and size,
/// opacity, style colors.
#[derive(Debug, Clone)]
struct ElementSnapshot {
    x: i16,
    y: i16,
    width: u16,
    height: u16,
    opacity: f32,
    background: Option<Color>,
    foreground: Option<Color>,
}

/// A single active transition.
#[derive(Debug, Clone)]
struct ActiveTransition {
    from: PropertyValue,
    to: PropertyValue,
    start: Instant,
    duration: Duration,
    easing: Easing,
}

/// Interpolated overrides for one element, consumed by the renderer.
///
/// `dx`/`dy` are deltas from the laid-out position and shift the whole
/// subtree; `width`/`height` override the painted size and clip the
/// subtree to it; `opacity` replaces the element's declared opacity in
/// the subtree product. Fields are `None`/zero when nothing is in
/// flight, so the renderer falls through to layout and style values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Resolved {
    pub dx: i16,
    pub dy: i16,
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub opacity: Option<f32>,
    pub background: Option<Color>,
    pub foreground: Option<Color>,
}

/// Manages animation state across frames.
///
/// Once per rendered frame [`update`](AnimationState::update) diffs every
/// element's targets against the previous frame's snapshot and starts
/// transitions where a configured property changed. An interrupted
/// transition restarts from its current interpolated value, so
/// retargeting never jumps. An element's first appearance only records a
/// snapshot: mounting at a zero size and growing on the next frame is
/// what produces an entrance animation.
#[derive(Debug, Default)]
pub struct AnimationState {
    /// Previous frame's target values per element.
    snapshots: HashMap<String, ElementSnapshot>,
    /// Currently active transitions: (element_id, property) -> transition.
    active: HashMap<(String, TransitionProperty), ActiveTransition>,
    /// Reduced motion flag - when true, properties snap to targets.
    reduced_motion: bool,
}

impl AnimationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable reduced motion (accessibility).
    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.reduced_motion = enabled;
    }

    /// Returns true if any transition is currently active.
    pub fn has_active(&self) -> bool {
        !self.active.is_empty()
    }

    /// Update animation state for one frame of the page.
    ///
    /// Prunes completed transitions (resolve then falls through to the
    /// target values), diffs snapshots, and drops state for ids that
    /// left the tree.
    pub fn update(&mut self, page: &Page, layout: &LayoutResult) {
        let now = Instant::now();

        self.active
            .retain(|_, transition| now.duration_since(transition.start) < transition.duration);

        let mut seen = HashSet::new();
        self.update_element(&page.root, layout, now, &mut seen);
        for entry in &page.overlay {
            self.update_element(entry, layout, now, &mut seen);
        }

        self.snapshots.retain(|id, _| seen.contains(id));
        self.active.retain(|(id, _), _| seen.contains(id));
    }

    fn update_element(
        &mut self,
        element: &Element,
        layout: &LayoutResult,
        now: Instant,
        seen: &mut HashSet<String>,
    ) {
        seen.insert(element.id.clone());

        if let Some(rect) = layout.get(&element.id) {
            let current = ElementSnapshot {
                x: rect.x as i16,
                y: rect.y as i16,
                width: rect.width,
                height: rect.height,
                opacity: element.opacity,
                background: element.style.background,
                foreground: element.style.foreground,
            };

            if let Some(prev) = self.snapshots.get(&element.id).cloned() {
                let transitions = &element.transitions;
                self.check_and_start(
                    &element.id,
                    TransitionProperty::Left,
                    PropertyValue::I16(prev.x),
                    PropertyValue::I16(current.x),
                    transitions.left,
                    now,
                );
                self.check_and_start(
                    &element.id,
                    TransitionProperty::Top,
                    PropertyValue::I16(prev.y),
                    PropertyValue::I16(current.y),
                    transitions.top,
                    now,
                );
                self.check_and_start(
                    &element.id,
                    TransitionProperty::Width,
                    PropertyValue::U16(prev.width),
                    PropertyValue::U16(current.width),
                    transitions.width,
                    now,
                );
                self.check_and_start(
                    &element.id,
                    TransitionProperty::Height,
                    PropertyValue::U16(prev.height),
                    PropertyValue::U16(current.height),
                    transitions.height,
                    now,
                );
                self.check_and_start(
                    &element.id,
                    TransitionProperty::Opacity,
                    PropertyValue::F32(prev.opacity),
                    PropertyValue::F32(current.opacity),
                    transitions.opacity,
                    now,
                );
                if let (Some(prev_bg), Some(curr_bg)) = (prev.background, current.background) {
                    self.check_and_start(
                        &element.id,
                        TransitionProperty::Background,
                        PropertyValue::Color(prev_bg),
                        PropertyValue::Color(curr_bg),
                        transitions.background,
                        now,
                    );
                }
                if let (Some(prev_fg), Some(curr_fg)) = (prev.foreground, current.foreground) {
                    self.check_and_start(
                        &element.id,
                        TransitionProperty::Foreground,
                        PropertyValue::Color(prev_fg),
                        PropertyValue::Color(curr_fg),
                        transitions.foreground,
                        now,
                    );
                }
            }

            self.snapshots.insert(element.id.clone(), current);
        }

        if let Content::Children(children) = &element.content {
            for child in children {
                self.update_element(child, layout, now, seen);
            }
        }
    }

    fn check_and_start(
        &mut self,
        id: &str,
        property: TransitionProperty,
        prev: PropertyValue,
        current: PropertyValue,
        config: Option<TransitionConfig>,
        now: Instant,
    ) {
        let Some(config) = config else { return };

        if prev == current {
            return;
        }

        if self.reduced_motion {
            return;
        }

        let key = (id.to_string(), property);

        // An interrupted transition restarts from its current
        // interpolated value, never from the stale snapshot.
        let from = if let Some(existing) = self.active.get(&key) {
            interpolate_value(
                &existing.from,
                &existing.to,
                existing.start,
                existing.duration,
                existing.easing,
                now,
            )
        } else {
            prev
        };

        log::trace!("transition {id}/{property:?} {from:?} -> {current:?}");

        self.active.insert(
            key,
            ActiveTransition {
                from,
                to: current,
                start: now,
                duration: config.duration,
                easing: config.easing,
            },
        );
    }

    /// Current interpolated value for a property.
    /// Returns None if no transition is active for it.
    pub fn get_interpolated(
        &self,
        element_id: &str,
        property: TransitionProperty,
    ) -> Option<PropertyValue> {
        let key = (element_id.to_string(), property);
        let transition = self.active.get(&key)?;
        Some(interpolate_value(
            &transition.from,
            &transition.to,
            transition.start,
            transition.duration,
            transition.easing,
            Instant::now(),
        ))
    }

    /// Resolve every active transition for an element into renderer
    /// overrides.
    pub fn resolve(&self, id: &str) -> Resolved {
        let now = Instant::now();
        let mut resolved = Resolved::default();

        for property in ALL_PROPERTIES {
            let key = (id.to_string(), property);
            let Some(transition) = self.active.get(&key) else {
                continue;
            };
            let value = interpolate_value(
                &transition.from,
                &transition.to,
                transition.start,
                transition.duration,
                transition.easing,
                now,
            );
            match (property, value, &transition.to) {
                (TransitionProperty::Left, PropertyValue::I16(v), PropertyValue::I16(to)) => {
                    resolved.dx = v - to;
                }
                (TransitionProperty::Top, PropertyValue::I16(v), PropertyValue::I16(to)) => {
                    resolved.dy = v - to;
                }
                (TransitionProperty::Width, PropertyValue::U16(v), _) => {
                    resolved.width = Some(v);
                }
                (TransitionProperty::Height, PropertyValue::U16(v), _) => {
                    resolved.height = Some(v);
                }
                (TransitionProperty::Opacity, PropertyValue::F32(v), _) => {
                    resolved.opacity = Some(v);
                }
                (TransitionProperty::Background, PropertyValue::Color(c), _) => {
                    resolved.background = Some(c);
                }
                (TransitionProperty::Foreground, PropertyValue::Color(c), _) => {
                    resolved.foreground = Some(c);
                }
                _ => {}
            }
        }

        resolved
    }
}

fn interpolate_value(
    from: &PropertyValue,
    to: &PropertyValue,
    start: Instant,
    duration: Duration,
    easing: Easing,
    now: Instant,
) -> PropertyValue {
    let elapsed = now.duration_since(start);
    let progress = if duration.is_zero() {
        1.0
    } else {
        (elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
    };
    let eased = easing.apply(progress);

    match (from, to) {
        (PropertyValue::I16(from_val), PropertyValue::I16(to_val)) => {
            PropertyValue::I16(lerp_i16(*from_val, *to_val, eased))
        }
        (PropertyValue::U16(from_val), PropertyValue::U16(to_val)) => {
            PropertyValue::U16(lerp_u16(*from_val, *to_val, eased))
        }
        (PropertyValue::F32(from_val), PropertyValue::F32(to_val)) => {
            PropertyValue::F32(from_val + (to_val - from_val) * eased)
        }
        (PropertyValue::Color(from_color), PropertyValue::Color(to_color)) => {
            PropertyValue::Color(lerp_color(from_color, to_color, eased))
        }
        _ => to.clone(), // Mismatched types, just use target
    }
}

/// Linear interpolation for i16 values.
fn lerp_i16(from: i16, to: i16, t: f32) -> i16 {
    let from = from as f32;
    let to = to as f32;
    (from + (to - from) * t).round() as i16
}

/// Linear interpolation for u16 values.
fn lerp_u16(from: u16, to: u16, t: f32) -> u16 {
    let from = from as f32;
    let to = to as f32;
    (from + (to - from) * t).round() as u16
}

/// Interpolate colors in OKLCH space, alpha linearly.
fn lerp_color(from: &Color, to: &Color, t: f32) -> Color {
    let (from_l, from_c, from_h) = color_to_oklch(from);
    let (to_l, to_c, to_h) = color_to_oklch(to);

    let l = from_l + (to_l - from_l) * t;
    let c = from_c + (to_c - from_c) * t;

    // Hue interpolation (shortest path around the circle)
    let mut dh = to_h - from_h;
    if dh > 180.0 {
        dh -= 360.0;
    } else if dh < -180.0 {
        dh += 360.0;
    }
    let h = (from_h + dh * t).rem_euclid(360.0);

    let a = from.a + (to.a - from.a) * t;
    oklch_to_color(l, c, h, a)
}

fn color_to_oklch(color: &Color) -> (f32, f32, f32) {
    use palette::{IntoColor, Oklch, Srgb};
    let srgb = Srgb::new(
        color.r as f32 / 255.0,
        color.g as f32 / 255.0,
        color.b as f32 / 255.0,
    );
    let oklch: Oklch = srgb.into_color();
    (oklch.l, oklch.chroma, oklch.hue.into_positive_degrees())
}

fn oklch_to_color(l: f32, c: f32, h: f32, a: f32) -> Color {
    use palette::{FromColor, Oklch, Srgb};
    let srgb = Srgb::from_color(Oklch::new(l, c, h));
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::rgba(
        channel(srgb.red),
        channel(srgb.green),
        channel(srgb.blue),
        a.clamp(0.0, 1.0),
    )
}
