use std::time::Duration;

use flowdom::animation::PropertyValue;
use flowdom::{
    layout_page, AnimationState, Color, Easing, Element, LayoutResult, Page, Position, Rect, Size,
    Style, TransitionConfig, TransitionProperty, Transitions,
};

fn page_layout(page: &Page) -> LayoutResult {
    layout_page(page, Rect::from_size(80, 24))
}

/// A page with one absolutely positioned box that animates its left edge.
fn mover_at(left: i16) -> Page {
    Page::new(
        Element::box_()
            .id("mover")
            .position(Position::Absolute)
            .left(left)
            .top(0)
            .width(Size::Fixed(10))
            .height(Size::Fixed(3))
            .transitions(Transitions::new().left(Duration::from_secs(10), Easing::Linear)),
    )
}

fn update(state: &mut AnimationState, page: &Page) {
    let layout = page_layout(page);
    state.update(page, &layout);
}

// =============================================================================
// Easing Function Tests
// =============================================================================

#[test]
fn test_easing_linear() {
    assert_eq!(Easing::Linear.apply(0.0), 0.0);
    assert_eq!(Easing::Linear.apply(0.5), 0.5);
    assert_eq!(Easing::Linear.apply(1.0), 1.0);
}

#[test]
fn test_easing_ease_in() {
    // EaseIn: t * t (quadratic)
    assert_eq!(Easing::EaseIn.apply(0.0), 0.0);
    assert_eq!(Easing::EaseIn.apply(1.0), 1.0);
    assert_eq!(Easing::EaseIn.apply(0.5), 0.25);
}

#[test]
fn test_easing_ease_out() {
    // EaseOut: 1 - (1-t)^2 (quadratic, fast start)
    assert_eq!(Easing::EaseOut.apply(0.0), 0.0);
    assert_eq!(Easing::EaseOut.apply(1.0), 1.0);
    assert_eq!(Easing::EaseOut.apply(0.5), 0.75);
}

#[test]
fn test_easing_ease_in_out() {
    assert_eq!(Easing::EaseInOut.apply(0.0), 0.0);
    assert_eq!(Easing::EaseInOut.apply(1.0), 1.0);
    assert_eq!(Easing::EaseInOut.apply(0.5), 0.5);
    assert!(Easing::EaseInOut.apply(0.25) < 0.25, "slow start");
    assert!(Easing::EaseInOut.apply(0.75) > 0.75, "fast finish");
}

#[test]
fn test_easing_clamps_out_of_range() {
    assert_eq!(Easing::Linear.apply(-1.0), 0.0);
    assert_eq!(Easing::Linear.apply(2.0), 1.0);
}

#[test]
fn test_easing_monotonic() {
    for easing in [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
    ] {
        let mut prev = 0.0;
        for i in 1..=10 {
            let t = i as f32 / 10.0;
            let val = easing.apply(t);
            assert!(val >= prev, "{:?} not monotonic at t={}", easing, t);
            prev = val;
        }
    }
}

// =============================================================================
// Transitions Builder Tests
// =============================================================================

#[test]
fn test_transition_config_new() {
    let config = TransitionConfig::new(Duration::from_millis(300), Easing::EaseOut);
    assert_eq!(config.duration, Duration::from_millis(300));
    assert_eq!(config.easing, Easing::EaseOut);
}

#[test]
fn test_transitions_default_empty() {
    let t = Transitions::new();
    assert!(!t.has_any());
    assert!(t.left.is_none());
    assert!(t.background.is_none());
}

#[test]
fn test_transitions_individual_properties() {
    let t = Transitions::new()
        .left(Duration::from_millis(100), Easing::Linear)
        .background(Duration::from_millis(200), Easing::EaseIn);

    assert!(t.has_any());
    assert!(t.left.is_some());
    assert!(t.background.is_some());
    assert!(t.top.is_none());
    assert!(t.foreground.is_none());

    let left = t.left.unwrap();
    assert_eq!(left.duration, Duration::from_millis(100));
    assert_eq!(left.easing, Easing::Linear);
}

#[test]
fn test_transitions_position_group() {
    let t = Transitions::new().position(Duration::from_millis(300), Easing::EaseOut);

    assert!(t.left.is_some());
    assert!(t.top.is_some());
    assert!(t.width.is_none());
    assert!(t.background.is_none());
}

#[test]
fn test_transitions_size_group() {
    let t = Transitions::new().size(Duration::from_millis(200), Easing::EaseIn);

    assert!(t.width.is_some());
    assert!(t.height.is_some());
    assert!(t.left.is_none());
}

#[test]
fn test_transitions_fade_group() {
    let t = Transitions::new().fade(Duration::from_millis(200), Easing::EaseOut);

    assert!(t.opacity.is_some());
    assert!(t.width.is_none());
}

#[test]
fn test_transitions_colors_group() {
    let t = Transitions::new().colors(Duration::from_millis(500), Easing::EaseInOut);

    assert!(t.background.is_some());
    assert!(t.foreground.is_some());
    assert!(t.left.is_none());
}

#[test]
fn test_transitions_all_group() {
    let t = Transitions::new().all(Duration::from_millis(400), Easing::Linear);

    assert!(t.left.is_some());
    assert!(t.top.is_some());
    assert!(t.width.is_some());
    assert!(t.height.is_some());
    assert!(t.opacity.is_some());
    assert!(t.background.is_some());
    assert!(t.foreground.is_some());
}

// =============================================================================
// AnimationState Tests
// =============================================================================

#[test]
fn test_animation_state_new() {
    let state = AnimationState::new();
    assert!(!state.has_active());
}

#[test]
fn test_no_transition_on_first_frame() {
    let mut state = AnimationState::new();

    update(&mut state, &mover_at(0));
    assert!(!state.has_active(), "first frame only snapshots");
}

#[test]
fn test_transition_starts_on_change() {
    let mut state = AnimationState::new();

    update(&mut state, &mover_at(0));
    update(&mut state, &mover_at(10));

    assert!(state.has_active());

    // Linear over 10s: barely started, so the painted position still
    // sits at the old edge. dx is relative to the new target.
    let resolved = state.resolve("mover");
    assert!(resolved.dx <= -9, "dx {} should be near -10", resolved.dx);
    assert_eq!(resolved.dy, 0);
}

#[test]
fn test_no_transition_without_change() {
    let mut state = AnimationState::new();

    update(&mut state, &mover_at(5));
    update(&mut state, &mover_at(5));

    assert!(!state.has_active());
}

#[test]
fn test_no_transition_without_config() {
    let mut state = AnimationState::new();

    let before = Page::new(
        Element::box_()
            .id("plain")
            .position(Position::Absolute)
            .left(0)
            .width(Size::Fixed(10))
            .height(Size::Fixed(3)),
    );
    let after = Page::new(
        Element::box_()
            .id("plain")
            .position(Position::Absolute)
            .left(10)
            .width(Size::Fixed(10))
            .height(Size::Fixed(3)),
    );

    update(&mut state, &before);
    update(&mut state, &after);

    assert!(!state.has_active(), "unconfigured properties snap");
    assert_eq!(state.resolve("plain").dx, 0);
}

#[test]
fn test_reduced_motion_snaps() {
    let mut state = AnimationState::new();
    state.set_reduced_motion(true);

    update(&mut state, &mover_at(0));
    update(&mut state, &mover_at(10));

    assert!(!state.has_active());
}

#[test]
fn test_retarget_from_interpolated_value() {
    let mut state = AnimationState::new();

    update(&mut state, &mover_at(0));
    update(&mut state, &mover_at(10));
    // Interrupt immediately: the pill has barely moved off 0, so the
    // restarted transition runs from ~0 to 3, not from 10.
    update(&mut state, &mover_at(3));

    let resolved = state.resolve("mover");
    assert!(
        (-4..=-2).contains(&resolved.dx),
        "dx {} should run from the interpolated position",
        resolved.dx
    );
}

#[test]
fn test_state_dropped_when_element_leaves() {
    let mut state = AnimationState::new();

    update(&mut state, &mover_at(0));
    update(&mut state, &mover_at(10));
    assert!(state.has_active());

    let empty = Page::new(Element::box_().id("other"));
    update(&mut state, &empty);

    assert!(!state.has_active(), "transitions die with their element");
    assert_eq!(state.resolve("mover"), Default::default());
}

#[test]
fn test_overlay_first_appearance_not_animated() {
    let mut state = AnimationState::new();

    let root = Element::box_().id("root").width(Size::Fill).height(Size::Fill);

    update(&mut state, &Page::new(root.clone()));

    let mut with_panel = Page::new(root.clone());
    with_panel.push_overlay(panel_with_height(0));
    update(&mut state, &with_panel);

    assert!(!state.has_active(), "a fresh overlay entry only snapshots");
}

#[test]
fn test_panel_growth_animates_height() {
    let mut state = AnimationState::new();

    let root = Element::box_().id("root").width(Size::Fill).height(Size::Fill);

    let mut mounted = Page::new(root.clone());
    mounted.push_overlay(panel_with_height(0));
    update(&mut state, &mounted);

    let mut grown = Page::new(root);
    grown.push_overlay(panel_with_height(8));
    update(&mut state, &grown);

    assert!(state.has_active());
    let resolved = state.resolve("panel");
    let height = resolved.height.unwrap();
    assert!(height <= 1, "growth starts from the collapsed size, got {height}");
}

fn panel_with_height(height: u16) -> Element {
    Element::box_()
        .id("panel")
        .position(Position::Absolute)
        .left(10)
        .top(5)
        .width(Size::Fixed(20))
        .height(Size::Fixed(height))
        .transitions(Transitions::new().height(Duration::from_secs(10), Easing::Linear))
}

#[test]
fn test_opacity_fade() {
    let mut state = AnimationState::new();

    let faded = |opacity: f32| {
        Page::new(
            Element::box_()
                .id("ghost")
                .width(Size::Fixed(10))
                .height(Size::Fixed(3))
                .opacity(opacity)
                .transitions(Transitions::new().fade(Duration::from_secs(10), Easing::Linear)),
        )
    };

    update(&mut state, &faded(0.0));
    update(&mut state, &faded(1.0));

    let resolved = state.resolve("ghost");
    let opacity = resolved.opacity.unwrap();
    assert!(opacity < 0.1, "fade starts from 0, got {opacity}");
}

#[test]
fn test_background_interpolates_as_color() {
    let mut state = AnimationState::new();

    let tinted = |color: Color| {
        Page::new(
            Element::box_()
                .id("swatch")
                .width(Size::Fixed(10))
                .height(Size::Fixed(3))
                .style(Style::new().background(color))
                .transitions(
                    Transitions::new().background(Duration::from_secs(10), Easing::Linear),
                ),
        )
    };

    update(&mut state, &tinted(Color::rgb(255, 255, 255)));
    update(&mut state, &tinted(Color::rgb(0, 0, 0)));

    let value = state.get_interpolated("swatch", TransitionProperty::Background);
    match value {
        Some(PropertyValue::Color(c)) => {
            assert!(c.r > 240, "barely started, still near white, got {}", c.r);
        }
        other => panic!("expected a color, got {other:?}"),
    }
    assert!(state.resolve("swatch").background.is_some());
}

#[test]
fn test_no_interpolated_without_transition() {
    let mut state = AnimationState::new();

    update(&mut state, &mover_at(0));

    let value = state.get_interpolated("mover", TransitionProperty::Left);
    assert!(value.is_none());
}
