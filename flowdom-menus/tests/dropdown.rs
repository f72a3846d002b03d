use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use flowdom::{find_element, Color, Event, LayoutResult, Rect, Size, ThemeMode};
use flowdom_menus::{Dropdown, Palette};

fn anchor_layout() -> LayoutResult {
    let mut layout = LayoutResult::new();
    layout.insert("city".to_string(), Rect::new(20, 5, 16, 3));
    layout
}

fn tap(target: &str) -> Event {
    Event::Tap {
        target: Some(target.to_string()),
        x: 0,
        y: 0,
    }
}

fn tap_nothing() -> Event {
    Event::Tap {
        target: None,
        x: 0,
        y: 0,
    }
}

fn scroll(target: &str, delta: i16) -> Event {
    Event::Scroll {
        target: Some(target.to_string()),
        delta,
        x: 0,
        y: 0,
    }
}

fn cities() -> Dropdown {
    Dropdown::new(["Tokyo", "Osaka", "Kyoto"]).id("city")
}

/// Tap the anchor and run the mount delay out so the menu is shown.
fn open_menu(dropdown: &mut Dropdown) {
    let layout = anchor_layout();
    dropdown.handle_event(&tap("city"), &layout);
    thread::sleep(Duration::from_millis(25));
    dropdown.tick();
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_closed_by_default() {
    let dropdown = cities();

    assert!(!dropdown.is_open());
    assert!(dropdown.overlay(ThemeMode::Dark).is_none());
    assert_eq!(dropdown.value(), "None");
}

#[test]
fn test_default_value_builder() {
    let dropdown = cities().default_value("Pick a city");
    assert_eq!(dropdown.value(), "Pick a city");
}

#[test]
fn test_opens_under_the_anchor() {
    let mut dropdown = cities();
    dropdown.handle_event(&tap("city"), &anchor_layout());

    assert!(dropdown.is_open());
    let overlay = dropdown.overlay(ThemeMode::Dark).unwrap();
    let panel = find_element(&overlay, "city-menu").unwrap();

    assert_eq!(panel.left, Some(20), "aligned with the anchor");
    assert_eq!(panel.top, Some(8), "below the anchor");
    assert_eq!(panel.width, Size::Fixed(16), "matches the anchor width");
}

#[test]
fn test_menu_mounts_collapsed() {
    let mut dropdown = cities();
    dropdown.handle_event(&tap("city"), &anchor_layout());

    let overlay = dropdown.overlay(ThemeMode::Dark).unwrap();
    let panel = find_element(&overlay, "city-menu").unwrap();

    assert_eq!(panel.height, Size::Fixed(0), "holds at zero for one frame");
    assert_eq!(panel.opacity, 0.0);
}

#[test]
fn test_menu_grows_after_mount_delay() {
    let mut dropdown = cities();
    open_menu(&mut dropdown);

    let overlay = dropdown.overlay(ThemeMode::Dark).unwrap();
    let panel = find_element(&overlay, "city-menu").unwrap();

    assert_eq!(panel.height, Size::Fixed(5), "3 rows plus the border");
    assert_eq!(panel.opacity, 1.0);
}

#[test]
fn test_menu_height_capped_by_max_visible() {
    let mut dropdown = Dropdown::new(["a", "b", "c", "d", "e"]).id("city");
    open_menu(&mut dropdown);

    let overlay = dropdown.overlay(ThemeMode::Dark).unwrap();
    let panel = find_element(&overlay, "city-menu").unwrap();
    assert_eq!(panel.height, Size::Fixed(5), "capped at three visible rows");

    let mut short = Dropdown::new(["a", "b"]).id("city");
    open_menu(&mut short);

    let overlay = short.overlay(ThemeMode::Dark).unwrap();
    let panel = find_element(&overlay, "city-menu").unwrap();
    assert_eq!(panel.height, Size::Fixed(4), "shrinks to the option count");
}

#[test]
fn test_option_rows_present() {
    let mut dropdown = cities();
    open_menu(&mut dropdown);

    let overlay = dropdown.overlay(ThemeMode::Dark).unwrap();

    let rows = find_element(&overlay, "city-rows").unwrap();
    assert!(rows.clip, "rows clip to the panel");

    for (i, label) in ["Tokyo", "Osaka", "Kyoto"].iter().enumerate() {
        let row = find_element(&overlay, &format!("city-opt-{i}")).unwrap();
        assert!(row.clickable);
        assert!(row.hoverable);
        assert_eq!(row.content, flowdom::Content::Text(label.to_string()));
    }
}

#[test]
fn test_zero_options_never_opens() {
    let mut dropdown = Dropdown::new(Vec::<String>::new()).id("city");
    dropdown.handle_event(&tap("city"), &anchor_layout());

    assert!(!dropdown.is_open());
    assert!(dropdown.overlay(ThemeMode::Dark).is_none());
}

#[test]
fn test_open_requires_anchor_rect() {
    let mut dropdown = cities();
    dropdown.handle_event(&tap("city"), &LayoutResult::new());

    assert!(!dropdown.is_open(), "no laid-out anchor, nowhere to open");
}

#[test]
fn test_menu_removed_after_exit_animation() {
    let mut dropdown = cities();
    open_menu(&mut dropdown);

    dropdown.handle_event(&tap_nothing(), &anchor_layout());
    assert!(dropdown.is_open(), "still mounted while fading out");

    thread::sleep(Duration::from_millis(330));
    dropdown.tick();

    assert!(!dropdown.is_open());
    assert!(dropdown.overlay(ThemeMode::Dark).is_none());
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_select_fires_callback_and_updates_value() {
    let picked = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&picked);
    let mut dropdown = Dropdown::new(["Tokyo", "Osaka", "Kyoto"])
        .id("city")
        .on_select(move |label| sink.borrow_mut().push(label.to_string()));

    open_menu(&mut dropdown);
    dropdown.handle_event(&tap("city-opt-1"), &anchor_layout());

    assert_eq!(*picked.borrow(), vec!["Osaka".to_string()]);
    assert_eq!(dropdown.value(), "Osaka");
}

#[test]
fn test_select_starts_the_exit_fade() {
    let mut dropdown = cities();
    open_menu(&mut dropdown);
    dropdown.handle_event(&tap("city-opt-0"), &anchor_layout());

    assert!(dropdown.is_open(), "menu lingers for the fade");
    let overlay = dropdown.overlay(ThemeMode::Dark).unwrap();
    let panel = find_element(&overlay, "city-menu").unwrap();
    assert_eq!(panel.opacity, 0.0, "exit fades at full size");
    assert_eq!(panel.height, Size::Fixed(5));
}

#[test]
fn test_row_taps_ignored_while_closing() {
    let picked = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&picked);
    let mut dropdown = Dropdown::new(["Tokyo", "Osaka", "Kyoto"])
        .id("city")
        .on_select(move |label| sink.borrow_mut().push(label.to_string()));

    open_menu(&mut dropdown);
    dropdown.handle_event(&tap("city-opt-1"), &anchor_layout());
    dropdown.handle_event(&tap("city-opt-2"), &anchor_layout());

    assert_eq!(picked.borrow().len(), 1, "closing menu takes no more taps");
    assert_eq!(dropdown.value(), "Osaka");
}

#[test]
fn test_outside_tap_dismisses_without_selecting() {
    let picked = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&picked);
    let mut dropdown = Dropdown::new(["Tokyo", "Osaka", "Kyoto"])
        .id("city")
        .default_value("Pick one")
        .on_select(move |label| sink.borrow_mut().push(label.to_string()));

    open_menu(&mut dropdown);
    dropdown.handle_event(&tap("city-scrim"), &anchor_layout());

    assert!(picked.borrow().is_empty());
    assert_eq!(dropdown.value(), "Pick one");

    let overlay = dropdown.overlay(ThemeMode::Dark).unwrap();
    let panel = find_element(&overlay, "city-menu").unwrap();
    assert_eq!(panel.opacity, 0.0, "dismissal fades out");
}

// ============================================================================
// Scrolling
// ============================================================================

#[test]
fn test_scroll_clamped_to_hidden_rows() {
    let mut dropdown = Dropdown::new(["a", "b", "c", "d", "e"]).id("city");
    open_menu(&mut dropdown);

    for _ in 0..5 {
        dropdown.handle_event(&scroll("city-rows", 1), &anchor_layout());
    }
    let overlay = dropdown.overlay(ThemeMode::Dark).unwrap();
    let rows = find_element(&overlay, "city-rows").unwrap();
    assert_eq!(rows.scroll_y, 2, "5 options, 3 visible");

    for _ in 0..5 {
        dropdown.handle_event(&scroll("city-opt-0", -1), &anchor_layout());
    }
    let overlay = dropdown.overlay(ThemeMode::Dark).unwrap();
    let rows = find_element(&overlay, "city-rows").unwrap();
    assert_eq!(rows.scroll_y, 0);
}

#[test]
fn test_scroll_ignored_when_rows_fit() {
    let mut dropdown = cities();
    open_menu(&mut dropdown);

    dropdown.handle_event(&scroll("city-rows", 1), &anchor_layout());

    let overlay = dropdown.overlay(ThemeMode::Dark).unwrap();
    let rows = find_element(&overlay, "city-rows").unwrap();
    assert_eq!(rows.scroll_y, 0, "everything already visible");
}

#[test]
fn test_scroll_elsewhere_ignored() {
    let mut dropdown = Dropdown::new(["a", "b", "c", "d", "e"]).id("city");
    open_menu(&mut dropdown);

    dropdown.handle_event(&scroll("somewhere-else", 1), &anchor_layout());

    let overlay = dropdown.overlay(ThemeMode::Dark).unwrap();
    let rows = find_element(&overlay, "city-rows").unwrap();
    assert_eq!(rows.scroll_y, 0);
}

// ============================================================================
// Hover and Theming
// ============================================================================

#[test]
fn test_anchor_hover_changes_fill() {
    let palette = Palette::of(ThemeMode::Dark);
    let mut dropdown = cities();

    dropdown.handle_event(
        &Event::HoverEnter {
            target: "city".to_string(),
        },
        &anchor_layout(),
    );
    assert_eq!(
        dropdown.build(ThemeMode::Dark).style.background,
        Some(palette.anchor_hover)
    );

    dropdown.handle_event(
        &Event::HoverExit {
            target: "city".to_string(),
        },
        &anchor_layout(),
    );
    assert_eq!(
        dropdown.build(ThemeMode::Dark).style.background,
        Some(palette.anchor_bg)
    );
}

#[test]
fn test_row_hover_highlight() {
    let palette = Palette::of(ThemeMode::Dark);
    let mut dropdown = cities();
    open_menu(&mut dropdown);

    dropdown.handle_event(
        &Event::HoverEnter {
            target: "city-opt-1".to_string(),
        },
        &anchor_layout(),
    );

    let overlay = dropdown.overlay(ThemeMode::Dark).unwrap();
    let hovered = find_element(&overlay, "city-opt-1").unwrap();
    let plain = find_element(&overlay, "city-opt-0").unwrap();

    assert_eq!(hovered.style.background, Some(palette.row_hover));
    assert_eq!(plain.style.background, Some(Color::white(0.0)));
}

#[test]
fn test_anchor_shows_current_value() {
    let mut dropdown = cities();
    open_menu(&mut dropdown);
    dropdown.handle_event(&tap("city-opt-2"), &anchor_layout());

    let anchor = dropdown.build(ThemeMode::Dark);
    assert_eq!(anchor.content, flowdom::Content::Text("Kyoto".to_string()));
}

#[test]
fn test_theme_resolves_per_build() {
    let dropdown = cities();

    let dark = dropdown.build(ThemeMode::Dark);
    let light = dropdown.build(ThemeMode::Light);

    assert_ne!(
        dark.style.foreground, light.style.foreground,
        "same state, different palette"
    );
    assert_eq!(dark.id, light.id);
}
