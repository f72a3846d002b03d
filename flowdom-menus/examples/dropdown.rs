use std::fs::File;
use std::time::Duration;

use flowdom::{
    Align, Element, Event, Justify, Key, Page, PointerState, Size, Style, Terminal, ThemeMode,
};
use flowdom_menus::{Dropdown, Palette};
use simplelog::{Config, LevelFilter, WriteLogger};

fn main() -> std::io::Result<()> {
    // Set up file logging
    let log_file = File::create("dropdown.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut term = Terminal::new()?;
    let mut pointer = PointerState::new();
    let mut theme = ThemeMode::Dark;

    let mut frequency = Dropdown::new(["Daily", "Weekly", "Monthly", "Quarterly", "Yearly"])
        .id("frequency")
        .default_value("Select one")
        .on_select(|label| log::info!("frequency set to {label}"));

    loop {
        frequency.tick();

        let mut page = Page::new(ui(&frequency, theme));
        if let Some(menu) = frequency.overlay(theme) {
            page.push_overlay(menu);
        }
        term.render(&page)?;

        // Keep frames coming while the menu lifecycle or an animation runs
        let timeout = if frequency.is_open() || term.has_active_transitions() {
            Some(Duration::from_millis(16))
        } else {
            None
        };
        let raw = term.poll(timeout)?;
        let events = pointer.process(&raw, &page, term.layout());

        for event in &events {
            match event {
                Event::Key {
                    key: Key::Char('q'),
                    ..
                }
                | Event::Key { key: Key::Esc, .. } => {
                    return Ok(());
                }
                Event::Key {
                    key: Key::Char('t'),
                    ..
                } => {
                    theme = theme.toggle();
                }
                _ => {}
            }
            frequency.handle_event(event, term.layout());
        }
    }
}

fn ui(frequency: &Dropdown, theme: ThemeMode) -> Element {
    let palette = Palette::of(theme);
    Element::col()
        .width(Size::Fill)
        .height(Size::Fill)
        .justify(Justify::Center)
        .align(Align::Center)
        .gap(1)
        .style(Style::new().background(palette.page_bg))
        .child(
            Element::text("Click to open, t=theme, q=quit")
                .style(Style::new().foreground(palette.label)),
        )
        .child(frequency.build(theme))
        .child(
            Element::text(format!("Selected: {}", frequency.value()))
                .style(Style::new().foreground(palette.text)),
        )
}
