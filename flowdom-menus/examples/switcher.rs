use std::fs::File;
use std::time::Duration;

use flowdom::{
    Align, Element, Event, Justify, Key, Page, PointerState, Size, Style, Terminal, ThemeMode,
};
use flowdom_menus::{MenuSwitcher, Palette};
use simplelog::{Config, LevelFilter, WriteLogger};

fn main() -> std::io::Result<()> {
    // Set up file logging
    let log_file = File::create("switcher.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut term = Terminal::new()?;
    let mut pointer = PointerState::new();
    let mut theme = ThemeMode::Dark;

    let mut menu = MenuSwitcher::new()
        .id("menu")
        .on_select(|event| log::info!("switched to {} ({})", event.label, event.index));

    loop {
        let page = Page::new(ui(&menu, theme));
        term.render(&page)?;

        // Tight frames while the pill is mid-drag or mid-snap
        let timeout = if menu.dragging() || term.has_active_transitions() {
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
            menu.handle_event(event);
        }
    }
}

fn ui(menu: &MenuSwitcher, theme: ThemeMode) -> Element {
    let palette = Palette::of(theme);
    Element::col()
        .width(Size::Fill)
        .height(Size::Fill)
        .justify(Justify::Center)
        .align(Align::Center)
        .gap(1)
        .style(Style::new().background(palette.page_bg))
        .child(
            Element::text("Tap an entry or drag the pill, t=theme, q=quit")
                .style(Style::new().foreground(palette.label)),
        )
        .child(menu.build(theme))
        .child(
            Element::text(format!("Selected: {}", menu.selected()))
                .style(Style::new().foreground(palette.text)),
        )
}
