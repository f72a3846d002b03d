use std::fs::File;
use std::time::Duration;

use flowdom::{
    Border, Color, Easing, Edges, Element, Event, Key, Page, PointerState, Position, Size, Style,
    Terminal, Transitions,
};
use simplelog::{Config, LevelFilter, WriteLogger};

fn main() -> std::io::Result<()> {
    // Set up file logging
    let log_file = File::create("transitions.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut term = Terminal::new()?;
    let mut pointer = PointerState::new();

    let mut moved = false;
    let mut reduced = false;
    let mut lit: Option<String> = None;

    loop {
        let page = Page::new(ui(moved, lit.as_deref()));
        term.render(&page)?;

        // Animation frames only while something is in flight
        let timeout = if term.has_active_transitions() {
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
                    key: Key::Char('r'),
                    ..
                } => {
                    reduced = !reduced;
                    term.set_reduced_motion(reduced);
                }
                Event::Tap {
                    target: Some(id), ..
                } if id == "toggle" => {
                    moved = !moved;
                }
                Event::HoverEnter { target } if target.starts_with("hue-") => {
                    lit = Some(target.clone());
                }
                Event::HoverExit { target } if lit.as_deref() == Some(target.as_str()) => {
                    lit = None;
                }
                _ => {}
            }
        }
    }
}

fn ui(moved: bool, lit: Option<&str>) -> Element {
    Element::col()
        .width(Size::Fill)
        .height(Size::Fill)
        .style(Style::new().background(Color::rgb(18, 18, 28)))
        .padding(Edges::all(2))
        .gap(1)
        .child(
            Element::text("Transitions Demo")
                .style(Style::new().bold().foreground(Color::rgb(230, 230, 240))),
        )
        .child(
            Element::text("Click Move, hover the hue boxes, r=reduced motion, q=quit")
                .style(Style::new().foreground(Color::white(0.5))),
        )
        .child(
            Element::row()
                .width(Size::Fill)
                .height(Size::Fill)
                .gap(2)
                .child(easing_lanes(moved))
                .child(hue_boxes(lit)),
        )
}

fn easing_lanes(moved: bool) -> Element {
    let mut lanes = Element::box_()
        .width(Size::Fill)
        .height(Size::Fill)
        .style(Style::new().background(Color::white(0.03)));
    for (i, (label, easing)) in [
        ("Linear", Easing::Linear),
        ("Ease In", Easing::EaseIn),
        ("Ease Out", Easing::EaseOut),
        ("In-Out", Easing::EaseInOut),
    ]
    .into_iter()
    .enumerate()
    {
        lanes = lanes.child(lane(i, label, easing, moved));
    }

    Element::col()
        .width(Size::Fixed(44))
        .height(Size::Fill)
        .style(
            Style::new()
                .background(Color::rgb(28, 28, 40))
                .border(Border::Rounded),
        )
        .padding(Edges::all(1))
        .gap(1)
        .child(Element::text("Easing Functions").style(Style::new().bold()))
        .child(
            Element::text("  Move  ")
                .id("toggle")
                .clickable(true)
                .hoverable(true)
                .style(
                    Style::new()
                        .background(Color::rgb(70, 90, 160))
                        .foreground(Color::rgb(235, 235, 245))
                        .bold(),
                ),
        )
        .child(lanes)
}

fn lane(index: usize, label: &str, easing: Easing, moved: bool) -> Element {
    let left = if moved { 24 } else { 0 };
    Element::box_()
        .id(format!("lane-{index}"))
        .position(Position::Absolute)
        .left(left)
        .top(index as i16 * 3)
        .width(Size::Fixed(14))
        .height(Size::Fixed(3))
        .style(
            Style::new()
                .background(Color::rgb(60, 110, 90))
                .border(Border::Rounded)
                .foreground(Color::rgb(220, 235, 225)),
        )
        .transitions(Transitions::new().left(Duration::from_millis(600), easing))
        .child(Element::text(label))
}

fn hue_boxes(lit: Option<&str>) -> Element {
    let mut row = Element::row()
        .width(Size::Fill)
        .height(Size::Fill)
        .gap(1);
    for (i, base) in [
        Color::rgb(170, 70, 70),
        Color::rgb(170, 130, 60),
        Color::rgb(80, 150, 80),
        Color::rgb(70, 120, 170),
        Color::rgb(130, 80, 160),
    ]
    .into_iter()
    .enumerate()
    {
        row = row.child(hue_box(i, base, lit));
    }

    Element::col()
        .width(Size::Fill)
        .height(Size::Fill)
        .style(
            Style::new()
                .background(Color::rgb(28, 28, 40))
                .border(Border::Rounded),
        )
        .padding(Edges::all(1))
        .gap(1)
        .child(Element::text("Color Transitions").style(Style::new().bold()))
        .child(Element::text("Hover for a smooth shift"))
        .child(row)
}

fn hue_box(index: usize, base: Color, lit: Option<&str>) -> Element {
    let id = format!("hue-{index}");
    let is_lit = lit == Some(id.as_str());
    let bg = if is_lit { brighten(base) } else { base };

    Element::box_()
        .id(id)
        .hoverable(true)
        .width(Size::Fill)
        .height(Size::Fill)
        .style(Style::new().background(bg).border(Border::Single))
        .transitions(Transitions::new().background(Duration::from_millis(400), Easing::EaseInOut))
        .child(
            Element::text(if is_lit { "*" } else { "" })
                .style(Style::new().foreground(Color::rgb(20, 20, 20))),
        )
}

fn brighten(color: Color) -> Color {
    Color::rgb(
        color.r.saturating_add(60),
        color.g.saturating_add(60),
        color.b.saturating_add(60),
    )
}
