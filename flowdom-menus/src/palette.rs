use flowdom::{Color, ThemeMode};

/// The colors both widgets draw from, resolved per theme mode.
///
/// Most entries are translucent whites or blacks layered over the page
/// background; the renderer composites them, which is what gives the
/// controls their glassy look on either page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Opaque page backdrop.
    pub page_bg: Color,
    /// Body and option text.
    pub text: Color,
    /// Border of the anchor and the menu panel.
    pub border: Color,
    /// Menu panel background.
    pub surface: Color,
    /// Hovered menu row fill.
    pub row_hover: Color,
    /// Anchor fill while hovered.
    pub anchor_hover: Color,
    /// Anchor fill at rest.
    pub anchor_bg: Color,
    /// Switcher track fill.
    pub track: Color,
    /// Indicator pill at rest.
    pub indicator: Color,
    /// Indicator pill while dragging.
    pub indicator_drag: Color,
    /// Switcher button label.
    pub label: Color,
    /// Selected/highlighted switcher button label.
    pub label_active: Color,
}

const DARK: Palette = Palette {
    page_bg: Color::rgb(18, 18, 22),
    text: Color::white(0.6),
    border: Color::white(0.1),
    surface: Color::white(0.01),
    row_hover: Color::white(0.05),
    anchor_hover: Color::white(0.03),
    anchor_bg: Color::white(0.01),
    track: Color::white(0.1),
    indicator: Color::white(0.1),
    indicator_drag: Color::white(0.3),
    label: Color::white(0.5),
    label_active: Color::white(1.0),
};

const LIGHT: Palette = Palette {
    page_bg: Color::rgb(245, 245, 247),
    text: Color::black(0.87),
    border: Color::rgb(158, 158, 158),
    surface: Color::black(0.03),
    row_hover: Color::grey(158, 0.15),
    anchor_hover: Color::grey(158, 0.1),
    anchor_bg: Color::black(0.01),
    track: Color::black(0.1),
    indicator: Color::black(0.1),
    indicator_drag: Color::black(0.3),
    label: Color::black(0.5),
    label_active: Color::black(1.0),
};

impl Palette {
    /// Resolve the palette for a theme mode. Pure: same mode in, same
    /// colors out.
    pub const fn of(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => DARK,
            ThemeMode::Light => LIGHT,
        }
    }
}
