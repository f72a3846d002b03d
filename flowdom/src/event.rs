/// High-level input events with element targeting.
///
/// Raw crossterm events are translated into these by
/// [`PointerState::process`](crate::gesture::PointerState::process),
/// which owns the hover/press/drag bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Key press event
    Key { key: Key, modifiers: Modifiers },
    /// Terminal resized
    Resize { width: u16, height: u16 },
    /// Left button went down on an interactive element
    Press { target: String, x: u16, y: u16 },
    /// Left button released without a drag. `target` is the topmost
    /// interactive element under the release point; `None` means the
    /// release hit nothing interactive (the outside-tap case).
    Tap {
        target: Option<String>,
        x: u16,
        y: u16,
    },
    /// Pointer entered a hoverable element
    HoverEnter { target: String },
    /// Pointer left a hoverable element
    HoverExit { target: String },
    /// A drag gesture began on a draggable element. Coordinates are the
    /// original press position, not the first motion.
    DragStart { target: String, x: u16, y: u16 },
    /// Pointer moved during a drag; `target` stays captured from the start
    DragUpdate { target: String, x: u16, y: u16 },
    /// Drag gesture ended (button released)
    DragEnd { target: String, x: u16, y: u16 },
    /// Mouse wheel, `delta` is -1 (up) or 1 (down)
    Scroll {
        target: Option<String>,
        delta: i16,
        x: u16,
        y: u16,
    },
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    Tab,
    Backspace,
    Up,
    Down,
    Left,
    Right,
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

// Conversion from crossterm types
impl Key {
    /// Map a crossterm key code; keys outside the supported set are `None`.
    pub fn from_crossterm(code: crossterm::event::KeyCode) -> Option<Self> {
        use crossterm::event::KeyCode;
        match code {
            KeyCode::Char(c) => Some(Key::Char(c)),
            KeyCode::Enter => Some(Key::Enter),
            KeyCode::Esc => Some(Key::Esc),
            KeyCode::Tab => Some(Key::Tab),
            KeyCode::Backspace => Some(Key::Backspace),
            KeyCode::Up => Some(Key::Up),
            KeyCode::Down => Some(Key::Down),
            KeyCode::Left => Some(Key::Left),
            KeyCode::Right => Some(Key::Right),
            _ => None,
        }
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}
