//! Animated menu widgets for [`flowdom`]: a dropdown select with a
//! floating overlay menu, and a liquid menu switcher with a draggable
//! indicator pill.
//!
//! Widgets are plain structs the host owns. Each frame the host calls
//! `build(theme)` (and `overlay(theme)` for the dropdown) to produce
//! element trees for the page, then feeds the frame's events to
//! `handle_event`. Selection callbacks fire from inside `handle_event`.

pub mod dropdown;
pub mod palette;
pub mod switcher;

pub use dropdown::Dropdown;
pub use palette::Palette;
pub use switcher::{MenuSwitcher, SelectEvent};
