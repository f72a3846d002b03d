mod color;
mod edges;
mod enums;
mod style;
mod theme;

pub use color::{Color, Rgb};
pub use edges::Edges;
pub use enums::{Align, Border, Direction, Justify, Position, Size, TextAlign, TextStyle};
pub use style::Style;
pub use theme::ThemeMode;
