pub mod animation;
pub mod buffer;
pub mod element;
pub mod event;
pub mod gesture;
pub mod hit;
pub mod layout;
pub mod page;
pub mod render;
pub mod terminal;
pub mod text;
pub mod transitions;
pub mod types;

pub use animation::{AnimationState, Resolved, TransitionProperty};
pub use buffer::{Buffer, Cell};
pub use element::{find_element, Content, Element};
pub use event::{Event, Key, Modifiers};
pub use gesture::PointerState;
pub use hit::{hit_test_any, hit_test_hoverable, hit_test_interactive};
pub use layout::{layout, LayoutResult, Rect};
pub use page::{layout_page, Page};
pub use render::render_to_buffer;
pub use terminal::Terminal;
pub use transitions::{Easing, TransitionConfig, Transitions};
pub use types::*;
