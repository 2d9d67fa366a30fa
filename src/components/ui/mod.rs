pub mod alert;
pub mod button;
pub mod card;
pub mod input;
pub mod label;
pub mod textarea;
pub mod tooltip;

// Re-export component symbols so callers can `use crate::components::ui::Button` etc.
pub use alert::*;
pub use button::*;
#[allow(unused_imports)]
pub use card::*;
pub use input::*;
pub use label::*;
pub use textarea::*;
pub use tooltip::*;
