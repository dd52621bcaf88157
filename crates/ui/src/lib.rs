pub mod menu;
pub mod popup;
pub mod sidebar;

pub use menu::*;
pub use popup::*;
pub use sidebar::*;
