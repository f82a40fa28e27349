//! Presentation Layer
//!
//! Role screen facades and the view state they settle into.

pub mod screens;
pub mod view_state;

pub use screens::RoleScreens;
pub use view_state::ViewState;
