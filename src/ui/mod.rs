mod app;
pub mod drag;
pub mod layout;
mod palette;
pub mod sidebar;
mod summary;
pub mod theme;
pub mod views;

pub use app::PlannerApp;
