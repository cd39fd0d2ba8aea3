//! Dashboard building blocks shared by the portal screens.

pub mod calendar;
pub mod mutation;
pub mod panel;
pub mod roster;

mod components;
mod holiday;
mod overlay;

pub use components::{EmptyState, Overlay, Panel};
pub use holiday::HolidayCalendar;
pub use overlay::{Panels, use_panels};
