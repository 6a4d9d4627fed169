pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use handlers::AvailabilityState;
pub use models::{
    AvailabilityRecord, CalendarView, ComputedSlot, DateWindow, LoadedWindow, StoreSnapshot,
};
pub use services::recurrence::{applicable_on, canonicalize, detect_encoding, DayOfWeekEncoding};
pub use services::slots::expand;
pub use services::store::AvailabilityStore;
pub use services::window::range_for_view;
