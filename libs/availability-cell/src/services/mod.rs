pub mod recurrence;
pub mod slots;
pub mod store;
pub mod window;
