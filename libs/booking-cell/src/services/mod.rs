pub mod catalog;
pub mod patient;
pub mod submission;
pub mod wizard;
