pub mod clinic;
pub mod geocode;
