pub mod parser;
pub mod stream;
