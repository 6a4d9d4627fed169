pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use handlers::ChatState;
pub use models::{ChatEvent, ChatRequest};
pub use router::chat_routes;
pub use services::parser::{parse_sse_line, LineBuffer, DONE_MARKER};
pub use services::stream::{ChatError, ChatStreamService};
