use std::sync::Arc;

use axum::{routing::post, Router};

use crate::handlers::{self, ChatState};

pub fn chat_routes(state: Arc<ChatState>) -> Router {
    Router::new()
        .route("/stream", post(handlers::stream_chat))
        .with_state(state)
}
