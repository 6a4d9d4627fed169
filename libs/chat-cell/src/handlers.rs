use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::channel::mpsc;
use futures::future::{AbortHandle, Abortable};
use futures::{Stream, StreamExt};
use tracing::warn;

use portal_config::PortalConfig;
use portal_models::error::AppError;

use crate::models::{ChatEvent, ChatRequest};
use crate::services::parser::DONE_MARKER;
use crate::services::stream::{ChatError, ChatStreamService};

pub struct ChatState {
    pub config: PortalConfig,
    pub stream: Arc<ChatStreamService>,
}

impl ChatState {
    pub fn new(config: PortalConfig) -> Self {
        let stream = Arc::new(ChatStreamService::new(&config));
        Self { config, stream }
    }
}

/// Aborts the upstream pump when the client's SSE stream is dropped.
struct AbortOnDrop(AbortHandle);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

#[axum::debug_handler]
pub async fn stream_chat(
    State(state): State<Arc<ChatState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    if !state.config.is_chat_configured() {
        return Err(AppError::Internal(
            "Chat assistant is not configured".to_string(),
        ));
    }
    if request.message.trim().is_empty() {
        return Err(AppError::BadRequest("message must not be empty".to_string()));
    }

    let (tx, rx) = mpsc::channel::<ChatEvent>(32);
    let (abort_handle, abort_registration) = AbortHandle::new_pair();
    let guard = AbortOnDrop(abort_handle);

    let service = Arc::clone(&state.stream);
    let pump = async move {
        if let Err(err) = service.relay(&request, tx.clone()).await {
            warn!("Chat relay failed: {}", err);
            let message = match err {
                ChatError::NotConfigured => "Chat assistant is not configured".to_string(),
                _ => "The assistant is unavailable right now. Please try again.".to_string(),
            };
            let mut tx = tx;
            let _ = futures::SinkExt::send(&mut tx, ChatEvent::Error(message)).await;
        }
    };
    tokio::spawn(Abortable::new(pump, abort_registration));

    let events = rx.map(move |event| {
        // Holding the guard ties the pump's lifetime to this stream.
        let _ = &guard;
        let event = match event {
            ChatEvent::Token(token) => Event::default().data(token),
            ChatEvent::Done => Event::default().data(DONE_MARKER),
            ChatEvent::Error(message) => Event::default().event("error").data(message),
        };
        Ok::<_, Infallible>(event)
    });

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}
