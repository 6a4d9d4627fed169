use futures::channel::mpsc;
use futures::{SinkExt, StreamExt};
use thiserror::Error;
use tracing::{debug, warn};

use portal_config::PortalConfig;

use crate::models::{ChatEvent, ChatRequest};
use crate::services::parser::{parse_sse_line, LineBuffer};

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Chat assistant is not configured")]
    NotConfigured,

    #[error("Chat assistant returned {0}")]
    UpstreamStatus(u16),

    #[error("Chat assistant is unreachable")]
    Transport(#[from] reqwest::Error),
}

/// Pumps the upstream assistant's SSE response into a channel, one token
/// per event. The pump stops at the `[DONE]` marker or as soon as the
/// receiving side is dropped.
pub struct ChatStreamService {
    http: reqwest::Client,
    upstream_url: String,
}

impl ChatStreamService {
    pub fn new(config: &PortalConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            upstream_url: config.chat_upstream_url.clone(),
        }
    }

    pub async fn relay(
        &self,
        request: &ChatRequest,
        mut tx: mpsc::Sender<ChatEvent>,
    ) -> Result<(), ChatError> {
        if self.upstream_url.trim().is_empty() {
            return Err(ChatError::NotConfigured);
        }

        let response = self
            .http
            .post(&self.upstream_url)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Chat upstream returned {}", status);
            return Err(ChatError::UpstreamStatus(status.as_u16()));
        }

        let mut body = response.bytes_stream();
        let mut buffer = LineBuffer::new();

        while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            for line in buffer.push_chunk(&chunk) {
                match parse_sse_line(&line) {
                    Some(ChatEvent::Done) => {
                        debug!("Chat stream completed");
                        let _ = tx.send(ChatEvent::Done).await;
                        return Ok(());
                    }
                    Some(event) => {
                        // A closed receiver means the client went away.
                        if tx.send(event).await.is_err() {
                            debug!("Chat client disconnected, stopping relay");
                            return Ok(());
                        }
                    }
                    None => {}
                }
            }
        }

        // Upstream closed without a terminator; treat it as complete.
        let _ = tx.send(ChatEvent::Done).await;
        Ok(())
    }
}
