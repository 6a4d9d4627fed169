use crate::models::ChatEvent;

/// Terminator payload sent by the upstream assistant.
pub const DONE_MARKER: &str = "[DONE]";

/// Interpret one SSE line from the upstream assistant. Only `data:` lines
/// carry anything; comments, `event:` lines and blank separators yield
/// `None`. A single space after the colon is framing, the rest of the
/// payload is token text and kept verbatim.
pub fn parse_sse_line(line: &str) -> Option<ChatEvent> {
    let payload = line.strip_prefix("data:")?;
    let payload = payload.strip_prefix(' ').unwrap_or(payload);

    if payload.trim() == DONE_MARKER {
        return Some(ChatEvent::Done);
    }
    Some(ChatEvent::Token(payload.to_string()))
}

/// Reassembles SSE lines from arbitrarily chunked response bytes. Lines
/// split across chunk boundaries are held until their newline arrives.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: String,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk, returning every line it completed.
    pub fn push_chunk(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.push_str(&String::from_utf8_lossy(chunk));

        let mut lines = Vec::new();
        while let Some(pos) = self.pending.find('\n') {
            let mut line: String = self.pending.drain(..=pos).collect();
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
            lines.push(line);
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_lines_become_tokens() {
        assert_eq!(
            parse_sse_line("data: Hello"),
            Some(ChatEvent::Token("Hello".to_string()))
        );
        // Only the first space is framing.
        assert_eq!(
            parse_sse_line("data:  indented"),
            Some(ChatEvent::Token(" indented".to_string()))
        );
        assert_eq!(
            parse_sse_line("data:no-space"),
            Some(ChatEvent::Token("no-space".to_string()))
        );
    }

    #[test]
    fn done_marker_terminates() {
        assert_eq!(parse_sse_line("data: [DONE]"), Some(ChatEvent::Done));
        assert_eq!(parse_sse_line("data:[DONE]"), Some(ChatEvent::Done));
    }

    #[test]
    fn non_data_lines_are_ignored() {
        assert_eq!(parse_sse_line(""), None);
        assert_eq!(parse_sse_line(": keep-alive"), None);
        assert_eq!(parse_sse_line("event: message"), None);
        assert_eq!(parse_sse_line("retry: 500"), None);
    }

    #[test]
    fn buffer_joins_lines_split_across_chunks() {
        let mut buffer = LineBuffer::new();

        assert!(buffer.push_chunk(b"data: He").is_empty());
        let lines = buffer.push_chunk(b"llo\ndata: wor");
        assert_eq!(lines, vec!["data: Hello".to_string()]);

        let lines = buffer.push_chunk(b"ld\r\n\n");
        assert_eq!(lines, vec!["data: world".to_string(), String::new()]);
    }
}
