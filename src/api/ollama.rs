//! Ollama `/api/chat` backend.
//!
//! The response body is newline-delimited JSON. Every line carries a
//! `message.content` fragment; the last one has `done: true`.

use futures_util::StreamExt;
use tracing::{debug, warn};

use crate::api::client::HttpClient;
use crate::api::models::{ChatChunk, ChatMessage, ChatRequest};
use crate::api::{BackendError, ChatBackend, TokenStream};

const CHAT_PATH: &str = "/api/chat";

fn build_endpoint(host: &str) -> String {
    format!("{}{}", host.trim_end_matches('/'), CHAT_PATH)
}

#[derive(Clone)]
pub struct OllamaBackend {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl OllamaBackend {
    pub fn new(host: &str, model: impl Into<String>) -> Result<Self, BackendError> {
        let http = HttpClient::new()?;
        Ok(Self {
            client: http.client,
            endpoint: build_endpoint(host),
            model: model.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl ChatBackend for OllamaBackend {
    fn stream_chat(&self, messages: Vec<ChatMessage>) -> TokenStream {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let req = ChatRequest { model: self.model.clone(), messages, stream: true };

        Box::pin(async_stream::try_stream! {
            debug!(endpoint = %endpoint, model = %req.model, "POST chat");
            let resp = client
                .post(&endpoint)
                .json(&req)
                .send()
                .await
                .map_err(BackendError::from)?;

            let status = resp.status();
            let resp = if status.is_success() {
                resp
            } else {
                let text = resp.text().await.unwrap_or_default();
                Err(BackendError::new(format!("backend returned {}: {}", status, text.trim())))?
            };

            let mut body = resp.bytes_stream();
            let mut decoder = NdjsonDecoder::default();

            while let Some(chunk) = body.next().await {
                let chunk = chunk.map_err(BackendError::from)?;
                for token in decoder.push(&chunk)? {
                    yield token;
                }
                if decoder.is_done() {
                    break;
                }
            }

            if !decoder.is_done() {
                for token in decoder.finish()? {
                    yield token;
                }
                if !decoder.is_done() {
                    warn!("response body ended without a done marker");
                }
            }
        })
    }
}

/// Incremental splitter for an NDJSON chat response.
///
/// Bytes are buffered until a full line is available, so multi-byte
/// characters split across network chunks decode correctly. Lines after
/// the `done` marker are ignored.
#[derive(Debug, Default)]
pub struct NdjsonDecoder {
    buffer: Vec<u8>,
    done: bool,
}

impl NdjsonDecoder {
    pub fn push(&mut self, chunk: &[u8]) -> Result<Vec<String>, BackendError> {
        self.buffer.extend_from_slice(chunk);
        let mut tokens = Vec::new();
        while !self.done {
            let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') else { break };
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            self.decode_line(&line, &mut tokens)?;
        }
        Ok(tokens)
    }

    /// Flush a trailing line that had no terminating newline.
    pub fn finish(&mut self) -> Result<Vec<String>, BackendError> {
        let rest = std::mem::take(&mut self.buffer);
        let mut tokens = Vec::new();
        self.decode_line(&rest, &mut tokens)?;
        Ok(tokens)
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    fn decode_line(&mut self, line: &[u8], tokens: &mut Vec<String>) -> Result<(), BackendError> {
        if self.done {
            return Ok(());
        }
        let line = std::str::from_utf8(line)
            .map_err(|e| BackendError::new(format!("response line is not valid UTF-8: {}", e)))?
            .trim();
        if line.is_empty() {
            return Ok(());
        }
        let chunk: ChatChunk = serde_json::from_str(line)?;
        if let Some(error) = chunk.error {
            return Err(BackendError::new(error));
        }
        if let Some(message) = chunk.message {
            if !message.content.is_empty() {
                tokens.push(message.content);
            }
        }
        self.done = chunk.done;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_host_and_path() {
        assert_eq!(build_endpoint("http://localhost:30105"), "http://localhost:30105/api/chat");
        assert_eq!(build_endpoint("http://localhost:30105/"), "http://localhost:30105/api/chat");
    }

    #[test]
    fn backend_keeps_model_and_endpoint() {
        let backend = OllamaBackend::new("http://localhost:30105/", "qwen2.5:0.5b").unwrap();
        assert_eq!(backend.endpoint(), "http://localhost:30105/api/chat");
        assert_eq!(backend.model(), "qwen2.5:0.5b");
    }

    #[test]
    fn decodes_tokens_across_chunk_boundaries() {
        let mut dec = NdjsonDecoder::default();
        let first = dec
            .push(br#"{"message":{"role":"assistant","content":"Hel"},"done":false}
{"message":{"role":"assi"#)
            .unwrap();
        assert_eq!(first, vec!["Hel"]);
        let second = dec
            .push(br#"stant","content":"lo"},"done":false}
{"message":{"role":"assistant","content":""},"done":true,"eval_count":2}
"#)
            .unwrap();
        assert_eq!(second, vec!["lo"]);
        assert!(dec.is_done());
    }

    #[test]
    fn multibyte_character_split_between_chunks() {
        let line = "{\"message\":{\"content\":\"caf\u{e9}\"},\"done\":false}\n".as_bytes();
        let split = line.iter().position(|&b| b == 0xC3).unwrap() + 1;
        let mut dec = NdjsonDecoder::default();
        assert!(dec.push(&line[..split]).unwrap().is_empty());
        assert_eq!(dec.push(&line[split..]).unwrap(), vec!["caf\u{e9}"]);
    }

    #[test]
    fn ignores_lines_after_done() {
        let mut dec = NdjsonDecoder::default();
        let tokens = dec
            .push(b"{\"message\":{\"content\":\"a\"},\"done\":true}\n{\"message\":{\"content\":\"b\"}}\n")
            .unwrap();
        assert_eq!(tokens, vec!["a"]);
        assert!(dec.finish().unwrap().is_empty());
    }

    #[test]
    fn trailing_line_without_newline_is_flushed() {
        let mut dec = NdjsonDecoder::default();
        assert!(dec.push(br#"{"message":{"content":"tail"},"done":true}"#).unwrap().is_empty());
        assert_eq!(dec.finish().unwrap(), vec!["tail"]);
        assert!(dec.is_done());
    }

    #[test]
    fn error_line_fails() {
        let mut dec = NdjsonDecoder::default();
        let err = dec.push(b"{\"error\":\"model 'nope' not found\"}\n").unwrap_err();
        assert_eq!(err.message(), "model 'nope' not found");
    }

    #[test]
    fn invalid_utf8_line_fails() {
        let mut dec = NdjsonDecoder::default();
        let mut line = br#"{"message":{"content":"bad "#.to_vec();
        line.extend_from_slice(&[0xFF, 0xFE]);
        line.extend_from_slice(b"\"},\"done\":false}\n");
        let err = dec.push(&line).unwrap_err();
        assert!(err.message().contains("not valid UTF-8"), "{}", err);
    }

    #[test]
    fn garbage_line_fails() {
        let mut dec = NdjsonDecoder::default();
        assert!(dec.push(b"<html>bad gateway</html>\n").is_err());
    }
}
