use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use crate::application::ChatClient;
use crate::domain::{CompletionRequest, DomainError};

enum Reply {
    /// Recommend every card listed in the prompt, in order.
    Echo,
    Fixed(String),
    Fail(String),
}

/// Offline [`ChatClient`] for tests and `--provider mock`.
///
/// Counts calls and remembers the last request so tests can assert on
/// caching and prompt contents.
pub struct MockChatClient {
    reply: Reply,
    calls: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl MockChatClient {
    /// Answers with every `Card N: name` entry found in the prompt.
    pub fn new() -> Self {
        Self::from_reply(Reply::Echo)
    }

    pub fn with_response(text: impl Into<String>) -> Self {
        Self::from_reply(Reply::Fixed(text.into()))
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::from_reply(Reply::Fail(message.into()))
    }

    fn from_reply(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().ok().and_then(|r| r.clone())
    }

    fn echo(prompt: &str) -> String {
        let mut recs = Vec::new();
        let mut lines = prompt.lines().peekable();
        while let Some(line) = lines.next() {
            let Some(name) = line
                .strip_prefix("Card ")
                .and_then(|rest| rest.split_once(": "))
                .map(|(_, name)| name.trim())
            else {
                continue;
            };
            let perks = lines
                .peek()
                .and_then(|next| next.strip_prefix("Perks: "))
                .unwrap_or("")
                .trim();
            recs.push(json!({
                "name": name,
                "why": "Listed among the best matches for your question",
                "perks": perks,
            }));
        }
        json!({ "recs": recs }).to_string()
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        match &self.reply {
            Reply::Echo => Ok(Self::echo(&request.user)),
            Reply::Fixed(text) => Ok(text.clone()),
            Reply::Fail(message) => Err(DomainError::fetch_failed(message.clone())),
        }
    }

    fn model_name(&self) -> &str {
        "mock-chat"
    }
}
