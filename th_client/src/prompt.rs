//! Prompt implementations for the terminal front ends.
//!
//! The TUI cannot block on a question while it is drawing, so
//! [`ChannelPrompt`] turns each question into a [`PromptRequest`] that the
//! event loop renders as a modal and answers through a oneshot channel.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tournament_hub::Prompt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptKind {
    Text,
    Confirm,
}

#[derive(Debug, PartialEq, Eq)]
pub enum PromptAnswer {
    Text(Option<String>),
    Confirm(bool),
}

/// A pending question waiting for the user
#[derive(Debug)]
pub struct PromptRequest {
    pub kind: PromptKind,
    pub message: String,
    pub response: oneshot::Sender<PromptAnswer>,
}

impl PromptRequest {
    /// Answer with a cancellation of the matching kind
    pub fn cancel(self) {
        let answer = match self.kind {
            PromptKind::Text => PromptAnswer::Text(None),
            PromptKind::Confirm => PromptAnswer::Confirm(false),
        };
        let _ = self.response.send(answer);
    }
}

/// Prompt that forwards questions to whoever holds the request receiver.
///
/// A dropped receiver or request counts as a cancelled answer.
#[derive(Clone, Debug)]
pub struct ChannelPrompt {
    requests: mpsc::UnboundedSender<PromptRequest>,
}

impl ChannelPrompt {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PromptRequest>) {
        let (requests, rx) = mpsc::unbounded_channel();
        (Self { requests }, rx)
    }

    async fn ask(&self, kind: PromptKind, message: &str) -> Option<PromptAnswer> {
        let (response, answer) = oneshot::channel();
        let request = PromptRequest {
            kind,
            message: message.to_string(),
            response,
        };
        self.requests.send(request).ok()?;
        answer.await.ok()
    }
}

#[async_trait]
impl Prompt for ChannelPrompt {
    async fn ask_text(&self, message: &str) -> Option<String> {
        match self.ask(PromptKind::Text, message).await {
            Some(PromptAnswer::Text(text)) => text,
            _ => None,
        }
    }

    async fn confirm(&self, message: &str) -> bool {
        matches!(
            self.ask(PromptKind::Confirm, message).await,
            Some(PromptAnswer::Confirm(true))
        )
    }
}
