//! Advisor chat session
//!
//! Ordered, append-only transcript plus single-flight request handling.
//! `submit` is the only way into the Awaiting state and `settle` the only
//! way out; because at most one exchange is ever outstanding, transcript
//! order equals submission order equals display order.
//!
//! The session itself is synchronous. The capability call is the sole
//! suspension point and lives in [`run_exchange`]; UI layers that drive
//! their own event loop call `submit`/`settle` directly, everything else
//! uses [`AdvisorSession::ask`].

use crate::advisor::client::{AdvisorError, AdvisoryCapability};
use crate::catalog::ADVISOR_WELCOME;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

/// Side of the conversation a message belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatSender {
    User,
    Assistant,
}

/// Immutable transcript entry
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: String,
    pub sender: ChatSender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn new(sender: ChatSender, text: impl Into<String>) -> Self {
        ChatMessage {
            id: Uuid::new_v4().to_string(),
            sender,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// Fixed opening message every new session starts with
    fn welcome() -> Self {
        ChatMessage {
            id: "welcome".to_string(),
            sender: ChatSender::Assistant,
            text: ADVISOR_WELCOME.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Accepted submission, ready to hand to the advisory capability
///
/// The exchange id ties the eventual result back to the submission that
/// produced it; results carrying any other id are stale and get dropped.
#[derive(Debug, Clone)]
pub struct AdvisorRequest {
    pub exchange_id: Uuid,
    pub query: String,
}

/// Outcome of a settled advisory call
#[derive(Debug)]
pub enum Settled {
    Answered {
        exchange_id: Uuid,
        reply: String,
    },
    Failed {
        exchange_id: Uuid,
        error: AdvisorError,
    },
}

/// Chat session state: transcript, input buffer, single-flight flag
#[derive(Debug)]
pub struct AdvisorSession {
    transcript: Vec<ChatMessage>,
    input_buffer: String,
    outstanding: Option<Uuid>,
}

impl Default for AdvisorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AdvisorSession {
    /// New session with the welcome message already in the transcript
    pub fn new() -> Self {
        AdvisorSession {
            transcript: vec![ChatMessage::welcome()],
            input_buffer: String::new(),
            outstanding: None,
        }
    }

    /// Ordered transcript, oldest first
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Whether a request is outstanding
    pub fn pending(&self) -> bool {
        self.outstanding.is_some()
    }

    /// Current input buffer contents
    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    /// Replace the input buffer (keystroke handling lives in the UI layer)
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input_buffer = text.into();
    }

    /// Submit a question: Idle -> Awaiting
    ///
    /// Returns the request to issue to the capability, or `None` when the
    /// submission is rejected. Rejection is silent by design: blank text
    /// never reaches the transcript, and a second question while one is
    /// outstanding is dropped rather than queued.
    ///
    /// On acceptance, in order and before any suspension: the user message
    /// is appended, the input buffer cleared, and the pending flag set.
    pub fn submit(&mut self, text: &str) -> Option<AdvisorRequest> {
        if text.trim().is_empty() {
            debug!("ignoring blank submission");
            return None;
        }
        if self.outstanding.is_some() {
            debug!("ignoring submission while a request is outstanding");
            return None;
        }

        self.transcript.push(ChatMessage::new(ChatSender::User, text));
        self.input_buffer.clear();

        let exchange_id = Uuid::new_v4();
        self.outstanding = Some(exchange_id);

        Some(AdvisorRequest {
            exchange_id,
            query: text.to_string(),
        })
    }

    /// Submit whatever is in the input buffer
    pub fn submit_input(&mut self) -> Option<AdvisorRequest> {
        let text = self.input_buffer.clone();
        self.submit(&text)
    }

    /// Apply a settled result: Awaiting -> Idle
    ///
    /// A result whose exchange id does not match the outstanding one is
    /// stale (the session was reset or the exchange abandoned) and is
    /// dropped without touching the transcript. Failures are reported to
    /// the log only; the user sees no broken bubble, just no reply.
    /// Resetting the pending flag is the final step either way.
    pub fn settle(&mut self, settled: Settled) {
        let exchange_id = match &settled {
            Settled::Answered { exchange_id, .. } => *exchange_id,
            Settled::Failed { exchange_id, .. } => *exchange_id,
        };
        if self.outstanding != Some(exchange_id) {
            warn!(%exchange_id, "dropping stale advisory result");
            return;
        }

        match settled {
            Settled::Answered { reply, .. } => {
                self.transcript
                    .push(ChatMessage::new(ChatSender::Assistant, reply));
            }
            Settled::Failed { error, .. } => {
                warn!(error = %error, "advisory call failed; transcript unchanged");
            }
        }

        self.outstanding = None;
    }

    /// Full exchange: submit, call the capability, settle
    ///
    /// Returns `false` when the submission was rejected. The capability
    /// call is the only await; any failure settles the session and is
    /// never propagated.
    pub async fn ask<C>(&mut self, client: &C, text: &str) -> bool
    where
        C: AdvisoryCapability + ?Sized,
    {
        let Some(request) = self.submit(text) else {
            return false;
        };
        let settled = run_exchange(client, request).await;
        self.settle(settled);
        true
    }
}

/// Drive one accepted request through the advisory capability
///
/// Catches every capability failure and folds it into [`Settled::Failed`];
/// nothing escapes to the caller.
pub async fn run_exchange<C>(client: &C, request: AdvisorRequest) -> Settled
where
    C: AdvisoryCapability + ?Sized,
{
    match client.advise(&request.query).await {
        Ok(reply) => Settled::Answered {
            exchange_id: request.exchange_id,
            reply,
        },
        Err(error) => Settled::Failed {
            exchange_id: request.exchange_id,
            error,
        },
    }
}

/// Like [`run_exchange`], with a deadline of its own
///
/// The HTTP client already times out at the transport level; this guard
/// bounds the whole exchange so a misbehaving capability implementation
/// still settles and the session cannot stay Awaiting forever.
pub async fn run_exchange_with_timeout<C>(
    client: &C,
    request: AdvisorRequest,
    timeout: Duration,
) -> Settled
where
    C: AdvisoryCapability + ?Sized,
{
    let exchange_id = request.exchange_id;
    match tokio::time::timeout(timeout, run_exchange(client, request)).await {
        Ok(settled) => settled,
        Err(_elapsed) => Settled::Failed {
            exchange_id,
            error: AdvisorError::TimedOut {
                seconds: timeout.as_secs(),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_opens_with_welcome() {
        let session = AdvisorSession::new();
        assert_eq!(session.transcript().len(), 1);
        let welcome = &session.transcript()[0];
        assert_eq!(welcome.id, "welcome");
        assert_eq!(welcome.sender, ChatSender::Assistant);
        assert!(!session.pending());
    }

    #[test]
    fn test_blank_submissions_are_rejected_before_any_state_change() {
        let mut session = AdvisorSession::new();
        assert!(session.submit("").is_none());
        assert!(session.submit("   ").is_none());
        assert!(session.submit("\n\t ").is_none());
        assert_eq!(session.transcript().len(), 1);
        assert!(!session.pending());
    }

    #[test]
    fn test_submit_appends_user_message_and_clears_buffer() {
        let mut session = AdvisorSession::new();
        session.set_input("What is the dosage?");
        let request = session.submit_input().expect("submission accepted");
        assert_eq!(request.query, "What is the dosage?");
        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.transcript()[1].sender, ChatSender::User);
        assert_eq!(session.input_buffer(), "");
        assert!(session.pending());
    }

    #[test]
    fn test_second_submit_while_pending_is_dropped() {
        let mut session = AdvisorSession::new();
        let first = session.submit("first").expect("accepted");
        assert!(session.submit("second").is_none());
        assert_eq!(session.transcript().len(), 2);

        session.settle(Settled::Answered {
            exchange_id: first.exchange_id,
            reply: "answer".to_string(),
        });
        assert!(!session.pending());
        // Idle again: next submission goes through
        assert!(session.submit("second").is_some());
    }

    #[test]
    fn test_stale_result_is_dropped() {
        let mut session = AdvisorSession::new();
        let _request = session.submit("question").expect("accepted");

        session.settle(Settled::Answered {
            exchange_id: Uuid::new_v4(),
            reply: "from another life".to_string(),
        });

        // Stale reply neither lands in the transcript nor clears pending
        assert_eq!(session.transcript().len(), 2);
        assert!(session.pending());
    }
}
