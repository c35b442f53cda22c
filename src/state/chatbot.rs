use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use crate::{
    domain::{
        Intent,
        chat::{FORM_OPENED, WELCOME},
    },
    state::timers::TimerQueue,
};

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// The portal user.
    User,
    /// The assistant.
    Bot,
}

/// One message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Position in the conversation, starting at 1.
    pub id: usize,
    /// Message body.
    pub text: String,
    /// Author.
    pub sender: Sender,
    /// When the message was posted.
    pub timestamp: DateTime<Utc>,
    /// Whether the message carries a button that opens the request form.
    pub offers_request_form: bool,
}

#[derive(Debug)]
struct PendingReply {
    intent: Intent,
    at: DateTime<Utc>,
}

/// A conversation with the rule-based assistant.
///
/// Replies are not posted immediately; they are scheduled after a short delay
/// and appear on the next [`tick`](Self::tick) at or after their deadline.
#[derive(Debug)]
pub struct Chatbot {
    messages: Vec<ChatMessage>,
    pending: TimerQueue<PendingReply>,
    delay: TimeDelta,
}

impl Chatbot {
    /// Opens a conversation with the welcome message.
    #[must_use]
    pub fn new(now: DateTime<Utc>, reply_delay: TimeDelta) -> Self {
        let mut chatbot = Self {
            messages: Vec::new(),
            pending: TimerQueue::default(),
            delay: reply_delay,
        };
        chatbot.post(WELCOME, Sender::Bot, now, false);
        chatbot
    }

    /// The conversation so far, oldest first.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Whether a reply is on its way.
    #[must_use]
    pub fn is_typing(&self) -> bool {
        !self.pending.is_empty()
    }

    /// When the next pending reply is due.
    #[must_use]
    pub fn next_reply_at(&self) -> Option<DateTime<Utc>> {
        self.pending.next_deadline()
    }

    fn post(&mut self, text: &str, sender: Sender, at: DateTime<Utc>, offers_request_form: bool) {
        self.messages.push(ChatMessage {
            id: self.messages.len() + 1,
            text: text.to_string(),
            sender,
            timestamp: at,
            offers_request_form,
        });
    }

    /// Posts a user message and schedules the reply.
    ///
    /// Blank messages are ignored. Returns the intent the reply will answer.
    pub fn send(&mut self, text: &str, now: DateTime<Utc>) -> Option<Intent> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.post(text, Sender::User, now, false);
        let intent = Intent::classify(text);
        let at = now
            .checked_add_signed(self.delay)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.pending.schedule(at, PendingReply { intent, at });

        tracing::debug!(?intent, "chat message received");
        Some(intent)
    }

    /// Posts every reply due at or before `now`.
    ///
    /// Returns the number of replies posted.
    pub fn tick(&mut self, now: DateTime<Utc>) -> usize {
        let due = self.pending.take_due(now);
        let count = due.len();
        for PendingReply { intent, at } in due {
            self.post(intent.reply(), Sender::Bot, at, intent.offers_request_form());
        }
        count
    }

    /// Records that the user opened the request form from a reply.
    pub fn open_request_form(&mut self, now: DateTime<Utc>) {
        self.post(FORM_OPENED, Sender::Bot, now, false);
    }
}
