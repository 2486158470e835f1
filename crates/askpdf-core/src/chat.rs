//! Append-only chat transcript
//!
//! Messages are immutable once appended and the sequence never reorders or
//! drops entries; failed exchanges append assistant messages instead of
//! replacing anything. Timestamps are JavaScript epoch milliseconds supplied
//! by the caller so the transcript stays deterministic under test.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::ChatReply;

/// Fixed assistant message every transcript starts with.
pub const GREETING: &str =
    "Hello! It seems you have uploaded a PDF document. How can I help you with it?";

/// Assistant message appended when the chat request itself fails.
pub const SEND_FAILURE_TEXT: &str = "Error sending message";

/// One chat message. Field names serialize camelCase for the JS layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub text: String,
    pub is_user: bool,
    /// Epoch milliseconds.
    pub timestamp: f64,
    /// Zero-based page citation reported by the backend, if any.
    pub page_number: Option<u32>,
}

impl Message {
    fn new(text: &str, is_user: bool, timestamp: f64, page_number: Option<u32>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            is_user,
            timestamp,
            page_number,
        }
    }

    /// The page a citation click navigates to. The backend index is
    /// zero-based while display and navigation are one-based, so this is the
    /// single place the offset is applied.
    pub fn cited_display_page(&self) -> Option<u32> {
        self.page_number.map(|p| p + 1)
    }
}

/// Ordered, append-only list of messages, seeded with the greeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatLog {
    messages: Vec<Message>,
}

impl ChatLog {
    pub fn with_greeting(now_ms: f64) -> Self {
        Self {
            messages: vec![Message::new(GREETING, false, now_ms, None)],
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn push_user(&mut self, text: &str, now_ms: f64) {
        self.messages.push(Message::new(text, true, now_ms, None));
    }

    pub fn push_assistant(&mut self, text: &str, now_ms: f64, page_number: Option<u32>) {
        self.messages
            .push(Message::new(text, false, now_ms, page_number));
    }

    /// Append the assistant message for a backend reply: the error text on a
    /// failure, otherwise the answer with its first citation attached.
    pub fn apply_reply(&mut self, reply: &ChatReply, now_ms: f64) {
        match reply {
            ChatReply::Failure { error } => self.push_assistant(error, now_ms, None),
            ChatReply::Answer { response, .. } => {
                self.push_assistant(response, now_ms, reply.first_citation())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const T0: f64 = 1_700_000_000_000.0;

    #[test]
    fn transcript_starts_with_the_greeting() {
        let log = ChatLog::with_greeting(T0);
        assert_eq!(log.len(), 1);
        let first = &log.messages()[0];
        assert_eq!(first.text, GREETING);
        assert!(!first.is_user);
        assert_eq!(first.page_number, None);
        assert_eq!(first.timestamp, T0);
    }

    #[test]
    fn successful_exchange_grows_by_two() {
        let mut log = ChatLog::with_greeting(T0);
        log.push_user("What is the total?", T0 + 1.0);
        let reply = ChatReply::Answer {
            response: "The total is $42.".to_string(),
            citations: vec![3],
        };
        log.apply_reply(&reply, T0 + 2.0);

        assert_eq!(log.len(), 3);
        let answer = log.last().unwrap();
        assert_eq!(answer.text, "The total is $42.");
        assert!(!answer.is_user);
        assert_eq!(answer.page_number, Some(3));
        assert_eq!(answer.cited_display_page(), Some(4));
    }

    #[test]
    fn error_reply_grows_by_one_with_no_citation() {
        let mut log = ChatLog::with_greeting(T0);
        let reply = ChatReply::Failure {
            error: "file not found".to_string(),
        };
        log.apply_reply(&reply, T0 + 1.0);

        assert_eq!(log.len(), 2);
        let msg = log.last().unwrap();
        assert_eq!(msg.text, "file not found");
        assert!(!msg.is_user);
        assert_eq!(msg.page_number, None);
    }

    #[test]
    fn only_the_first_citation_is_attached() {
        let mut log = ChatLog::with_greeting(T0);
        let reply = ChatReply::Answer {
            response: "See the appendix.".to_string(),
            citations: vec![7, 2, 9],
        };
        log.apply_reply(&reply, T0 + 1.0);
        assert_eq!(log.last().unwrap().page_number, Some(7));
    }

    #[test]
    fn empty_citation_list_attaches_nothing() {
        let mut log = ChatLog::with_greeting(T0);
        let reply = ChatReply::Answer {
            response: "Nothing to cite.".to_string(),
            citations: vec![],
        };
        log.apply_reply(&reply, T0 + 1.0);
        assert_eq!(log.last().unwrap().page_number, None);
        assert_eq!(log.last().unwrap().cited_display_page(), None);
    }

    #[test]
    fn send_failure_text_is_an_assistant_message() {
        let mut log = ChatLog::with_greeting(T0);
        log.push_assistant(SEND_FAILURE_TEXT, T0 + 1.0, None);
        let msg = log.last().unwrap();
        assert_eq!(msg.text, "Error sending message");
        assert!(!msg.is_user);
    }

    #[test]
    fn messages_serialize_camel_case_for_js() {
        let log = ChatLog::with_greeting(T0);
        let json = serde_json::to_value(&log.messages()[0]).unwrap();
        assert!(json.get("isUser").is_some());
        assert!(json.get("pageNumber").is_some());
        assert!(json.get("is_user").is_none());
    }

    #[test]
    fn message_ids_are_unique() {
        let mut log = ChatLog::with_greeting(T0);
        log.push_user("a", T0);
        log.push_user("b", T0);
        let ids: Vec<_> = log.messages().iter().map(|m| m.id.clone()).collect();
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(ids.len(), deduped.len());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Appending never reorders or mutates what is already there.
            #[test]
            fn appends_preserve_prefix(texts in proptest::collection::vec("[a-z ]{0,20}", 0..12)) {
                let mut log = ChatLog::with_greeting(T0);
                let mut snapshots = Vec::new();
                for (i, text) in texts.iter().enumerate() {
                    snapshots.push(log.messages().to_vec());
                    if i % 2 == 0 {
                        log.push_user(text, T0 + i as f64);
                    } else {
                        log.push_assistant(text, T0 + i as f64, None);
                    }
                }
                for (i, snapshot) in snapshots.iter().enumerate() {
                    prop_assert_eq!(&log.messages()[..=i], snapshot.as_slice());
                }
            }
        }
    }
}
