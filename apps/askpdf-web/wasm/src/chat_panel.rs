//! Chat transcript state and the send flow for one analysis session
//!
//! The transcript itself lives in `askpdf_core::ChatLog`; this wrapper adds
//! the draft input, the responding flag, and the two halves of an exchange.
//! `begin_send` runs before the request goes out, `finish_send` after it
//! settles; the app facade awaits the network in between so the panel stays
//! borrowable while a response is pending.

use askpdf_core::{ChatLog, ChatReply, Message, SEND_FAILURE_TEXT};

use crate::view_state::ViewState;

/// How a chat request settled: a decoded reply, or a transport/decoding
/// failure described for the console.
pub(crate) enum SendOutcome {
    Reply(ChatReply),
    Failed(String),
}

pub(crate) struct ChatPanel {
    file_id: String,
    log: ChatLog,
    draft: String,
    responding: bool,
}

impl ChatPanel {
    pub fn new(file_id: &str, now_ms: f64) -> Self {
        Self {
            file_id: file_id.to_string(),
            log: ChatLog::with_greeting(now_ms),
            draft: String::new(),
            responding: false,
        }
    }

    pub fn file_id(&self) -> &str {
        &self.file_id
    }

    pub fn messages(&self) -> &[Message] {
        self.log.messages()
    }

    pub fn is_responding(&self) -> bool {
        self.responding
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: &str) {
        self.draft = text.to_string();
    }

    /// Start an exchange: raise the responding flag and append the user
    /// message when the draft is non-blank. Returns the prompt and document
    /// id for the request; the prompt is submitted verbatim, blank input
    /// included.
    pub fn begin_send(&mut self, now_ms: f64) -> (String, String) {
        self.responding = true;
        let prompt = self.draft.clone();
        if !prompt.trim().is_empty() {
            self.log.push_user(&prompt, now_ms);
        }
        (prompt, self.file_id.clone())
    }

    /// Settle an exchange: append the assistant message for the outcome
    /// (answer, backend error, or transport failure), then clear the draft
    /// and drop the responding flag. The cleanup runs on every outcome.
    pub fn finish_send(&mut self, outcome: SendOutcome, now_ms: f64) {
        match outcome {
            SendOutcome::Reply(reply) => {
                if let ChatReply::Failure { ref error } = reply {
                    report_error(&format!("Error from server: {}", error));
                }
                self.log.apply_reply(&reply, now_ms);
            }
            SendOutcome::Failed(detail) => {
                report_error(&format!("Error sending message: {}", detail));
                self.log.push_assistant(SEND_FAILURE_TEXT, now_ms, None);
            }
        }
        self.draft.clear();
        self.responding = false;
    }

    /// A citation click navigates to the cited display page, one past the
    /// backend's zero-based index. Messages without a citation ignore the
    /// click.
    pub fn citation_clicked(&self, state: &mut ViewState, message_index: usize) {
        let Some(page) = self
            .log
            .messages()
            .get(message_index)
            .and_then(Message::cited_display_page)
        else {
            return;
        };
        state.go_to_page(page);
    }
}

/// Console-level error reporting; stderr when compiled off the browser.
fn report_error(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&wasm_bindgen::JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("{message}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use askpdf_core::GREETING;
    use pretty_assertions::assert_eq;

    const T0: f64 = 1_700_000_000_000.0;

    fn answer(text: &str, citations: Vec<u32>) -> SendOutcome {
        SendOutcome::Reply(ChatReply::Answer {
            response: text.to_string(),
            citations,
        })
    }

    #[test]
    fn new_panel_is_seeded_and_idle() {
        let panel = ChatPanel::new("abc123", T0);
        assert_eq!(panel.file_id(), "abc123");
        assert_eq!(panel.messages().len(), 1);
        assert_eq!(panel.messages()[0].text, GREETING);
        assert!(!panel.is_responding());
        assert_eq!(panel.draft(), "");
    }

    #[test]
    fn begin_send_appends_the_user_message_optimistically() {
        let mut panel = ChatPanel::new("abc123", T0);
        panel.set_draft("What is the total?");

        let (prompt, file_id) = panel.begin_send(T0 + 1.0);
        assert_eq!(prompt, "What is the total?");
        assert_eq!(file_id, "abc123");
        assert!(panel.is_responding());
        assert_eq!(panel.messages().len(), 2);
        assert!(panel.messages()[1].is_user);
        assert_eq!(panel.messages()[1].text, "What is the total?");
    }

    #[test]
    fn blank_drafts_are_submitted_but_not_appended() {
        let mut panel = ChatPanel::new("abc123", T0);
        panel.set_draft("   ");

        let (prompt, _) = panel.begin_send(T0 + 1.0);
        assert_eq!(prompt, "   ");
        assert_eq!(panel.messages().len(), 1);
    }

    #[test]
    fn successful_exchange_grows_by_two_and_resets() {
        let mut panel = ChatPanel::new("abc123", T0);
        panel.set_draft("What is the total?");
        panel.begin_send(T0 + 1.0);
        panel.finish_send(answer("The total is $42.", vec![3]), T0 + 2.0);

        assert_eq!(panel.messages().len(), 3);
        let reply = panel.messages().last().unwrap();
        assert_eq!(reply.text, "The total is $42.");
        assert_eq!(reply.page_number, Some(3));
        assert_eq!(reply.cited_display_page(), Some(4));
        assert_eq!(panel.draft(), "");
        assert!(!panel.is_responding());
    }

    #[test]
    fn backend_error_appends_its_text_without_a_citation() {
        let mut panel = ChatPanel::new("abc123", T0);
        panel.set_draft("");
        panel.begin_send(T0 + 1.0);
        panel.finish_send(
            SendOutcome::Reply(ChatReply::Failure {
                error: "file not found".to_string(),
            }),
            T0 + 2.0,
        );

        // Blank prompt: the exchange grows by exactly one.
        assert_eq!(panel.messages().len(), 2);
        let reply = panel.messages().last().unwrap();
        assert_eq!(reply.text, "file not found");
        assert!(!reply.is_user);
        assert_eq!(reply.page_number, None);
        assert!(!panel.is_responding());
    }

    #[test]
    fn transport_failure_appends_the_generic_message() {
        let mut panel = ChatPanel::new("abc123", T0);
        panel.set_draft("hello?");
        panel.begin_send(T0 + 1.0);
        panel.finish_send(SendOutcome::Failed("connection refused".to_string()), T0 + 2.0);

        assert_eq!(panel.messages().len(), 3);
        assert_eq!(panel.messages().last().unwrap().text, "Error sending message");
        assert_eq!(panel.draft(), "");
        assert!(!panel.is_responding());
    }

    #[test]
    fn draft_typed_during_a_pending_exchange_is_cleared_on_settle() {
        let mut panel = ChatPanel::new("abc123", T0);
        panel.set_draft("first");
        panel.begin_send(T0 + 1.0);
        panel.set_draft("typed while waiting");
        panel.finish_send(answer("Done.", vec![]), T0 + 2.0);
        assert_eq!(panel.draft(), "");
    }
}
