//! Interpretation and chat state layered on a live analysis result.
//!
//! DESIGN
//! ======
//! The assistant owns three things tied to the current result: its replay
//! context, the interpretation text, and the chat history. Interpretation and
//! chat each have their own request stream, so their loading flags move
//! independently of the analysis and of each other.
//!
//! Failures never propagate out of here: a failed interpretation or chat turn
//! becomes [`ASSISTANT_ERROR_PLACEHOLDER`] in the slot it would have filled.
//!
//! Chat runs one turn at a time. A user message is appended as soon as it is
//! sent, and exactly one assistant entry (reply or placeholder) follows it.

#[cfg(test)]
#[path = "assistant_test.rs"]
mod assistant_test;

use protocol::{ASSISTANT_ERROR_PLACEHOLDER, AnalysisContext, ApiError, ChatMessage};

use crate::seq::{RequestStream, Resolution, Ticket};

/// Displayed interpretation of the current result.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InterpretationState {
    pub text: Option<String>,
    pub is_loading: bool,
    /// `text` holds the error placeholder rather than an interpretation.
    pub is_error: bool,
}

/// An interpretation fetch to issue.
#[derive(Clone, Debug, PartialEq)]
pub struct InterpretationCall {
    pub ticket: Ticket,
    pub context: AnalysisContext,
}

/// A chat turn to send: full history (ending with the new user message)
/// plus the analysis context.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatTurn {
    pub ticket: Ticket,
    pub history: Vec<ChatMessage>,
    pub context: AnalysisContext,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Assistant {
    context: Option<AnalysisContext>,
    interpretation: InterpretationState,
    interpretation_stream: RequestStream,
    chat_open: bool,
    messages: Vec<ChatMessage>,
    chat_stream: RequestStream,
    turn_pending: bool,
}

impl Assistant {
    /// Adopt a freshly landed result: drop everything tied to the previous
    /// one and start loading its interpretation.
    pub fn begin_interpretation(&mut self, context: AnalysisContext) -> InterpretationCall {
        self.invalidate();
        self.context = Some(context.clone());
        self.interpretation = InterpretationState { text: None, is_loading: true, is_error: false };
        let ticket = self.interpretation_stream.issue();
        log::debug!("interpretation #{} requested", ticket.seq());
        InterpretationCall { ticket, context }
    }

    pub fn resolve_interpretation(&mut self, ticket: Ticket, outcome: Result<String, ApiError>) -> Resolution {
        if self.interpretation_stream.accept(ticket) == Resolution::Stale {
            log::debug!("interpretation #{} superseded; discarded", ticket.seq());
            return Resolution::Stale;
        }
        self.interpretation = match outcome {
            Ok(text) => InterpretationState { text: Some(text), is_loading: false, is_error: false },
            Err(err) => {
                log::warn!("interpretation #{} failed [{}]: {err}", ticket.seq(), err.code());
                InterpretationState {
                    text: Some(ASSISTANT_ERROR_PLACEHOLDER.to_owned()),
                    is_loading: false,
                    is_error: true,
                }
            }
        };
        Resolution::Applied
    }

    /// Hide the interpretation text. An open chat is left as it is.
    pub fn clear_interpretation(&mut self) {
        self.interpretation.text = None;
        self.interpretation.is_error = false;
    }

    /// Forget the current result: context, interpretation, and chat. Every
    /// outstanding interpretation or chat response becomes stale.
    pub fn invalidate(&mut self) {
        self.context = None;
        self.interpretation = InterpretationState::default();
        self.interpretation_stream.invalidate();
        self.chat_open = false;
        self.messages.clear();
        self.chat_stream.invalidate();
        self.turn_pending = false;
    }

    /// Open the chat. Opening from closed starts a fresh conversation seeded
    /// with the interpretation text when one is shown.
    pub fn open_chat(&mut self) {
        if self.chat_open {
            return;
        }
        self.messages.clear();
        if let Some(text) = self.interpretation.text.as_ref().filter(|_| !self.interpretation.is_error) {
            self.messages.push(ChatMessage::assistant(text.clone()));
        }
        self.chat_open = true;
    }

    /// Close the chat. A reply still in flight will not be applied.
    pub fn close_chat(&mut self) {
        if !self.chat_open {
            return;
        }
        self.chat_open = false;
        self.messages.clear();
        self.chat_stream.invalidate();
        self.turn_pending = false;
    }

    /// Append the user's message and hand back the turn to send.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] when the text is blank, the chat is closed,
    /// a reply is still pending, or there is no analysis to discuss. Nothing
    /// is appended in that case.
    pub fn send_message(&mut self, text: &str) -> Result<ChatTurn, ApiError> {
        if text.trim().is_empty() {
            return Err(ApiError::validation("Type a message first."));
        }
        if !self.chat_open {
            return Err(ApiError::validation("Open the chat first."));
        }
        if self.turn_pending {
            return Err(ApiError::validation("Wait for MedAI to reply."));
        }
        let Some(context) = self.context.clone() else {
            return Err(ApiError::validation("Run an analysis before chatting with MedAI."));
        };

        self.messages.push(ChatMessage::user(text));
        self.turn_pending = true;
        let ticket = self.chat_stream.issue();
        log::debug!("chat turn #{} sent with {} messages", ticket.seq(), self.messages.len());
        Ok(ChatTurn { ticket, history: self.messages.clone(), context })
    }

    /// Append exactly one assistant entry for the turn behind `ticket`.
    pub fn resolve_turn(&mut self, ticket: Ticket, outcome: Result<ChatMessage, ApiError>) -> Resolution {
        if self.chat_stream.accept(ticket) == Resolution::Stale {
            log::debug!("chat turn #{} arrived after the chat closed; discarded", ticket.seq());
            return Resolution::Stale;
        }
        let reply = match outcome {
            Ok(reply) => reply,
            Err(err) => {
                log::warn!("chat turn #{} failed [{}]: {err}", ticket.seq(), err.code());
                ChatMessage::assistant(ASSISTANT_ERROR_PLACEHOLDER)
            }
        };
        self.messages.push(reply);
        self.turn_pending = false;
        Resolution::Applied
    }

    #[must_use]
    pub fn interpretation(&self) -> &InterpretationState {
        &self.interpretation
    }

    /// Interpretation text worth saving as a report (never the placeholder).
    #[must_use]
    pub fn report_text(&self) -> Option<&str> {
        if self.interpretation.is_error {
            return None;
        }
        self.interpretation.text.as_deref()
    }

    #[must_use]
    pub fn context(&self) -> Option<&AnalysisContext> {
        self.context.as_ref()
    }

    #[must_use]
    pub fn is_chat_open(&self) -> bool {
        self.chat_open
    }

    #[must_use]
    pub fn is_turn_pending(&self) -> bool {
        self.turn_pending
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}
