//! Chat assistant: responders, the persisted client chat log, and the
//! server-side session registry.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::error::Result;
use crate::locale::Locale;
use crate::store::{KeyValueStore, CHAT_KEY};
use crate::types::ChatMessage;

/// Exchanges kept per server-side session.
pub const MAX_SESSION_EXCHANGES: usize = 10;

pub trait ChatResponder: Send + Sync {
    /// Answers `message` given the earlier turns, in `locale`.
    fn reply(&self, message: &str, history: &[ChatMessage], locale: Locale) -> Result<String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MockChatResponder;

impl ChatResponder for MockChatResponder {
    fn reply(&self, message: &str, _history: &[ChatMessage], _locale: Locale) -> Result<String> {
        Ok(format!(
            "Mock Gemini Response:\nYou said: \"{}\"\n\n(This is a demo reply.)",
            message
        ))
    }
}

// ============================================================
// CLIENT CHAT LOG
// ============================================================

/// Ordered chat log, written back to the store on every change.
pub struct ChatSession<'a> {
    store: &'a KeyValueStore,
    responder: &'a dyn ChatResponder,
    messages: Vec<ChatMessage>,
}

impl<'a> ChatSession<'a> {
    /// Opens the session, restoring any log already in the store.
    pub fn open(store: &'a KeyValueStore, responder: &'a dyn ChatResponder) -> Result<Self> {
        let messages = store.get_json::<Vec<ChatMessage>>(CHAT_KEY)?.unwrap_or_default();
        log::info!("[CHAT] Restored {} messages", messages.len());
        Ok(Self {
            store,
            responder,
            messages,
        })
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    fn persist(&self) -> Result<()> {
        self.store.set_json(CHAT_KEY, &self.messages)
    }

    pub fn push(&mut self, message: ChatMessage) -> Result<()> {
        self.messages.push(message);
        self.persist()
    }

    /// Sends `text` and records the reply. Blank input is ignored.
    ///
    /// A failed reply removes the user turn again; the stored log never ends
    /// on an unanswered message.
    pub fn send(&mut self, text: &str, locale: Locale) -> Result<Option<String>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        self.push(ChatMessage::user(text))?;
        let history = &self.messages[..self.messages.len() - 1];
        let reply = match self.responder.reply(text, history, locale) {
            Ok(reply) => reply,
            Err(e) => {
                self.messages.pop();
                self.persist()?;
                log::warn!("[CHAT] Reply failed, user turn rolled back: {}", e);
                return Err(e);
            }
        };
        self.push(ChatMessage::assistant(&reply))?;

        log::info!("[CHAT] {} messages in log", self.messages.len());
        Ok(Some(reply))
    }

    pub fn clear(&mut self) -> Result<()> {
        self.messages.clear();
        self.store.remove(CHAT_KEY)?;
        Ok(())
    }
}

// ============================================================
// SERVER SESSIONS
// ============================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatExchange {
    pub user: String,
    pub bot: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    pub message: String,
    #[serde(default)]
    pub language: Locale,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub reply: String,
    pub language: Locale,
    pub history_length: usize,
}

/// In-memory chat sessions keyed by id, each trimmed to the last
/// [`MAX_SESSION_EXCHANGES`] exchanges.
#[derive(Default)]
pub struct ChatSessionRegistry {
    sessions: Mutex<HashMap<String, Vec<ChatExchange>>>,
}

impl ChatSessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self, session_id: &str) -> Vec<ChatExchange> {
        self.sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(session_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Answers `request` with `responder`, creating a session when none is given.
    pub fn chat(&self, request: &ChatRequest, responder: &dyn ChatResponder) -> Result<ChatResponse> {
        let session_id = request
            .session_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let history = self.history(&session_id);
        let transcript: Vec<ChatMessage> = history
            .iter()
            .flat_map(|ex| [ChatMessage::user(&ex.user), ChatMessage::assistant(&ex.bot)])
            .collect();

        let reply = responder.reply(&request.message, &transcript, request.language)?;

        let mut sessions = self
            .sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let entry = sessions.entry(session_id.clone()).or_default();
        entry.push(ChatExchange {
            user: request.message.clone(),
            bot: reply.clone(),
        });
        if entry.len() > MAX_SESSION_EXCHANGES {
            let excess = entry.len() - MAX_SESSION_EXCHANGES;
            entry.drain(..excess);
        }
        let history_length = entry.len();

        log::info!(
            "[CHAT] Session {} now holds {} exchanges",
            session_id,
            history_length
        );

        Ok(ChatResponse {
            session_id,
            reply,
            language: request.language,
            history_length,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KanasuError;
    use crate::types::ChatRole;

    struct Offline;

    impl ChatResponder for Offline {
        fn reply(&self, _message: &str, _history: &[ChatMessage], _locale: Locale) -> Result<String> {
            Err(KanasuError::Provider("connection refused".to_string()))
        }
    }

    /// Records the locale each reply was asked for.
    #[derive(Default)]
    struct LocaleSpy {
        seen: Mutex<Vec<Locale>>,
    }

    impl ChatResponder for LocaleSpy {
        fn reply(&self, _message: &str, _history: &[ChatMessage], locale: Locale) -> Result<String> {
            self.seen.lock().unwrap().push(locale);
            Ok("ok".to_string())
        }
    }

    #[test]
    fn mock_reply_echoes_message() {
        let reply = MockChatResponder.reply("hello", &[], Locale::En).unwrap();
        assert_eq!(
            reply,
            "Mock Gemini Response:\nYou said: \"hello\"\n\n(This is a demo reply.)"
        );
    }

    #[test]
    fn blank_input_is_ignored() {
        let store = KeyValueStore::in_memory().unwrap();
        let mut session = ChatSession::open(&store, &MockChatResponder).unwrap();
        assert_eq!(session.send("   ", Locale::En).unwrap(), None);
        assert!(session.messages().is_empty());
        assert!(!store.contains(CHAT_KEY).unwrap());
    }

    #[test]
    fn send_appends_user_then_assistant() {
        let store = KeyValueStore::in_memory().unwrap();
        let mut session = ChatSession::open(&store, &MockChatResponder).unwrap();
        session.send("what is BCA?", Locale::En).unwrap();

        let roles: Vec<_> = session.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, [ChatRole::User, ChatRole::Assistant]);

        session.clear().unwrap();
        assert!(session.messages().is_empty());
        assert!(!store.contains(CHAT_KEY).unwrap());
    }

    #[test]
    fn registry_keeps_last_ten_exchanges() {
        let registry = ChatSessionRegistry::new();
        let mut request = ChatRequest {
            session_id: None,
            message: "first".to_string(),
            language: Locale::Kn,
        };

        let first = registry.chat(&request, &MockChatResponder).unwrap();
        assert_eq!(first.history_length, 1);
        assert_eq!(first.language, Locale::Kn);

        request.session_id = Some(first.session_id.clone());
        for i in 0..12 {
            request.message = format!("msg {i}");
            registry.chat(&request, &MockChatResponder).unwrap();
        }

        let history = registry.history(&first.session_id);
        assert_eq!(history.len(), MAX_SESSION_EXCHANGES);
        assert_eq!(history[0].user, "msg 2");
        assert_eq!(history[9].user, "msg 11");
    }

    #[test]
    fn failed_reply_leaves_log_unchanged() {
        let store = KeyValueStore::in_memory().unwrap();
        {
            let mut session = ChatSession::open(&store, &MockChatResponder).unwrap();
            session.send("first", Locale::En).unwrap();
        }

        let mut session = ChatSession::open(&store, &Offline).unwrap();
        assert!(session.send("second", Locale::En).is_err());
        assert_eq!(session.messages().len(), 2);

        let stored: Vec<ChatMessage> = store.get_json(CHAT_KEY).unwrap().unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[1].role, ChatRole::Assistant);
    }

    #[test]
    fn reply_uses_session_locale_not_message_script() {
        let store = KeyValueStore::in_memory().unwrap();
        let spy = LocaleSpy::default();
        let mut session = ChatSession::open(&store, &spy).unwrap();

        session.send("what is BCA?", Locale::Kn).unwrap();
        assert_eq!(*spy.seen.lock().unwrap(), vec![Locale::Kn]);
    }
}
