//! Chat - Conversation state and transcript persistence

use contracts::domain::a002_chat::aggregate::{ChatMessage, ChatResponse};

use crate::shared::api_client::ApiError;
use crate::shared::storage::{SharedStore, StorageError};

/// Ordered, append-only transcript plus the number of questions in flight
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    in_flight: usize,
}

impl Conversation {
    pub fn from_messages(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            ..Self::default()
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_waiting(&self) -> bool {
        self.in_flight > 0
    }

    /// Record the user's question.
    ///
    /// Blank input changes nothing and returns `None`: no request is sent.
    pub fn begin(&mut self, input: &str) -> Option<String> {
        if input.trim().is_empty() {
            return None;
        }
        self.messages.push(ChatMessage::user(input));
        self.in_flight += 1;
        Some(input.to_string())
    }

    /// Append the answer, or the fallback text when the request failed
    pub fn finish(&mut self, result: Result<ChatResponse, ApiError>) {
        let message = match result {
            Ok(response) => ChatMessage::bot(response.answer).with_sources(response.sources),
            Err(_) => ChatMessage::fallback(),
        };
        self.messages.push(message);
        self.in_flight = self.in_flight.saturating_sub(1);
    }
}

/// Record that message `index` is on screen.
///
/// `true` only the first time an index past `revealed_len` shows up, so a
/// remounted list does not replay the typewriter effect.
pub fn first_reveal(revealed_len: &mut usize, index: usize) -> bool {
    if index < *revealed_len {
        return false;
    }
    *revealed_len = index + 1;
    true
}

/// Session id first, then the stored one, then the fixed placeholder
pub fn resolve_user_id(session: Option<&str>, stored: Option<&str>, fallback: &str) -> String {
    session
        .filter(|id| !id.is_empty())
        .or(stored.filter(|id| !id.is_empty()))
        .unwrap_or(fallback)
        .to_string()
}

/// Transcript persisted as a JSON array under one fixed key
#[derive(Clone)]
pub struct TranscriptStore {
    store: SharedStore,
    key: String,
    enabled: bool,
}

impl TranscriptStore {
    pub fn new(store: SharedStore, key: impl Into<String>, enabled: bool) -> Self {
        Self {
            store,
            key: key.into(),
            enabled,
        }
    }

    /// Missing or corrupt data yields an empty transcript
    pub fn load(&self) -> Vec<ChatMessage> {
        if !self.enabled {
            return Vec::new();
        }
        let Some(raw) = self.store.get(&self.key) else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<ChatMessage>>(&raw) {
            Ok(messages) => messages,
            Err(e) => {
                log::warn!("discarding stored transcript '{}': {}", self.key, e);
                Vec::new()
            }
        }
    }

    /// An empty transcript removes the key instead of writing `[]`
    pub fn save(&self, messages: &[ChatMessage]) -> Result<(), StorageError> {
        if !self.enabled {
            return Ok(());
        }
        if messages.is_empty() {
            self.store.clear(&self.key);
            return Ok(());
        }
        let raw = serde_json::to_string(messages).map_err(|e| StorageError::Encode(e.to_string()))?;
        self.store.set(&self.key, &raw)
    }

    /// Read a plain value (e.g. the stored user id) from the same backend
    pub fn read_value(&self, key: &str) -> Option<String> {
        self.store.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::{KeyValueStore, MemoryStorage};
    use contracts::domain::a002_chat::aggregate::{AnswerSource, FALLBACK_ANSWER};

    const KEY: &str = "chat_conversation";

    fn answer(text: &str) -> Result<ChatResponse, ApiError> {
        Ok(ChatResponse {
            answer: text.to_string(),
            sources: Vec::new(),
            query: None,
        })
    }

    #[test]
    fn test_blank_input_is_a_no_op() {
        let mut conversation = Conversation::from_messages(vec![ChatMessage::user("earlier")]);
        let before = conversation.clone();

        assert_eq!(conversation.begin(""), None);
        assert_eq!(conversation.begin("   \t\n"), None);
        assert_eq!(conversation, before);
        assert!(!conversation.is_waiting());
    }

    #[test]
    fn test_successful_submit_appends_user_then_bot() {
        let mut conversation = Conversation::default();

        let question = conversation.begin("What is in the report?");
        assert_eq!(question.as_deref(), Some("What is in the report?"));
        assert!(conversation.is_waiting());
        assert_eq!(conversation.messages(), &[ChatMessage::user("What is in the report?")]);

        conversation.finish(answer("Quarterly numbers."));
        assert!(!conversation.is_waiting());
        assert_eq!(
            conversation.messages(),
            &[
                ChatMessage::user("What is in the report?"),
                ChatMessage::bot("Quarterly numbers."),
            ]
        );
    }

    #[test]
    fn test_failed_submit_appends_fallback() {
        let mut conversation = Conversation::default();
        conversation.begin("hello");
        conversation.finish(Err(ApiError::Status {
            status: 400,
            message: Some("Invalid user_id or no documents uploaded".into()),
        }));

        let messages = conversation.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].is_user);
        assert!(!messages[1].is_user);
        assert_eq!(messages[1].text, FALLBACK_ANSWER);
        assert!(!conversation.is_waiting());
    }

    #[test]
    fn test_concurrent_questions_stay_waiting_until_both_finish() {
        let mut conversation = Conversation::default();
        conversation.begin("one");
        conversation.begin("two");
        conversation.finish(answer("first"));
        assert!(conversation.is_waiting());
        conversation.finish(Err(ApiError::Network("offline".into())));
        assert!(!conversation.is_waiting());
        assert_eq!(conversation.messages().len(), 4);
    }

    #[test]
    fn test_answer_keeps_sources() {
        let mut conversation = Conversation::default();
        conversation.begin("q");
        conversation.finish(Ok(ChatResponse {
            answer: "a".into(),
            sources: vec![AnswerSource {
                filename: "report.pdf".into(),
                chunk_index: Some(2),
                score: 0.9,
            }],
            query: Some("q".into()),
        }));
        assert_eq!(conversation.messages()[1].source_names(), vec!["report.pdf"]);
    }

    #[test]
    fn test_first_reveal_skips_restored_messages() {
        // Two messages restored from storage
        let mut revealed_len = 2;
        assert!(!first_reveal(&mut revealed_len, 0));
        assert!(!first_reveal(&mut revealed_len, 1));
        assert!(first_reveal(&mut revealed_len, 2));
        assert!(first_reveal(&mut revealed_len, 3));
        assert_eq!(revealed_len, 4);
    }

    #[test]
    fn test_first_reveal_not_repeated_on_remount() {
        let mut revealed_len = 0;
        let first_pass: Vec<bool> = (0..3).map(|i| first_reveal(&mut revealed_len, i)).collect();
        assert_eq!(first_pass, vec![true, true, true]);

        // The message list is rendered again after an upload finished
        let second_pass: Vec<bool> = (0..4).map(|i| first_reveal(&mut revealed_len, i)).collect();
        assert_eq!(second_pass, vec![false, false, false, true]);
    }

    #[test]
    fn test_transcript_round_trip() {
        let memory = MemoryStorage::new();
        let messages = vec![
            ChatMessage::user("first"),
            ChatMessage::bot("second"),
            ChatMessage::user("third"),
        ];

        TranscriptStore::new(memory.shared(), KEY, true)
            .save(&messages)
            .unwrap();

        // Fresh store over the same backend, as on a new mount
        let reloaded = TranscriptStore::new(memory.shared(), KEY, true).load();
        assert_eq!(reloaded, messages);
    }

    #[test]
    fn test_transcript_stored_shape() {
        let memory = MemoryStorage::new();
        let store = TranscriptStore::new(memory.shared(), KEY, true);
        store.save(&[ChatMessage::user("hi")]).unwrap();
        assert_eq!(
            memory.get(KEY).as_deref(),
            Some(r#"[{"text":"hi","isUser":true}]"#)
        );
    }

    #[test]
    fn test_corrupt_transcript_loads_empty() {
        let memory = MemoryStorage::new();
        memory.set(KEY, "{not json").unwrap();
        assert!(TranscriptStore::new(memory.shared(), KEY, true).load().is_empty());
    }

    #[test]
    fn test_empty_transcript_clears_key() {
        let memory = MemoryStorage::new();
        let store = TranscriptStore::new(memory.shared(), KEY, true);
        store.save(&[ChatMessage::user("hi")]).unwrap();
        store.save(&[]).unwrap();
        assert_eq!(memory.get(KEY), None);
    }

    #[test]
    fn test_disabled_transcript_never_touches_storage() {
        let memory = MemoryStorage::new();
        memory.set(KEY, r#"[{"text":"old","isUser":true}]"#).unwrap();
        let store = TranscriptStore::new(memory.shared(), KEY, false);
        assert!(store.load().is_empty());
        store.save(&[ChatMessage::user("new")]).unwrap();
        assert_eq!(
            memory.get(KEY).as_deref(),
            Some(r#"[{"text":"old","isUser":true}]"#)
        );
    }

    #[test]
    fn test_resolve_user_id() {
        assert_eq!(resolve_user_id(Some("s"), Some("l"), "xyz123"), "s");
        assert_eq!(resolve_user_id(None, Some("l"), "xyz123"), "l");
        assert_eq!(resolve_user_id(Some(""), None, "xyz123"), "xyz123");
        assert_eq!(resolve_user_id(None, None, "xyz123"), "xyz123");
    }
}
