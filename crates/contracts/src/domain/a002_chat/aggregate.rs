use serde::{Deserialize, Serialize};

/// Shown in place of an answer when the chat request fails
pub const FALLBACK_ANSWER: &str = "Something went wrong!";

/// One entry of the transcript.
///
/// Serialized as `{"text": .., "isUser": ..}`; `sources` is omitted when empty
/// so stored transcripts keep that shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub text: String,
    #[serde(rename = "isUser")]
    pub is_user: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<AnswerSource>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: true,
            sources: Vec::new(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: false,
            sources: Vec::new(),
        }
    }

    pub fn with_sources(mut self, sources: Vec<AnswerSource>) -> Self {
        self.sources = sources;
        self
    }

    pub fn fallback() -> Self {
        Self::bot(FALLBACK_ANSWER)
    }

    /// Distinct source file names in first-seen order
    pub fn source_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for source in &self.sources {
            if !source.filename.is_empty() && !names.contains(&source.filename.as_str()) {
                names.push(&source.filename);
            }
        }
        names
    }
}

/// Document chunk the backend used to build an answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerSource {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub chunk_index: Option<u32>,
    #[serde(default)]
    pub score: f64,
}

/// `POST /api/chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<AnswerSource>,
    #[serde(default)]
    pub query: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_json_shape() {
        let json = serde_json::to_string(&ChatMessage::user("hi")).unwrap();
        assert_eq!(json, r#"{"text":"hi","isUser":true}"#);

        let parsed: ChatMessage = serde_json::from_str(r#"{"text":"yo","isUser":false}"#).unwrap();
        assert_eq!(parsed, ChatMessage::bot("yo"));
    }

    #[test]
    fn test_source_names_are_distinct() {
        let source = |name: &str, idx| AnswerSource {
            filename: name.to_string(),
            chunk_index: Some(idx),
            score: 0.5,
        };
        let msg = ChatMessage::bot("answer").with_sources(vec![
            source("a.pdf", 0),
            source("b.pdf", 3),
            source("a.pdf", 1),
            source("", 2),
        ]);
        assert_eq!(msg.source_names(), vec!["a.pdf", "b.pdf"]);
    }

    #[test]
    fn test_chat_response_without_sources() {
        let resp: ChatResponse = serde_json::from_str(r#"{"answer":"42"}"#).unwrap();
        assert_eq!(resp.answer, "42");
        assert!(resp.sources.is_empty());
    }
}
