use serde::{Deserialize, Serialize};

/// Who authored a transcript message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Archive,
}

/// A document cited by an archive response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitedDocument {
    pub path: String,
    pub text: String,
}

impl CitedDocument {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self { path: path.into(), text: text.into() }
    }
}

/// One turn in the conversation transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub content: String,
    pub author: Author,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<CitedDocument>>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self { content: content.into(), author: Author::User, response_time: None, documents: None }
    }

    /// An empty archive message, filled in as deltas stream in
    pub fn archive_placeholder() -> Self {
        Self { content: String::new(), author: Author::Archive, response_time: None, documents: None }
    }

    pub fn is_archive(&self) -> bool {
        self.author == Author::Archive
    }

    pub fn has_documents(&self) -> bool {
        self.documents.as_ref().map(|docs| !docs.is_empty()).unwrap_or(false)
    }
}

/// Ordered, append-only conversation transcript.
///
/// Only the last message may be mutated, and only through the accessors
/// here; callers get shared access to everything else. This keeps the
/// "append-only except the in-flight tail" rule in one place.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
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

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Append a user message paired with its empty archive placeholder.
    ///
    /// The pair lands in one call so observers never see a user message
    /// without its in-flight response slot.
    pub fn push_exchange(&mut self, input: impl Into<String>) {
        self.messages.push(Message::user(input));
        self.messages.push(Message::archive_placeholder());
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Mutable access to the in-flight tail message
    pub fn last_mut(&mut self) -> Option<&mut Message> {
        self.messages.last_mut()
    }

    /// Append a content delta to the tail message
    pub fn append_to_last(&mut self, delta: &str) {
        if let Some(last) = self.messages.last_mut() {
            last.content.push_str(delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let user = Message::user("Who killed JFK?");
        assert_eq!(user.author, Author::User);
        assert_eq!(user.content, "Who killed JFK?");
        assert!(user.response_time.is_none());

        let bot = Message::archive_placeholder();
        assert!(bot.is_archive());
        assert!(bot.content.is_empty());
        assert!(!bot.has_documents());
    }

    #[test]
    fn test_push_exchange_pairs_messages() {
        let mut transcript = Transcript::new();
        transcript.push_exchange("hello");

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.messages()[0].author, Author::User);
        assert_eq!(transcript.messages()[0].content, "hello");
        assert!(transcript.messages()[1].is_archive());
        assert!(transcript.messages()[1].content.is_empty());
    }

    #[test]
    fn test_append_to_last_grows_content() {
        let mut transcript = Transcript::new();
        transcript.push_exchange("q");
        transcript.append_to_last("Hello");
        transcript.append_to_last(" world");

        assert_eq!(transcript.last().unwrap().content, "Hello world");
        assert_eq!(transcript.messages()[0].content, "q");
    }

    #[test]
    fn test_append_to_empty_transcript_is_noop() {
        let mut transcript = Transcript::new();
        transcript.append_to_last("orphan");
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_has_documents() {
        let mut msg = Message::archive_placeholder();
        assert!(!msg.has_documents());

        msg.documents = Some(vec![]);
        assert!(!msg.has_documents());

        msg.documents = Some(vec![CitedDocument::new("a.txt", "hi")]);
        assert!(msg.has_documents());
    }

    #[test]
    fn test_message_serialization_skips_empty_annotations() {
        let msg = Message::user("hi");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(!json.contains("response_time"));
        assert!(!json.contains("documents"));
    }
}
