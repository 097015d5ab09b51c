use futures::StreamExt;

use dossier_core::{Error, HistoryWindow, Result, Transcript};
use dossier_protocol::{ArchiveQuery, Backend, LineEvent, StreamEvent};

/// Notice appended to the in-flight message when the transport fails.
/// Partial content already streamed stays in place above it.
pub const CONNECTION_ERROR_SUFFIX: &str = "\n\nSorry, I'm having trouble connecting to the archives right now.";

/// How a settled exchange ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failed,
}

/// Lifecycle of the current exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExchangePhase {
    /// No exchange submitted yet
    #[default]
    Idle,
    /// A request is in flight and events are being applied
    Streaming,
    /// The last exchange finished; a new one may begin
    Settled(Outcome),
}

/// Controller for one chat session.
///
/// Owns the transcript and the history window, and applies stream events
/// to the in-flight tail message strictly in arrival order. Exactly one
/// exchange may be streaming at a time; `begin_exchange` rejects
/// submissions with [`Error::Busy`] until the current one settles.
#[derive(Debug, Default)]
pub struct ChatSession {
    transcript: Transcript,
    history: HistoryWindow,
    phase: ExchangePhase,
    pending_input: Option<String>,
    last_backend_error: Option<String>,
}

impl ChatSession {
    pub fn new(retain: usize) -> Self {
        Self { history: HistoryWindow::new(retain), ..Default::default() }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn history(&self) -> &HistoryWindow {
        &self.history
    }

    pub fn phase(&self) -> ExchangePhase {
        self.phase
    }

    pub fn is_streaming(&self) -> bool {
        self.phase == ExchangePhase::Streaming
    }

    /// Most recent backend-reported error marker, if any arrived during
    /// the current or last exchange. Display policy is the caller's.
    pub fn last_backend_error(&self) -> Option<&str> {
        self.last_backend_error.as_deref()
    }

    /// Stage a new exchange: validate the input, append the user message
    /// and its empty archive placeholder in one update, and return the
    /// outbound query carrying the pre-exchange history snapshot.
    pub fn begin_exchange(&mut self, input: &str) -> Result<ArchiveQuery> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(Error::EmptyInput);
        }
        if self.is_streaming() {
            return Err(Error::Busy);
        }

        let query = ArchiveQuery::new(trimmed, self.history.snapshot());

        self.transcript.push_exchange(trimmed);
        self.pending_input = Some(trimmed.to_string());
        self.last_backend_error = None;
        self.phase = ExchangePhase::Streaming;

        Ok(query)
    }

    /// Apply one stream event to the in-flight message.
    ///
    /// Events arriving outside a streaming exchange are discarded; the
    /// tail message is only mutable while its request is in flight.
    pub fn apply_event(&mut self, event: StreamEvent) {
        if !self.is_streaming() {
            tracing::debug!("discarding stream event outside an exchange");
            return;
        }

        match event {
            StreamEvent::Line(LineEvent::Delta(text)) => {
                self.transcript.append_to_last(&text);
            }
            StreamEvent::Line(LineEvent::Stats(value)) => {
                if let Some(last) = self.transcript.last_mut() {
                    last.response_time = Some(value);
                }
            }
            StreamEvent::Line(LineEvent::Documents(documents)) => {
                if let Some(last) = self.transcript.last_mut() {
                    last.documents = Some(documents);
                }
            }
            StreamEvent::Line(LineEvent::BackendError(text)) => {
                tracing::warn!("archive reported an error: {}", text);
                self.last_backend_error = Some(text);
            }
            StreamEvent::TransportError(reason) => {
                tracing::warn!("transport failure mid-exchange: {}", reason);
                self.transcript.append_to_last(CONNECTION_ERROR_SUFFIX);
                self.pending_input = None;
                self.phase = ExchangePhase::Settled(Outcome::Failed);
            }
            StreamEvent::Done => {
                self.settle_success();
            }
        }
    }

    /// Drive one full exchange against a backend, invoking `observe` for
    /// every event before it is applied. Transport failures settle the
    /// exchange in-band and are not returned as errors.
    pub async fn run_exchange<B, F>(&mut self, backend: &B, input: &str, mut observe: F) -> Result<()>
    where
        B: Backend + ?Sized,
        F: FnMut(&StreamEvent),
    {
        let query = self.begin_exchange(input)?;

        let mut stream = match backend.stream_query(query).await {
            Ok(stream) => stream,
            Err(e) => {
                let event = StreamEvent::TransportError(e.to_string());
                observe(&event);
                self.apply_event(event);
                return Ok(());
            }
        };

        while let Some(event) = stream.next().await {
            observe(&event);
            self.apply_event(event);
            if !self.is_streaming() {
                break;
            }
        }

        // a stream that ran dry without a terminal event still settles
        if self.is_streaming() {
            self.apply_event(StreamEvent::Done);
        }

        Ok(())
    }

    fn settle_success(&mut self) {
        let assistant = self.transcript.last().map(|m| m.content.clone()).unwrap_or_default();
        if let Some(user) = self.pending_input.take() {
            self.history.record_exchange(&user, &assistant);
        }
        self.phase = ExchangePhase::Settled(Outcome::Success);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dossier_core::CitedDocument;
    use dossier_protocol::ScriptedBackend;

    fn streamed(session: &mut ChatSession, input: &str, events: Vec<StreamEvent>) {
        session.begin_exchange(input).unwrap();
        for event in events {
            session.apply_event(event);
        }
    }

    #[test]
    fn test_begin_exchange_appends_pair_atomically() {
        let mut session = ChatSession::default();
        let query = session.begin_exchange("  Who killed JFK?  ").unwrap();

        assert_eq!(query.text, "Who killed JFK?");
        assert!(query.chat_history.is_empty());
        assert_eq!(session.transcript().len(), 2);
        assert!(session.is_streaming());
    }

    #[test]
    fn test_empty_input_never_touches_transcript() {
        let mut session = ChatSession::default();

        assert!(matches!(session.begin_exchange(""), Err(Error::EmptyInput)));
        assert!(matches!(session.begin_exchange("   \t "), Err(Error::EmptyInput)));
        assert!(session.transcript().is_empty());
        assert_eq!(session.phase(), ExchangePhase::Idle);
    }

    #[test]
    fn test_second_submission_while_streaming_rejected() {
        let mut session = ChatSession::default();
        session.begin_exchange("first").unwrap();

        assert!(matches!(session.begin_exchange("second"), Err(Error::Busy)));
        assert_eq!(session.transcript().len(), 2);
    }

    #[test]
    fn test_reconciliation_of_full_stream() {
        let mut session = ChatSession::default();
        streamed(
            &mut session,
            "q",
            vec![
                StreamEvent::delta("Hello"),
                StreamEvent::stats("1.1s"),
                StreamEvent::documents(vec![CitedDocument::new("a.txt", "hi")]),
                StreamEvent::delta(" world"),
                StreamEvent::Done,
            ],
        );

        let last = session.transcript().last().unwrap();
        assert_eq!(last.content, "Hello world");
        assert_eq!(last.response_time.as_deref(), Some("1.1s"));
        assert_eq!(last.documents.as_ref().unwrap(), &[CitedDocument::new("a.txt", "hi")]);
        assert_eq!(session.phase(), ExchangePhase::Settled(Outcome::Success));
    }

    #[test]
    fn test_success_commits_history_turns() {
        let mut session = ChatSession::default();
        streamed(
            &mut session,
            "hello",
            vec![StreamEvent::delta("hi there"), StreamEvent::Done],
        );

        assert_eq!(session.history().turns(), &["USER: hello", "ASSISTANT: hi there"]);
    }

    #[test]
    fn test_transport_failure_preserves_partial_content() {
        let mut session = ChatSession::default();
        streamed(
            &mut session,
            "q",
            vec![
                StreamEvent::delta("Partial answer"),
                StreamEvent::TransportError("connection reset".to_string()),
            ],
        );

        let last = session.transcript().last().unwrap();
        assert_eq!(last.content, format!("Partial answer{}", CONNECTION_ERROR_SUFFIX));
        assert!(session.history().is_empty());
        assert_eq!(session.phase(), ExchangePhase::Settled(Outcome::Failed));
    }

    #[test]
    fn test_backend_error_marker_recorded_not_rendered() {
        let mut session = ChatSession::default();
        streamed(
            &mut session,
            "q",
            vec![
                StreamEvent::delta("answer"),
                StreamEvent::Line(LineEvent::BackendError("retrieval failed".to_string())),
                StreamEvent::Done,
            ],
        );

        assert_eq!(session.transcript().last().unwrap().content, "answer");
        assert_eq!(session.last_backend_error(), Some("retrieval failed"));
    }

    #[test]
    fn test_backend_error_cleared_on_next_exchange() {
        let mut session = ChatSession::default();
        streamed(
            &mut session,
            "q1",
            vec![
                StreamEvent::Line(LineEvent::BackendError("oops".to_string())),
                StreamEvent::Done,
            ],
        );
        assert!(session.last_backend_error().is_some());

        session.begin_exchange("q2").unwrap();
        assert!(session.last_backend_error().is_none());
    }

    #[test]
    fn test_history_snapshot_taken_before_append() {
        let mut session = ChatSession::default();
        streamed(&mut session, "first", vec![StreamEvent::delta("one"), StreamEvent::Done]);

        let query = session.begin_exchange("second").unwrap();
        assert_eq!(query.chat_history, vec!["USER: first", "ASSISTANT: one"]);
    }

    #[test]
    fn test_events_outside_exchange_discarded() {
        let mut session = ChatSession::default();
        session.apply_event(StreamEvent::delta("stray"));
        assert!(session.transcript().is_empty());

        streamed(&mut session, "q", vec![StreamEvent::delta("a"), StreamEvent::Done]);
        session.apply_event(StreamEvent::delta("late"));
        assert_eq!(session.transcript().last().unwrap().content, "a");
    }

    #[test]
    fn test_new_with_retain() {
        let mut session = ChatSession::new(2);
        for i in 0..3 {
            streamed(
                &mut session,
                &format!("q{}", i),
                vec![StreamEvent::delta("a"), StreamEvent::Done],
            );
        }

        assert_eq!(session.history().len(), 4);
        assert_eq!(session.history().turns()[0], "USER: q1");
    }

    #[tokio::test]
    async fn test_run_exchange_against_scripted_backend() {
        let backend = ScriptedBackend::single(vec![
            StreamEvent::delta("Hello"),
            StreamEvent::delta(" world"),
            StreamEvent::Done,
        ]);

        let mut session = ChatSession::default();
        let mut seen = 0;
        session
            .run_exchange(&backend, "q", |_| seen += 1)
            .await
            .unwrap();

        assert_eq!(seen, 3);
        assert_eq!(session.transcript().last().unwrap().content, "Hello world");
        assert_eq!(backend.recorded()[0].text, "q");
    }

    #[tokio::test]
    async fn test_run_exchange_settles_when_stream_runs_dry() {
        // script without a terminal Done event
        let backend = ScriptedBackend::single(vec![StreamEvent::delta("tail")]);

        let mut session = ChatSession::default();
        session.run_exchange(&backend, "q", |_| {}).await.unwrap();

        assert_eq!(session.phase(), ExchangePhase::Settled(Outcome::Success));
        assert_eq!(session.history().len(), 2);
    }

    #[tokio::test]
    async fn test_run_exchange_sends_history_window() {
        let backend = ScriptedBackend::new(vec![
            vec![StreamEvent::delta("one"), StreamEvent::Done],
            vec![StreamEvent::delta("two"), StreamEvent::Done],
        ]);

        let mut session = ChatSession::default();
        session.run_exchange(&backend, "first", |_| {}).await.unwrap();
        session.run_exchange(&backend, "second", |_| {}).await.unwrap();

        let recorded = backend.recorded();
        assert!(recorded[0].chat_history.is_empty());
        assert_eq!(recorded[1].chat_history, vec!["USER: first", "ASSISTANT: one"]);
    }
}
