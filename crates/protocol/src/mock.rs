use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use dossier_core::Result;

use crate::client::{Backend, EventStream};
use crate::types::{ArchiveQuery, StreamEvent};

/// Scripted backend for deterministic testing without a network.
///
/// Each call to [`Backend::stream_query`] replays the next script in
/// order and records the query it was given. A call past the last script
/// replays an immediate transport error.
pub struct ScriptedBackend {
    scripts: Vec<Vec<StreamEvent>>,
    current: AtomicUsize,
    recorded: Mutex<Vec<ArchiveQuery>>,
}

impl ScriptedBackend {
    pub fn new(scripts: Vec<Vec<StreamEvent>>) -> Self {
        Self { scripts, current: AtomicUsize::new(0), recorded: Mutex::new(Vec::new()) }
    }

    /// Backend that replays one script
    pub fn single(events: Vec<StreamEvent>) -> Self {
        Self::new(vec![events])
    }

    /// Queries received so far, in arrival order
    pub fn recorded(&self) -> Vec<ArchiveQuery> {
        self.recorded.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Backend for ScriptedBackend {
    async fn stream_query(&self, query: ArchiveQuery) -> Result<EventStream> {
        self.recorded.lock().unwrap().push(query);

        let index = self.current.fetch_add(1, Ordering::SeqCst);
        let events = self
            .scripts
            .get(index)
            .cloned()
            .unwrap_or_else(|| vec![StreamEvent::TransportError("no scripted response".to_string())]);

        Ok(Box::pin(tokio_stream::iter(events)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_scripted_backend_replays_events() {
        let backend = ScriptedBackend::single(vec![
            StreamEvent::delta("Hello"),
            StreamEvent::stats("1.1s"),
            StreamEvent::Done,
        ]);

        let mut stream = backend
            .stream_query(ArchiveQuery::new("q", vec![]))
            .await
            .unwrap();

        let mut events = Vec::new();
        while let Some(event) = stream.next().await {
            events.push(event);
        }

        assert_eq!(events.len(), 3);
        assert_eq!(events[0], StreamEvent::delta("Hello"));
        assert_eq!(events[2], StreamEvent::Done);
    }

    #[tokio::test]
    async fn test_scripted_backend_records_queries() {
        let backend = ScriptedBackend::new(vec![vec![StreamEvent::Done], vec![StreamEvent::Done]]);

        backend
            .stream_query(ArchiveQuery::new("first", vec!["USER: hi".to_string()]))
            .await
            .unwrap();
        backend
            .stream_query(ArchiveQuery::new("second", vec![]))
            .await
            .unwrap();

        let recorded = backend.recorded();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].text, "first");
        assert_eq!(recorded[0].chat_history, vec!["USER: hi".to_string()]);
        assert_eq!(recorded[1].text, "second");
    }

    #[tokio::test]
    async fn test_exhausted_scripts_replay_transport_error() {
        let backend = ScriptedBackend::new(vec![]);
        let mut stream = backend
            .stream_query(ArchiveQuery::new("q", vec![]))
            .await
            .unwrap();

        let event = stream.next().await.unwrap();
        assert!(matches!(event, StreamEvent::TransportError(_)));
    }
}
