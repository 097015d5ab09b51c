/// Incremental newline splitter over a stream of byte chunks.
///
/// The transport delivers arbitrary fragments; a line (or a UTF-8 code
/// point) may be split across any chunk boundary. Complete lines are
/// decoded lossily; the unfinished tail stays buffered as raw bytes so
/// decoding never happens mid code point. Not restartable; one decoder
/// per response body.
#[derive(Debug, Default)]
pub struct LineDecoder {
    pending: Vec<u8>,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk, returning every line completed by it.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let mut line_bytes: Vec<u8> = self.pending.drain(..=pos).collect();
            line_bytes.pop();
            if line_bytes.last() == Some(&b'\r') {
                line_bytes.pop();
            }
            lines.push(String::from_utf8_lossy(&line_bytes).into_owned());
        }
        lines
    }

    /// Flush the trailing fragment when the stream ends without a final
    /// newline. Returns None if nothing is buffered.
    pub fn finish(self) -> Option<String> {
        if self.pending.is_empty() {
            None
        } else {
            Some(String::from_utf8_lossy(&self.pending).into_owned())
        }
    }
}
