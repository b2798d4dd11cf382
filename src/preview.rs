//! Bounded line preview over a streamed body

/// Collects the first `limit` lines of a body fed in arbitrary chunks.
///
/// Lines end at `\n`; a trailing `\r` is dropped and invalid UTF-8 is
/// replaced. A final line without a terminator still counts once the body
/// ends.
#[derive(Debug)]
pub struct LinePreview {
    limit: usize,
    lines: Vec<String>,
    pending: Vec<u8>,
}

impl LinePreview {
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            lines: Vec::with_capacity(limit),
            pending: Vec::new(),
        }
    }

    /// Feed the next chunk. Returns `true` once the preview is full and no
    /// more input is needed.
    pub fn push(&mut self, chunk: &[u8]) -> bool {
        let mut rest = chunk;
        while !self.is_full() {
            match rest.iter().position(|&b| b == b'\n') {
                Some(end) => {
                    self.pending.extend_from_slice(&rest[..end]);
                    self.complete_line();
                    rest = &rest[end + 1..];
                }
                None => {
                    self.pending.extend_from_slice(rest);
                    break;
                }
            }
        }
        self.is_full()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.lines.len() >= self.limit
    }

    /// End of body: flush the unterminated tail, if any.
    #[must_use]
    pub fn finish(mut self) -> Vec<String> {
        if !self.is_full() && !self.pending.is_empty() {
            self.complete_line();
        }
        self.lines
    }

    /// Body broke off: keep only the lines that were fully received.
    #[must_use]
    pub fn into_partial(self) -> Vec<String> {
        self.lines
    }

    fn complete_line(&mut self) {
        if self.pending.last() == Some(&b'\r') {
            self.pending.pop();
        }
        self.lines
            .push(String::from_utf8_lossy(&self.pending).into_owned());
        self.pending.clear();
    }
}
