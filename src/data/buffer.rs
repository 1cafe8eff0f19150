//! Bounded buffers for command input and captured output.
//!
//! Both buffers have a hard upper bound and never grow past it. Output uses a
//! truncate-and-drop policy: an append keeps whatever fits and silently drops
//! the rest. Input rejects a keystroke whole if it would not fit.

/// Maximum length of a command line, in bytes.
pub const COMMAND_MAX_LEN: usize = 255;

/// Maximum number of captured output bytes kept per session.
pub const OUTPUT_MAX_LEN: usize = 1023;

/// Byte buffer with a fixed maximum length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedBuffer {
    bytes: Vec<u8>,
    max_len: usize,
    dropped: usize,
}

impl BoundedBuffer {
    pub fn new(max_len: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(max_len),
            max_len,
            dropped: 0,
        }
    }

    /// Buffer sized for captured command output.
    pub fn for_output() -> Self {
        Self::new(OUTPUT_MAX_LEN)
    }

    /// Append as much of `chunk` as fits. Returns the number of bytes kept.
    pub fn append(&mut self, chunk: &[u8]) -> usize {
        let kept = chunk.len().min(self.remaining());
        self.bytes.extend_from_slice(&chunk[..kept]);
        self.dropped += chunk.len() - kept;
        kept
    }

    /// Replace the contents, applying the same truncation as `append`.
    pub fn set(&mut self, contents: &[u8]) {
        self.clear();
        self.append(contents);
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
        self.dropped = 0;
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn remaining(&self) -> usize {
        self.max_len - self.bytes.len()
    }

    /// Bytes discarded since the last clear.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl Default for BoundedBuffer {
    fn default() -> Self {
        Self::for_output()
    }
}

/// Editable command text, bounded in bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    text: String,
}

impl CommandLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a character if it fits within `COMMAND_MAX_LEN`.
    pub fn push(&mut self, c: char) -> bool {
        if self.text.len() + c.len_utf8() > COMMAND_MAX_LEN {
            return false;
        }
        self.text.push(c);
        true
    }

    /// Push a whole string, or nothing if it would not fit.
    pub fn push_str(&mut self, s: &str) -> bool {
        if self.text.len() + s.len() > COMMAND_MAX_LEN {
            return false;
        }
        self.text.push_str(s);
        true
    }

    pub fn pop(&mut self) -> Option<char> {
        self.text.pop()
    }

    /// Take the current text, leaving the line empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }
}
