//! Wrapping captured output into the fixed display grid.

use std::borrow::Cow;

/// Number of lines in the output grid.
pub const WRAP_ROWS: usize = 17;

/// Maximum bytes per wrapped line.
pub const WRAP_COLS: usize = 150;

/// Captured output laid out as exactly `WRAP_ROWS` lines of at most
/// `WRAP_COLS` bytes each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedOutput {
    lines: Vec<Vec<u8>>,
}

impl WrappedOutput {
    /// An all-empty grid.
    pub fn empty() -> Self {
        Self {
            lines: vec![Vec::with_capacity(WRAP_COLS); WRAP_ROWS],
        }
    }

    pub fn lines(&self) -> &[Vec<u8>] {
        &self.lines
    }

    /// Line `index` as text, with invalid UTF-8 replaced.
    pub fn line(&self, index: usize) -> Cow<'_, str> {
        self.lines
            .get(index)
            .map(|l| String::from_utf8_lossy(l))
            .unwrap_or(Cow::Borrowed(""))
    }
}

impl Default for WrappedOutput {
    fn default() -> Self {
        Self::empty()
    }
}

/// Lay `raw` out into a fresh grid.
pub fn wrap_output(raw: &[u8]) -> WrappedOutput {
    let mut grid = WrappedOutput::empty();
    wrap_into(raw, &mut grid);
    grid
}

/// Lay `raw` out into `grid`, clearing every line first.
///
/// A line ends when it holds `WRAP_COLS` bytes or at `\n`, which is consumed.
/// A newline arriving exactly when a line is full ends that line only once.
/// Input past the last line is dropped.
pub fn wrap_into(raw: &[u8], grid: &mut WrappedOutput) {
    grid.lines.resize_with(WRAP_ROWS, Vec::new);
    for line in grid.lines.iter_mut() {
        line.clear();
    }

    let mut row = 0;
    let mut bytes = raw.iter().copied().peekable();
    while let Some(&byte) = bytes.peek() {
        if row >= WRAP_ROWS {
            break;
        }
        if grid.lines[row].len() == WRAP_COLS || byte == b'\n' {
            row += 1;
            if byte == b'\n' {
                bytes.next();
            }
            continue;
        }
        grid.lines[row].push(byte);
        bytes.next();
    }
}
