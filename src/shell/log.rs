//! Append-only display log of the shell

/// Display hint for a line; the renderer decides what it looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Plain,
    Heading,
    Command,
    Notice,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub text: String,
    pub style: LineStyle,
}

impl LogLine {
    pub fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, LineStyle::Plain)
    }

    pub fn heading(text: impl Into<String>) -> Self {
        Self::new(text, LineStyle::Heading)
    }

    pub fn notice(text: impl Into<String>) -> Self {
        Self::new(text, LineStyle::Notice)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, LineStyle::Error)
    }
}

/// Lines are only ever appended, or all dropped at once by `clear`.
#[derive(Debug, Default)]
pub struct ShellLog {
    lines: Vec<LogLine>,
    clears: u64,
}

impl ShellLog {
    pub fn push(&mut self, line: LogLine) {
        self.lines.push(line);
    }

    /// Appends a command's output as one contiguous block.
    pub fn append_block(&mut self, block: Vec<LogLine>) {
        self.lines.extend(block);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.clears += 1;
    }

    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// How many times the log has been cleared; lets a renderer notice a
    /// reset even if the log has since grown back past its old length.
    pub fn clears(&self) -> u64 {
        self.clears
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.text.as_str())
    }
}
