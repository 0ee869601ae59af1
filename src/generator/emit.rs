//! Typed source emission.
//!
//! Generators never concatenate templates; they drive a [`CodeWriter`] that
//! owns indentation and line structure, and hand back [`GeneratedFile`]
//! values. Files exist only in memory until the pipeline's write phase.

use std::path::PathBuf;

/// A rendered output file: relative path plus full contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

impl GeneratedFile {
    pub fn new(path: impl Into<PathBuf>, contents: String) -> Self {
        GeneratedFile {
            path: path.into(),
            contents,
        }
    }
}

/// Line-oriented builder with indentation tracking.
#[derive(Debug)]
pub struct CodeWriter {
    out: String,
    depth: usize,
    tab: &'static str,
}

impl CodeWriter {
    pub fn new() -> Self {
        CodeWriter {
            out: String::new(),
            depth: 0,
            tab: "  ",
        }
    }

    /// Emit one line at the current indent level.
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if text.is_empty() {
            self.out.push('\n');
            return self;
        }
        for _ in 0..self.depth {
            self.out.push_str(self.tab);
        }
        self.out.push_str(text);
        self.out.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.out.push('\n');
        self
    }

    /// Emit an opening line and indent the lines that follow.
    pub fn open(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.line(text);
        self.depth += 1;
        self
    }

    /// Dedent and emit a closing line.
    pub fn close(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self.line(text);
        self
    }

    /// Raise the indent level without emitting a line. Pairs with [`close`]
    /// for constructs like `} catch (err) {` that close and reopen a block
    /// on one line.
    ///
    /// [`close`]: CodeWriter::close
    pub fn indent(&mut self) -> &mut Self {
        self.depth += 1;
        self
    }

    pub fn finish(self) -> String {
        self.out
    }
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Standard header comment for generated `.ts` files.
pub fn ts_header(writer: &mut CodeWriter) {
    writer.line("// Generated by frontsync. Do not edit by hand; regenerate instead.");
    writer.blank();
}
