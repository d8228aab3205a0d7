//! Terminal Emitter
//!
//! Human-readable rendering of [`QuillError`]s with optional ANSI colors.
//! Because Quill locates errors by line, the snippet shows the whole
//! offending source line rather than an underlined span.

use std::io::{self, Write};

use crate::QuillError;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const BOLD: &str = "\x1b[1m";
    pub const GUTTER: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// The program an error refers to.
#[derive(Clone, Copy, Debug)]
pub struct SourceFile<'a> {
    pub path: &'a str,
    pub text: &'a str,
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    error_count: usize,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn new(writer: W, colors: bool) -> Self {
        TerminalEmitter {
            writer,
            colors,
            error_count: 0,
        }
    }

    /// Number of errors emitted so far.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Consume the emitter and return its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Render one error:
    ///
    /// ```text
    /// error[E2001]: invalid type for field `x`
    ///   --> prog.quill:3
    ///    |
    ///  3 |   (field int x "hi")
    ///    |
    ///    = note: type error
    /// ```
    pub fn emit(&mut self, error: &QuillError, source: Option<SourceFile<'_>>) -> io::Result<()> {
        self.error_count += 1;

        self.write_colored("error", colors::ERROR)?;
        self.write_colored(&format!("[{}]", error.code), colors::BOLD)?;
        writeln!(self.writer, ": {}", error.message)?;

        if let Some(line) = error.line {
            let gutter_width = line.to_string().len();
            let pad = " ".repeat(gutter_width);
            match source {
                Some(file) => {
                    write!(self.writer, "{pad}")?;
                    self.write_colored("--> ", colors::GUTTER)?;
                    writeln!(self.writer, "{}:{line}", file.path)?;
                    if let Some(text) = file.text.lines().nth(line.index()) {
                        self.write_colored(&format!("{pad} |"), colors::GUTTER)?;
                        writeln!(self.writer)?;
                        self.write_colored(&format!("{line} |"), colors::GUTTER)?;
                        writeln!(self.writer, " {}", text.trim_end())?;
                        self.write_colored(&format!("{pad} |"), colors::GUTTER)?;
                        writeln!(self.writer)?;
                    }
                }
                None => {
                    write!(self.writer, "{pad}")?;
                    self.write_colored("--> ", colors::GUTTER)?;
                    writeln!(self.writer, "line {line}")?;
                }
            }
            write!(self.writer, "{pad} = ")?;
        } else {
            write!(self.writer, "  = ")?;
        }
        self.write_colored("note", colors::NOTE)?;
        writeln!(self.writer, ": {}", error.kind())?;
        writeln!(self.writer)
    }

    /// Final line after all errors have been emitted.
    pub fn emit_summary(&mut self) -> io::Result<()> {
        if self.error_count == 0 {
            return Ok(());
        }
        self.write_colored("error", colors::ERROR)?;
        if self.error_count == 1 {
            writeln!(self.writer, ": aborting due to previous error")
        } else {
            writeln!(
                self.writer,
                ": aborting due to {} previous errors",
                self.error_count
            )
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Write text with optional ANSI color codes.
    fn write_colored(&mut self, text: &str, color: &str) -> io::Result<()> {
        if self.colors {
            write!(self.writer, "{color}{text}{}", colors::RESET)
        } else {
            write!(self.writer, "{text}")
        }
    }
}

impl TerminalEmitter<io::Stderr> {
    /// Emitter writing to standard error.
    pub fn stderr(colors: bool) -> Self {
        TerminalEmitter::new(io::stderr(), colors)
    }
}

#[cfg(test)]
mod tests;
