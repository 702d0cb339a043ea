//! Dual-write output for rendered tree lines
//!
//! Every line goes to the primary writer (stdout in production) and, in the
//! same order, to an optional named sink. Lines are emitted immediately,
//! never buffered and copied afterwards.

use std::io::{self, Write};

struct Sink {
    writer: Box<dyn Write>,
    name: String,
}

/// Line-oriented writer backing the tree renderer.
pub struct TreeOutput<W: Write> {
    primary: W,
    sink: Option<Sink>,
}

impl TreeOutput<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TreeOutput<W> {
    pub fn new(primary: W) -> Self {
        Self {
            primary,
            sink: None,
        }
    }

    /// Duplicate all subsequent lines into `writer`, remembered as `name`
    /// for the trailing confirmation message.
    pub fn with_sink(mut self, writer: Box<dyn Write>, name: String) -> Self {
        self.sink = Some(Sink { writer, name });
        self
    }

    pub fn sink_name(&self) -> Option<&str> {
        self.sink.as_ref().map(|s| s.name.as_str())
    }

    /// Emit one line to the primary writer and the sink, in lockstep.
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.primary, "{}", text)?;
        if let Some(sink) = &mut self.sink {
            writeln!(sink.writer, "{}", text)?;
        }
        Ok(())
    }

    /// Emit a line to the primary writer only (status messages that should
    /// not appear in the analysis sink).
    pub fn primary_line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.primary, "{}", text)
    }
}
