//! Output sinks and the shared-line interleaving discipline
//!
//! A [`Sink`] owns one byte-oriented backend plus the bookkeeping that keeps
//! output readable when several logical streams share it: at most one stream
//! is mid-line at a time from the viewer's perspective. Backends implement
//! [`SinkWrite`]; the discipline itself lives in [`Sink::emit`].

#[cfg(unix)]
pub mod fd;
pub mod file;
pub mod null;
#[cfg(unix)]
pub mod syslog;
pub mod writer;

#[cfg(unix)]
pub use fd::FdSink;
pub use file::FileSink;
pub use null::NullSink;
#[cfg(unix)]
pub use syslog::SyslogSink;
pub use writer::WriterSink;

use crate::core::error::Result;
use crate::core::message::Message;
use crate::core::properties::{MessageProperties, StreamId, DEFAULT_INTERRUPTION};
use parking_lot::Mutex;
use std::sync::Arc;

/// Byte-oriented sink backend.
pub trait SinkWrite: Send {
    fn write_all(&mut self, bytes: &[u8]) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;

    /// Whole-line hook for backends that cannot express raw byte runs
    /// (e.g. syslog). Receives the complete line including its trailing
    /// newline plus the merged properties.
    fn write_line(&mut self, line: &[u8], _properties: &MessageProperties) -> Result<()> {
        self.write_all(line)
    }

    /// True for backends that only accept whole lines; such a sink is
    /// forced into buffered mode regardless of the `is_buffered` property.
    fn line_oriented(&self) -> bool {
        false
    }
}

/// A shared, lockable sink handle. Many streams and filter nodes may hold
/// references to the same sink.
pub type SharedSink = Arc<Mutex<Sink>>;

/// A sink front: one backend plus the line-sharing bookkeeping.
pub struct Sink {
    backend: Box<dyn SinkWrite>,
    /// Stream that produced the most recently emitted byte.
    last_stream: Option<StreamId>,
    /// Whether that byte was a newline.
    ended_with_newline: bool,
    /// Interruption marker of the stream currently mid-line, emitted to
    /// close its line when a different stream intrudes.
    interruption: String,
}

impl Sink {
    pub fn new(backend: Box<dyn SinkWrite>) -> Self {
        Self {
            backend,
            last_stream: None,
            ended_with_newline: true,
            interruption: DEFAULT_INTERRUPTION.to_string(),
        }
    }

    /// Wrap a backend into a shareable handle.
    pub fn shared(backend: Box<dyn SinkWrite>) -> SharedSink {
        Arc::new(Mutex::new(Sink::new(backend)))
    }

    pub fn name(&self) -> &str {
        self.backend.name()
    }

    /// Dispatch one (possibly partial) message.
    ///
    /// `new_len` is the length of the tail appended since the stream's last
    /// dispatch, so a continuing stream only re-emits what is new.
    pub fn emit(&mut self, msg: &Message<'_>, new_len: usize) -> Result<()> {
        if msg.buffer.is_empty() {
            return Ok(());
        }

        let buffered =
            msg.properties.is_buffered.unwrap_or(false) || self.backend.line_oriented();
        if buffered {
            return self.emit_buffered(msg);
        }

        let stream = msg.properties.stream_id;
        if self.ended_with_newline || self.last_stream.is_none() {
            // Fresh line: the whole buffer, prefix included.
            self.backend.write_all(msg.buffer)?;
            self.last_stream = stream;
        } else if self.last_stream == stream {
            // Same stream continuing its line: only the new tail.
            let tail_len = new_len.min(msg.buffer.len());
            self.backend
                .write_all(&msg.buffer[msg.buffer.len() - tail_len..])?;
        } else {
            // Another stream is mid-line: close its line with its own
            // interruption marker, then start fresh.
            let marker = std::mem::take(&mut self.interruption);
            self.backend.write_all(marker.as_bytes())?;
            self.backend.write_all(msg.buffer)?;
            self.last_stream = stream;
        }

        self.ended_with_newline = msg.ends_with_newline();
        self.interruption = msg.properties.interruption().to_string();
        self.backend.flush()?;
        Ok(())
    }

    /// Buffered mode: partials are held back entirely; a complete message
    /// is written atomically, with `line_termination` (when set) replacing
    /// the trailing newline.
    fn emit_buffered(&mut self, msg: &Message<'_>) -> Result<()> {
        if !msg.complete {
            return Ok(());
        }
        match msg.properties.line_termination.as_deref() {
            Some(term) => {
                let body = msg
                    .buffer
                    .strip_suffix(b"\n")
                    .unwrap_or(msg.buffer);
                let mut line = Vec::with_capacity(body.len() + term.len());
                line.extend_from_slice(body);
                line.extend_from_slice(term.as_bytes());
                self.backend.write_line(&line, msg.properties)?;
            }
            None => self.backend.write_line(msg.buffer, msg.properties)?,
        }
        self.last_stream = msg.properties.stream_id;
        self.ended_with_newline = true;
        self.backend.flush()?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.backend.flush()
    }
}
