//! User-facing stream handles
//!
//! A [`Stream`] is a cheap-clone handle over the shared per-stream buffer.
//! It accepts text, may be enabled or disabled, and can be duplicated into
//! a [`MessageHandle`] that carries an in-flight partial message to its
//! finish independently of further writes to the stream.

use super::importance::Importance;
use super::prefix::Prefix;
use super::properties::MessageProperties;
use super::stream_buf::StreamBuf;
use crate::dest::Destination;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// A text-accepting output object bound to a facility, an importance, and
/// a destination graph.
#[derive(Clone)]
pub struct Stream {
    inner: Arc<Mutex<StreamBuf>>,
}

impl Stream {
    pub fn new(
        properties: MessageProperties,
        prefix: Arc<dyn Prefix>,
        destination: Destination,
        enabled: bool,
    ) -> Self {
        Self {
            inner: Arc::new(Mutex::new(StreamBuf::new(
                properties,
                prefix,
                destination,
                enabled,
            ))),
        }
    }

    /// Append text. Complete lines dispatch immediately; a trailing
    /// unterminated tail dispatches as a partial message, so
    /// character-at-a-time output appears character at a time.
    pub fn write(&self, text: impl AsRef<str>) {
        self.inner.lock().write_bytes(text.as_ref().as_bytes());
    }

    /// Append a line: the text plus a newline.
    pub fn writeln(&self, text: impl AsRef<str>) {
        let mut lock = self.inner.lock();
        lock.write_bytes(text.as_ref().as_bytes());
        lock.write_bytes(b"\n");
    }

    pub fn write_fmt(&self, args: fmt::Arguments<'_>) {
        self.write(args.to_string());
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.lock().is_enabled()
    }

    /// Set the enabled flag. A no-op when the flag already has that value;
    /// enabling flushes content accumulated while disabled.
    pub fn set_enabled(&self, enabled: bool) {
        self.inner.lock().set_enabled(enabled);
    }

    pub fn enable(&self) {
        self.set_enabled(true);
    }

    pub fn disable(&self) {
        self.set_enabled(false);
    }

    /// Temporarily force the enabled flag; the returned guard restores the
    /// prior state when dropped.
    pub fn scoped_enable(&self, enabled: bool) -> EnableGuard {
        let prior = {
            let mut lock = self.inner.lock();
            let prior = lock.is_enabled();
            lock.set_enabled(enabled);
            prior
        };
        EnableGuard {
            stream: self.clone(),
            prior,
            armed: true,
        }
    }

    pub fn importance(&self) -> Option<Importance> {
        self.inner.lock().properties().importance
    }

    pub fn facility_name(&self) -> Option<String> {
        self.inner.lock().properties().facility_name.clone()
    }

    /// Duplicate the stream into an exclusive handle that carries the
    /// in-flight message. The current buffer state moves into the handle;
    /// this stream returns to idle and further writes to it start a new
    /// message. Exactly one owner finalizes a given logical message: the
    /// handle appends the cleanup marker when dropped mid-message.
    pub fn duplicate(&self) -> MessageHandle {
        let mut lock = self.inner.lock();
        let (buffer, prefix_len, cursor) = lock.take_message();
        let mut buf = StreamBuf::new(
            lock.properties().clone(),
            Arc::clone(lock.prefix()),
            lock.destination().clone(),
            lock.is_enabled(),
        );
        buf.restore_message(buffer, prefix_len, cursor);
        // The handle keeps the old identity; the stream's next message is
        // a different logical message as far as sinks are concerned.
        lock.reassign_id();
        MessageHandle { buf }
    }

    /// Two handles are the same stream iff they share the underlying
    /// buffer.
    pub fn same_stream(&self, other: &Stream) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Write for Stream {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.inner.lock().write_bytes(s.as_bytes());
        Ok(())
    }
}

impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lock = self.inner.lock();
        f.debug_struct("Stream")
            .field("facility", &lock.properties().facility_name)
            .field("importance", &lock.properties().importance)
            .field("enabled", &lock.is_enabled())
            .finish()
    }
}

/// An exclusive handle continuing one logical message, obtained from
/// [`Stream::duplicate`]. Dropping it finalizes the message with the
/// cleanup marker if no newline has arrived.
pub struct MessageHandle {
    buf: StreamBuf,
}

impl MessageHandle {
    pub fn write(&mut self, text: impl AsRef<str>) {
        self.buf.write_bytes(text.as_ref().as_bytes());
    }

    pub fn write_fmt(&mut self, args: fmt::Arguments<'_>) {
        self.write(args.to_string());
    }

    /// Finalize now instead of at drop.
    pub fn finish(mut self) {
        self.buf.finish();
    }
}

impl fmt::Write for MessageHandle {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buf.write_bytes(s.as_bytes());
        Ok(())
    }
}

/// RAII restoration of a stream's enabled flag, from
/// [`Stream::scoped_enable`].
pub struct EnableGuard {
    stream: Stream,
    prior: bool,
    armed: bool,
}

impl EnableGuard {
    /// Keep the forced state: the guard will not restore on drop.
    pub fn dismiss(&mut self) {
        self.armed = false;
    }
}

impl Drop for EnableGuard {
    fn drop(&mut self) {
        if self.armed {
            self.stream.set_enabled(self.prior);
        }
    }
}
