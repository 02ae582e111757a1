//! Per-stream accumulation buffer and dispatch
//!
//! A [`StreamBuf`] accumulates the bytes of one logical stream, renders the
//! prefix exactly once per message, detects newlines, tracks the
//! new-since-last-flush cursor, and dispatches partial or complete
//! [`Message`]s to the baked destinations.

use super::message::Message;
use super::prefix::Prefix;
use super::properties::MessageProperties;
use crate::dest::Destination;
use std::sync::Arc;

pub(crate) struct StreamBuf {
    buffer: Vec<u8>,
    prefix_len: usize,
    /// Bytes appended since the last dispatch; sinks use it to emit only
    /// the tail when the same stream continues its line.
    new_since_flush: usize,
    properties: MessageProperties,
    prefix: Arc<dyn Prefix>,
    destination: Destination,
    enabled: bool,
}

impl StreamBuf {
    pub(crate) fn new(
        properties: MessageProperties,
        prefix: Arc<dyn Prefix>,
        destination: Destination,
        enabled: bool,
    ) -> Self {
        Self {
            buffer: Vec::new(),
            prefix_len: 0,
            new_since_flush: 0,
            properties,
            prefix,
            destination,
            enabled,
        }
    }

    pub(crate) fn properties(&self) -> &MessageProperties {
        &self.properties
    }

    pub(crate) fn destination(&self) -> &Destination {
        &self.destination
    }

    pub(crate) fn prefix(&self) -> &Arc<dyn Prefix> {
        &self.prefix
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Append bytes, dispatching each completed line and, at the end of the
    /// call, whatever partial tail remains.
    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            if !self.enabled && self.buffer.ends_with(b"\n") {
                // A line completed while disabled is discarded once more
                // output arrives; only the freshest content survives to a
                // re-enable.
                self.abandon();
            }
            if self.buffer.is_empty() {
                self.start_message();
            }
            self.buffer.push(byte);
            self.new_since_flush += 1;
            if byte == b'\n' {
                self.flush_line();
            }
        }
        if !self.buffer.is_empty() {
            self.flush_partial();
        }
    }

    /// Render the prefix into the empty buffer; exactly one prefix per
    /// message.
    fn start_message(&mut self) {
        debug_assert!(self.buffer.is_empty());
        let rendered = self.prefix.render(&self.properties);
        self.buffer.extend_from_slice(rendered.as_bytes());
        self.prefix_len = self.buffer.len();
        self.new_since_flush = self.buffer.len();
    }

    /// Dispatch the unterminated buffer as a partial message. Keeps the
    /// buffer; resets the new-bytes cursor.
    pub(crate) fn flush_partial(&mut self) {
        if !self.enabled || self.buffer.is_empty() || self.buffer.ends_with(b"\n") {
            return;
        }
        self.dispatch(false);
    }

    /// The buffer holds a full line; dispatch it as complete and reset.
    /// While disabled the completed line is held in place, to be either
    /// flushed on re-enable or displaced by further output.
    fn flush_line(&mut self) {
        debug_assert!(self.buffer.ends_with(b"\n"));
        if !self.enabled {
            return;
        }
        self.dispatch(true);
        self.clear();
    }

    /// Finalize an incomplete message at teardown: append the cleanup
    /// marker and dispatch as complete. Runs regardless of the enabled
    /// flag so partial content is never silently dropped. A line that
    /// completed while disabled and was never re-enabled is discarded.
    pub(crate) fn finish(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        if self.buffer.ends_with(b"\n") {
            // Only reachable for a line held back while disabled.
            self.abandon();
            return;
        }
        let cleanup = self.properties.cleanup().to_string();
        self.buffer.extend_from_slice(cleanup.as_bytes());
        self.new_since_flush += cleanup.len();
        if !self.buffer.ends_with(b"\n") {
            self.buffer.push(b'\n');
            self.new_since_flush += 1;
        }
        self.dispatch(true);
        self.clear();
    }

    /// Flip the enabled flag. Setting the current value is a no-op;
    /// enabling flushes whatever accumulated while disabled.
    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        if enabled && !self.buffer.is_empty() {
            if self.buffer.ends_with(b"\n") {
                self.dispatch(true);
                self.clear();
            } else {
                self.dispatch(false);
            }
        }
    }

    /// Move the in-flight message state out, leaving this buffer idle.
    /// Used by partial-message duplication: the receiver becomes the one
    /// handle responsible for finalizing the logical message.
    pub(crate) fn take_message(&mut self) -> (Vec<u8>, usize, usize) {
        let buffer = std::mem::take(&mut self.buffer);
        let prefix_len = std::mem::replace(&mut self.prefix_len, 0);
        let new_since_flush = std::mem::replace(&mut self.new_since_flush, 0);
        (buffer, prefix_len, new_since_flush)
    }

    /// Give this buffer a fresh stream identity. After a duplication the
    /// moved-out message keeps the old identity, so the sink discipline
    /// treats this buffer's next message as a different logical stream.
    pub(crate) fn reassign_id(&mut self) {
        self.properties.stream_id = Some(super::properties::StreamId::next());
    }

    /// Install message state taken from another buffer.
    pub(crate) fn restore_message(&mut self, buffer: Vec<u8>, prefix_len: usize, cursor: usize) {
        debug_assert!(self.buffer.is_empty());
        self.buffer = buffer;
        self.prefix_len = prefix_len;
        self.new_since_flush = cursor;
    }

    fn dispatch(&mut self, complete: bool) {
        let baked = self.destination.bake(&self.properties, complete);
        for (sink, effective) in &baked {
            let msg = Message::new(&self.buffer, effective, complete);
            let result = sink.lock().emit(&msg, self.new_since_flush);
            if let Err(err) = result {
                let name = sink.lock().name().to_string();
                eprintln!("[MLOG ERROR] sink '{}' failed: {}", name, err);
            }
        }
        self.new_since_flush = 0;
    }

    fn clear(&mut self) {
        self.buffer.clear();
        self.prefix_len = 0;
        self.new_since_flush = 0;
    }

    /// Drop the current message without a complete dispatch. Filter
    /// decisions cached for it are released, and the buffer takes a fresh
    /// stream identity so a sink left mid-line by an earlier partial
    /// closes that line with the interruption marker instead of treating
    /// the next message as a continuation.
    fn abandon(&mut self) {
        self.destination.forget(self.properties.stream_id);
        self.clear();
        self.reassign_id();
    }
}

impl Drop for StreamBuf {
    fn drop(&mut self) {
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::importance::Importance;
    use crate::core::prefix::DefaultPrefix;
    use crate::core::properties::StreamId;
    use crate::sinks::{Sink, SinkWrite, WriterSink};
    use parking_lot::Mutex;
    use std::io::Write;
    use std::sync::Arc;

    #[derive(Clone)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn capture() -> (Destination, Arc<Mutex<Vec<u8>>>) {
        let bytes = Arc::new(Mutex::new(Vec::new()));
        let backend: Box<dyn SinkWrite> =
            Box::new(WriterSink::new(Box::new(SharedBuf(Arc::clone(&bytes))), "capture"));
        (Destination::sink(Sink::shared(backend)), bytes)
    }

    fn stream_buf(dest: Destination) -> StreamBuf {
        let props = MessageProperties::new()
            .with_facility_name("F")
            .with_importance(Importance::Info)
            .with_stream_id(StreamId::next());
        let prefix = DefaultPrefix::bare().with_facility(true).with_importance(true);
        StreamBuf::new(props, Arc::new(prefix), dest, true)
    }

    fn captured(bytes: &Arc<Mutex<Vec<u8>>>) -> String {
        String::from_utf8(bytes.lock().clone()).unwrap()
    }

    #[test]
    fn test_complete_line() {
        let (dest, bytes) = capture();
        let mut buf = stream_buf(dest);
        buf.write_bytes(b"hello\n");
        assert_eq!(captured(&bytes), "F[INFO ] hello\n");
    }

    #[test]
    fn test_partial_then_completion() {
        let (dest, bytes) = capture();
        let mut buf = stream_buf(dest);
        buf.write_bytes(b"ab");
        assert_eq!(captured(&bytes), "F[INFO ] ab");
        buf.write_bytes(b"cd\n");
        assert_eq!(captured(&bytes), "F[INFO ] abcd\n");
    }

    #[test]
    fn test_one_prefix_per_message() {
        let (dest, bytes) = capture();
        let mut buf = stream_buf(dest);
        buf.write_bytes(b"one\ntwo\n");
        assert_eq!(captured(&bytes), "F[INFO ] one\nF[INFO ] two\n");
    }

    #[test]
    fn test_char_at_a_time() {
        let (dest, bytes) = capture();
        let mut buf = stream_buf(dest);
        for byte in [b'a', b'b', b'c'] {
            buf.write_bytes(&[byte]);
        }
        assert_eq!(captured(&bytes), "F[INFO ] abc");
    }

    #[test]
    fn test_disabled_accumulates_and_flushes_on_enable() {
        let (dest, bytes) = capture();
        let mut buf = stream_buf(dest);
        buf.set_enabled(false);
        buf.write_bytes(b"hi");
        assert_eq!(captured(&bytes), "");
        buf.set_enabled(true);
        assert_eq!(captured(&bytes), "F[INFO ] hi");
    }

    #[test]
    fn test_disabled_complete_line_flushes_on_enable() {
        let (dest, bytes) = capture();
        let mut buf = stream_buf(dest);
        buf.set_enabled(false);
        buf.write_bytes(b"held\n");
        assert_eq!(captured(&bytes), "");
        buf.set_enabled(true);
        assert_eq!(captured(&bytes), "F[INFO ] held\n");
    }

    #[test]
    fn test_disabled_later_write_displaces_held_line() {
        let (dest, bytes) = capture();
        let mut buf = stream_buf(dest);
        buf.set_enabled(false);
        buf.write_bytes(b"old\n");
        buf.write_bytes(b"new");
        buf.set_enabled(true);
        assert_eq!(captured(&bytes), "F[INFO ] new");
    }

    #[test]
    fn test_displaced_held_line_starts_a_fresh_line() {
        let (dest, bytes) = capture();
        let mut buf = stream_buf(dest);
        // The sink is mid-line with this message's partial bytes.
        buf.write_bytes(b"ab");
        buf.set_enabled(false);
        buf.write_bytes(b"c\n");
        // Displacing the held line abandons the old message; the new one
        // carries a fresh identity, so the sink closes the open line
        // before the new prefix instead of splicing it mid-line.
        buf.write_bytes(b"d");
        buf.set_enabled(true);
        assert_eq!(captured(&bytes), "F[INFO ] ab\nF[INFO ] d");
    }

    #[test]
    fn test_abandoned_message_releases_filter_decision() {
        // Every 2nd message passes the filter. The abandoned first message
        // keeps its admit slot, and the post-enable message gets a fresh
        // decision rather than the stale cached one.
        let (inner, bytes) = capture();
        let mut buf = stream_buf(Destination::sequence(inner, 0, 2, 0));
        buf.write_bytes(b"ab");
        buf.set_enabled(false);
        buf.write_bytes(b"c\n");
        buf.write_bytes(b"dropped\n");
        buf.set_enabled(true);
        buf.write_bytes(b"kept\n");
        assert_eq!(captured(&bytes), "F[INFO ] ab\nF[INFO ] kept\n");
    }

    #[test]
    fn test_enable_idempotent() {
        let (dest, bytes) = capture();
        let mut buf = stream_buf(dest);
        buf.write_bytes(b"ab");
        let before = captured(&bytes);
        buf.set_enabled(true);
        buf.set_enabled(true);
        assert_eq!(captured(&bytes), before);
    }

    #[test]
    fn test_finish_appends_cleanup() {
        let (dest, bytes) = capture();
        {
            let mut buf = stream_buf(dest);
            buf.write_bytes(b"unfinished");
        }
        assert_eq!(captured(&bytes), "F[INFO ] unfinished\n");
    }

    #[test]
    fn test_finish_on_empty_buffer_is_silent() {
        let (dest, bytes) = capture();
        {
            let mut buf = stream_buf(dest);
            buf.write_bytes(b"done\n");
        }
        assert_eq!(captured(&bytes), "F[INFO ] done\n");
    }

    #[test]
    fn test_disabled_partial_finalizes_at_teardown() {
        let (dest, bytes) = capture();
        {
            let mut buf = stream_buf(dest);
            buf.set_enabled(false);
            buf.write_bytes(b"pending");
        }
        assert_eq!(captured(&bytes), "F[INFO ] pending\n");
    }

    #[test]
    fn test_disabled_held_line_discarded_at_teardown() {
        let (dest, bytes) = capture();
        {
            let mut buf = stream_buf(dest);
            buf.set_enabled(false);
            buf.write_bytes(b"held\n");
        }
        assert_eq!(captured(&bytes), "");
    }

    #[test]
    fn test_custom_cleanup_string() {
        let (dest, bytes) = capture();
        {
            let props = MessageProperties::new()
                .with_facility_name("F")
                .with_importance(Importance::Info)
                .with_stream_id(StreamId::next())
                .with_cleanup_string(" <unfinished>\n");
            let prefix = DefaultPrefix::bare().with_facility(true).with_importance(true);
            let mut buf = StreamBuf::new(props, Arc::new(prefix), dest, true);
            buf.write_bytes(b"oops");
        }
        assert_eq!(captured(&bytes), "F[INFO ] oops <unfinished>\n");
    }

    #[test]
    fn test_cleanup_string_with_interior_newline() {
        let (dest, bytes) = capture();
        {
            let props = MessageProperties::new()
                .with_facility_name("F")
                .with_importance(Importance::Info)
                .with_stream_id(StreamId::next())
                .with_cleanup_string(" <cut>\n(resumed elsewhere)\n");
            let prefix = DefaultPrefix::bare().with_facility(true).with_importance(true);
            let mut buf = StreamBuf::new(props, Arc::new(prefix), dest, true);
            buf.write_bytes(b"oops");
        }
        assert_eq!(captured(&bytes), "F[INFO ] oops <cut>\n(resumed elsewhere)\n");
    }
}
