//! Message value: accumulated bytes plus properties plus completion flag

use super::properties::MessageProperties;

/// One dispatch unit handed from a stream buffer to baked sinks.
///
/// Invariants: a complete buffer is empty or ends with a newline; a
/// partial buffer contains no newline at all. A complete buffer may
/// contain interior newlines when a multi-line cleanup marker was
/// appended at finalization.
#[derive(Debug, Clone)]
pub struct Message<'a> {
    pub buffer: &'a [u8],
    pub properties: &'a MessageProperties,
    pub complete: bool,
}

impl<'a> Message<'a> {
    pub fn new(buffer: &'a [u8], properties: &'a MessageProperties, complete: bool) -> Self {
        debug_assert!(
            !complete || buffer.is_empty() || buffer.ends_with(b"\n"),
            "complete message must end with a newline"
        );
        debug_assert!(
            complete || !buffer.contains(&b'\n'),
            "partial message must not contain a newline"
        );
        Self {
            buffer,
            properties,
            complete,
        }
    }

    pub fn ends_with_newline(&self) -> bool {
        self.buffer.ends_with(b"\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_message() {
        let props = MessageProperties::new();
        let msg = Message::new(b"hello\n", &props, true);
        assert!(msg.ends_with_newline());
        assert!(msg.complete);
    }

    #[test]
    fn test_complete_message_with_multiline_marker() {
        // A cleanup marker appended at finalization may itself span lines.
        let props = MessageProperties::new();
        let msg = Message::new(b"body <cut>\n(unfinished)\n", &props, true);
        assert!(msg.complete);
        assert!(msg.ends_with_newline());
    }

    #[test]
    fn test_partial_message() {
        let props = MessageProperties::new();
        let msg = Message::new(b"hel", &props, false);
        assert!(!msg.ends_with_newline());
        assert!(!msg.complete);
    }
}
