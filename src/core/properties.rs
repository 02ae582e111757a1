//! Per-message property bag and stream identity

use super::color::ColorSpec;
use super::importance::Importance;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-unique identifier of a logical stream.
///
/// Sinks use this to tell whether consecutive bytes came from the same
/// logical message, which drives the line-sharing discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamId(u64);

static NEXT_STREAM_ID: AtomicU64 = AtomicU64::new(1);

impl StreamId {
    /// Allocate a fresh process-unique id.
    pub fn next() -> Self {
        StreamId(NEXT_STREAM_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// The property bag carried with each message.
///
/// Every field is independently optional. Properties flow from Stream
/// through Destination nodes to Sinks, merging child-over-parent at each
/// edge (see [`merge_over`](Self::merge_over)).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageProperties {
    /// Facility name shown in the prefix.
    pub facility_name: Option<String>,
    /// Importance level of the message.
    pub importance: Option<Importance>,
    /// Effective color attributes for the prefix.
    pub color: Option<ColorSpec>,
    /// Whether to emit ANSI escapes at all.
    pub use_color: Option<bool>,
    /// Text emitted to close another stream's unterminated line before this
    /// stream's output intrudes. Defaults to a newline when unset.
    pub interruption_string: Option<String>,
    /// Text appended to finalize an unterminated message at teardown.
    /// Defaults to a newline when unset.
    pub cleanup_string: Option<String>,
    /// Final separator appended by buffered sinks after a complete line.
    pub line_termination: Option<String>,
    /// Whether the sink buffers until a newline and emits atomically.
    pub is_buffered: Option<bool>,
    /// Identity of the originating stream.
    pub stream_id: Option<StreamId>,
}

pub const DEFAULT_INTERRUPTION: &str = "\n";
pub const DEFAULT_CLEANUP: &str = "\n";

impl MessageProperties {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_facility_name(mut self, name: impl Into<String>) -> Self {
        self.facility_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_importance(mut self, importance: Importance) -> Self {
        self.importance = Some(importance);
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: ColorSpec) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_use_color(mut self, use_color: bool) -> Self {
        self.use_color = Some(use_color);
        self
    }

    #[must_use]
    pub fn with_interruption_string(mut self, s: impl Into<String>) -> Self {
        self.interruption_string = Some(s.into());
        self
    }

    #[must_use]
    pub fn with_cleanup_string(mut self, s: impl Into<String>) -> Self {
        self.cleanup_string = Some(s.into());
        self
    }

    #[must_use]
    pub fn with_line_termination(mut self, s: impl Into<String>) -> Self {
        self.line_termination = Some(s.into());
        self
    }

    #[must_use]
    pub fn with_buffered(mut self, buffered: bool) -> Self {
        self.is_buffered = Some(buffered);
        self
    }

    #[must_use]
    pub fn with_stream_id(mut self, id: StreamId) -> Self {
        self.stream_id = Some(id);
        self
    }

    /// Merge `self` (the child) over `parent`: a set field on the child
    /// wins, an unset one inherits the parent's.
    pub fn merge_over(&self, parent: &MessageProperties) -> MessageProperties {
        fn pick<T: Clone>(child: &Option<T>, parent: &Option<T>) -> Option<T> {
            child.as_ref().or(parent.as_ref()).cloned()
        }
        MessageProperties {
            facility_name: pick(&self.facility_name, &parent.facility_name),
            importance: pick(&self.importance, &parent.importance),
            color: pick(&self.color, &parent.color),
            use_color: pick(&self.use_color, &parent.use_color),
            interruption_string: pick(&self.interruption_string, &parent.interruption_string),
            cleanup_string: pick(&self.cleanup_string, &parent.cleanup_string),
            line_termination: pick(&self.line_termination, &parent.line_termination),
            is_buffered: pick(&self.is_buffered, &parent.is_buffered),
            stream_id: pick(&self.stream_id, &parent.stream_id),
        }
    }

    /// The interruption marker in effect, defaulted to a newline.
    pub fn interruption(&self) -> &str {
        self.interruption_string
            .as_deref()
            .unwrap_or(DEFAULT_INTERRUPTION)
    }

    /// The cleanup marker in effect, defaulted to a newline.
    pub fn cleanup(&self) -> &str {
        self.cleanup_string.as_deref().unwrap_or(DEFAULT_CLEANUP)
    }
}
