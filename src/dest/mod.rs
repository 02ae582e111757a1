//! Destination graphs: sinks, multiplexers, and limiting filters
//!
//! A [`Destination`] is a cheap-clone, reference-counted handle to a node
//! in an acyclic graph. Leaves wrap a [`SharedSink`]; internal nodes fan
//! out ([`Destination::multiplex`]) or drop messages
//! ([`Destination::sequence`], [`Destination::time_limit`]). Every node
//! carries property overrides merged child-over-parent while *baking*,
//! the walk that flattens the graph into `(sink, effective properties)`
//! pairs for one dispatch.

mod filters;

use crate::core::error::Result;
use crate::core::properties::{MessageProperties, StreamId};
use crate::sinks::{FileSink, NullSink, SharedSink, Sink, SinkWrite, WriterSink};
use filters::{SequenceState, TimeState};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// A shareable handle to a destination graph node.
#[derive(Clone)]
pub struct Destination {
    node: Arc<Node>,
}

struct Node {
    kind: NodeKind,
    overrides: MessageProperties,
}

enum NodeKind {
    Sink(SharedSink),
    Multiplex(Vec<Destination>),
    Sequence(Mutex<SequenceState>, Destination),
    Time(Mutex<TimeState>, Destination),
}

impl Destination {
    fn from_kind(kind: NodeKind) -> Self {
        Self {
            node: Arc::new(Node {
                kind,
                overrides: MessageProperties::default(),
            }),
        }
    }

    /// A leaf over an existing shared sink.
    pub fn sink(sink: SharedSink) -> Self {
        Self::from_kind(NodeKind::Sink(sink))
    }

    /// A leaf over any backend.
    pub fn backend(backend: Box<dyn SinkWrite>) -> Self {
        Self::sink(Sink::shared(backend))
    }

    /// A leaf appending to the file at `path`.
    pub fn file(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self::backend(Box::new(FileSink::new(path)?)))
    }

    /// A leaf over the process standard error stream.
    pub fn stderr() -> Self {
        Self::backend(Box::new(WriterSink::stderr()))
    }

    /// A leaf over the process standard output stream.
    pub fn stdout() -> Self {
        Self::backend(Box::new(WriterSink::stdout()))
    }

    /// A leaf that discards everything.
    pub fn null() -> Self {
        Self::backend(Box::new(NullSink::new()))
    }

    /// A leaf over a borrowed POSIX file descriptor.
    #[cfg(unix)]
    pub fn fd(fd: std::os::unix::io::RawFd) -> Self {
        Self::backend(Box::new(crate::sinks::FdSink::borrowed(fd)))
    }

    /// A leaf forwarding complete lines to syslog under `ident`.
    #[cfg(unix)]
    pub fn syslog(ident: &str, facility: libc::c_int) -> Self {
        Self::backend(Box::new(crate::sinks::SyslogSink::new(ident, facility)))
    }

    /// Fan out to several destinations.
    pub fn multiplex(children: Vec<Destination>) -> Self {
        Self::from_kind(NodeKind::Multiplex(children))
    }

    /// Forward message `i` (0-based) iff `i >= skip` and every `step`-th
    /// thereafter, up to `limit` forwarded in total (`limit == 0` means
    /// unlimited). Dropped messages simply do not appear in the baked
    /// list.
    pub fn sequence(child: Destination, skip: u64, step: u64, limit: u64) -> Self {
        Self::from_kind(NodeKind::Sequence(
            Mutex::new(SequenceState::new(skip, step, limit)),
            child,
        ))
    }

    /// Forward a message only if `min_interval` has elapsed since the last
    /// forwarded one.
    pub fn time_limit(child: Destination, min_interval: Duration) -> Self {
        Self::from_kind(NodeKind::Time(
            Mutex::new(TimeState::new(min_interval)),
            child,
        ))
    }

    /// Attach property overrides to this node; they merge over whatever
    /// the stream supplies at bake time.
    #[must_use]
    pub fn with_properties(mut self, overrides: MessageProperties) -> Self {
        match Arc::get_mut(&mut self.node) {
            Some(node) => {
                node.overrides = overrides;
                self
            }
            // Already shared: layer a pass-through node on top.
            None => Self {
                node: Arc::new(Node {
                    kind: NodeKind::Multiplex(vec![self]),
                    overrides,
                }),
            },
        }
    }

    /// Flatten this graph for one dispatch: merge overrides over
    /// `incoming` at each edge, apply filter decisions, and collect the
    /// reachable `(sink, effective properties)` pairs. `complete` marks
    /// the final dispatch of the current message, which retires filter
    /// decisions cached for it.
    pub fn bake(
        &self,
        incoming: &MessageProperties,
        complete: bool,
    ) -> Vec<(SharedSink, MessageProperties)> {
        let mut out = Vec::new();
        self.bake_into(incoming, complete, &mut out);
        out
    }

    /// Release any filter decisions cached for `stream` throughout the
    /// graph, without advancing the filter counters. Streams call this
    /// when a message that may have been partially dispatched is
    /// abandoned before a complete dispatch; without it an abandoned
    /// message's decision would linger in the filter state forever.
    pub fn forget(&self, stream: Option<StreamId>) {
        match &self.node.kind {
            NodeKind::Sink(_) => {}
            NodeKind::Multiplex(children) => {
                for child in children {
                    child.forget(stream);
                }
            }
            NodeKind::Sequence(state, child) => {
                state.lock().forget(stream);
                child.forget(stream);
            }
            NodeKind::Time(state, child) => {
                state.lock().forget(stream);
                child.forget(stream);
            }
        }
    }

    fn bake_into(
        &self,
        incoming: &MessageProperties,
        complete: bool,
        out: &mut Vec<(SharedSink, MessageProperties)>,
    ) {
        let merged = self.node.overrides.merge_over(incoming);
        match &self.node.kind {
            NodeKind::Sink(sink) => out.push((Arc::clone(sink), merged)),
            NodeKind::Multiplex(children) => {
                for child in children {
                    child.bake_into(&merged, complete, out);
                }
            }
            NodeKind::Sequence(state, child) => {
                if state.lock().admit(merged.stream_id, complete) {
                    child.bake_into(&merged, complete, out);
                }
            }
            NodeKind::Time(state, child) => {
                if state.lock().admit(merged.stream_id, complete) {
                    child.bake_into(&merged, complete, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::importance::Importance;
    use crate::core::properties::StreamId;

    fn incoming() -> MessageProperties {
        MessageProperties::new()
            .with_facility_name("F")
            .with_importance(Importance::Info)
            .with_stream_id(StreamId::next())
    }

    #[test]
    fn test_sink_leaf_bakes_single_pair() {
        let dest = Destination::null();
        let baked = dest.bake(&incoming(), true);
        assert_eq!(baked.len(), 1);
        assert_eq!(baked[0].1.facility_name.as_deref(), Some("F"));
    }

    #[test]
    fn test_overrides_merge_over_incoming() {
        let dest = Destination::null()
            .with_properties(MessageProperties::new().with_facility_name("other"));
        let baked = dest.bake(&incoming(), true);
        assert_eq!(baked[0].1.facility_name.as_deref(), Some("other"));
        assert_eq!(baked[0].1.importance, Some(Importance::Info));
    }

    #[test]
    fn test_multiplex_concatenates_children() {
        let dest = Destination::multiplex(vec![
            Destination::null(),
            Destination::null(),
            Destination::null(),
        ]);
        assert_eq!(dest.bake(&incoming(), true).len(), 3);
    }

    #[test]
    fn test_sequence_drops_silently() {
        // Forward every 2nd message.
        let dest = Destination::sequence(Destination::null(), 0, 2, 0);
        assert_eq!(dest.bake(&incoming(), true).len(), 1);
        assert_eq!(dest.bake(&incoming(), true).len(), 0);
        assert_eq!(dest.bake(&incoming(), true).len(), 1);
    }

    #[test]
    fn test_sequence_limit() {
        let dest = Destination::sequence(Destination::null(), 0, 1, 2);
        assert_eq!(dest.bake(&incoming(), true).len(), 1);
        assert_eq!(dest.bake(&incoming(), true).len(), 1);
        assert_eq!(dest.bake(&incoming(), true).len(), 0);
    }

    #[test]
    fn test_time_limit_gates_by_interval() {
        let dest = Destination::time_limit(Destination::null(), Duration::from_secs(3600));
        assert_eq!(dest.bake(&incoming(), true).len(), 1);
        assert_eq!(dest.bake(&incoming(), true).len(), 0);
    }

    #[test]
    fn test_forget_releases_inflight_decision() {
        // Every 2nd message passes. A partial dispatch of message 0 caches
        // an admit; forgetting the stream must retire that entry so the
        // next message gets a fresh decision instead of the stale one.
        let dest = Destination::sequence(Destination::null(), 0, 2, 0);
        let id = StreamId::next();
        let props = MessageProperties::new().with_stream_id(id);

        assert_eq!(dest.bake(&props, false).len(), 1);
        dest.forget(Some(id));
        assert_eq!(dest.bake(&props, true).len(), 0);
    }

    #[test]
    fn test_shared_node_keeps_filter_state() {
        let filtered = Destination::sequence(Destination::null(), 0, 1, 1);
        let alias = filtered.clone();
        assert_eq!(filtered.bake(&incoming(), true).len(), 1);
        // The reference-counted state is shared: the alias sees the limit.
        assert_eq!(alias.bake(&incoming(), true).len(), 0);
    }

    #[test]
    fn test_time_then_sequence_composition() {
        let dest = Destination::time_limit(
            Destination::sequence(Destination::null(), 0, 1, 3),
            Duration::ZERO,
        );
        let forwarded: usize = (0..10)
            .map(|_| dest.bake(&incoming(), true).len())
            .sum();
        assert_eq!(forwarded, 3);
    }
}
