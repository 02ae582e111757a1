//! Message-dropping filter state: sequence and time limiting
//!
//! Filter decisions are made once per logical message, keyed by the
//! originating stream, so every partial dispatch of a message shares the
//! fate of its first dispatch and a message is kept or dropped atomically.

use crate::core::properties::StreamId;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Counter state for a sequence limiter: forward message `i` (0-based)
/// iff `i >= skip`, `(i - skip) % step == 0`, and fewer than `limit`
/// messages have been forwarded (`limit == 0` means unlimited).
#[derive(Debug)]
pub(crate) struct SequenceState {
    skip: u64,
    step: u64,
    limit: u64,
    seen: u64,
    forwarded: u64,
    inflight: HashMap<StreamId, bool>,
}

impl SequenceState {
    pub(crate) fn new(skip: u64, step: u64, limit: u64) -> Self {
        Self {
            skip,
            step: step.max(1),
            limit,
            seen: 0,
            forwarded: 0,
            inflight: HashMap::new(),
        }
    }

    /// Decide whether the current dispatch passes. `complete` marks the
    /// final dispatch of the message, after which its cached decision is
    /// retired.
    pub(crate) fn admit(&mut self, stream: Option<StreamId>, complete: bool) -> bool {
        let decision = match stream {
            Some(id) => match self.inflight.get(&id).copied() {
                Some(cached) => {
                    if complete {
                        self.inflight.remove(&id);
                    }
                    return cached;
                }
                None => {
                    let fresh = self.decide();
                    if !complete {
                        self.inflight.insert(id, fresh);
                    }
                    fresh
                }
            },
            None => self.decide(),
        };
        decision
    }

    /// Release the decision cached for `stream` without touching the
    /// counters. Called when a message is abandoned before its complete
    /// dispatch; the message stays counted, only the cache entry goes.
    pub(crate) fn forget(&mut self, stream: Option<StreamId>) {
        if let Some(id) = stream {
            self.inflight.remove(&id);
        }
    }

    fn decide(&mut self) -> bool {
        let index = self.seen;
        self.seen += 1;
        let pass = index >= self.skip
            && (index - self.skip) % self.step == 0
            && (self.limit == 0 || self.forwarded < self.limit);
        if pass {
            self.forwarded += 1;
        }
        pass
    }
}

/// Interval state for a time limiter: forward only if `min_interval` has
/// elapsed since the last forward. The first message always passes.
#[derive(Debug)]
pub(crate) struct TimeState {
    min_interval: Duration,
    last_forward: Option<Instant>,
    inflight: HashMap<StreamId, bool>,
}

impl TimeState {
    pub(crate) fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_forward: None,
            inflight: HashMap::new(),
        }
    }

    pub(crate) fn admit(&mut self, stream: Option<StreamId>, complete: bool) -> bool {
        match stream {
            Some(id) => match self.inflight.get(&id).copied() {
                Some(cached) => {
                    if complete {
                        self.inflight.remove(&id);
                    }
                    cached
                }
                None => {
                    let fresh = self.decide();
                    if !complete {
                        self.inflight.insert(id, fresh);
                    }
                    fresh
                }
            },
            None => self.decide(),
        }
    }

    /// Release the decision cached for `stream` without touching the
    /// interval state.
    pub(crate) fn forget(&mut self, stream: Option<StreamId>) {
        if let Some(id) = stream {
            self.inflight.remove(&id);
        }
    }

    fn decide(&mut self) -> bool {
        let now = Instant::now();
        let pass = match self.last_forward {
            None => true,
            Some(last) => now.duration_since(last) >= self.min_interval,
        };
        if pass {
            self.last_forward = Some(now);
        }
        pass
    }
}
