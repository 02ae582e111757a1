//! # mlog
//!
//! Diagnostic message streams partitioned into named facilities, cross-cut
//! by seven ordered importance levels, routed through reference-counted
//! destination graphs of filters and sinks.
//!
//! ## Features
//!
//! - **Shared-line discipline**: streams sharing a sink never collide
//!   mid-line; interruption markers close another stream's partial line
//! - **Partial messages**: progressive output without committing a full
//!   line, with duplicate handles carrying a message to its finish
//! - **Destination graphs**: multiplexers, sequence limiters, and time
//!   limiters over file, fd, writer, syslog, and null sinks
//! - **Control language**: runtime bulk enable/disable such as
//!   `none, >=info` or `debug, main.third(!debug)`
//!
//! ## Quick start
//!
//! ```
//! use mlog::prelude::*;
//!
//! let fac = Facility::with_destination("demo", Destination::null());
//! fac.info().writeln("hello");
//!
//! let mut registry = FacilityRegistry::new("example");
//! registry.insert(fac).unwrap();
//! registry.control("none, >=warn").unwrap();
//! ```

pub mod core;
pub mod dest;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Color, ColorSet, ColorSpec, DefaultPrefix, EnableGuard, Facility, FacilityBuilder,
        FacilityRegistry, Importance, Message, MessageHandle, MessageProperties, MlogError,
        Prefix, Result, Stream, StreamId, IMPORTANCE_COUNT,
    };
    pub use crate::dest::Destination;
    pub use crate::sinks::{FileSink, NullSink, SharedSink, Sink, SinkWrite, WriterSink};
}

pub use crate::core::globals::{
    control, default_destination, default_use_color, epoch, facility, initialize, program_name,
    register, register_adjusted, registry, stream,
};
pub use crate::core::{
    Color, ColorSet, ColorSpec, DefaultPrefix, EnableGuard, Facility, FacilityBuilder,
    FacilityRegistry, Importance, Message, MessageHandle, MessageProperties, MlogError, Prefix,
    Result, Stream, StreamId, IMPORTANCE_COUNT,
};
pub use dest::Destination;
pub use sinks::{FileSink, NullSink, SharedSink, Sink, SinkWrite, WriterSink};

#[cfg(unix)]
pub use sinks::{FdSink, SyslogSink};
