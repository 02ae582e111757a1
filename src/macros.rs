//! Logging macros for ergonomic message formatting.
//!
//! These macros write one complete line to a facility's stream with
//! automatic string formatting, similar to `println!` and `format!`.
//!
//! # Examples
//!
//! ```
//! use mlog::prelude::*;
//! use mlog::minfo;
//!
//! let net = Facility::with_destination("net", Destination::null());
//!
//! minfo!(net, "listener started");
//!
//! let port = 8080;
//! minfo!(net, "listening on port {}", port);
//! ```

/// Write one formatted line to the stream of the given importance.
///
/// # Examples
///
/// ```
/// # use mlog::prelude::*;
/// # let fac = Facility::with_destination("demo", Destination::null());
/// use mlog::mwrite;
/// mwrite!(fac, Importance::Info, "simple message");
/// mwrite!(fac, Importance::Error, "error code: {}", 500);
/// ```
#[macro_export]
macro_rules! mwrite {
    ($facility:expr, $importance:expr, $($arg:tt)+) => {
        $facility.stream($importance).writeln(format!($($arg)+))
    };
}

/// Write a DEBUG-level line.
///
/// # Examples
///
/// ```
/// # use mlog::prelude::*;
/// # let fac = Facility::with_destination("demo", Destination::null());
/// use mlog::mdebug;
/// mdebug!(fac, "entering parse()");
/// mdebug!(fac, "counter value: {}", 42);
/// ```
#[macro_export]
macro_rules! mdebug {
    ($facility:expr, $($arg:tt)+) => {
        $crate::mwrite!($facility, $crate::Importance::Debug, $($arg)+)
    };
}

/// Write a TRACE-level line.
#[macro_export]
macro_rules! mtrace {
    ($facility:expr, $($arg:tt)+) => {
        $crate::mwrite!($facility, $crate::Importance::Trace, $($arg)+)
    };
}

/// Write a WHERE-level line, typically a code location.
#[macro_export]
macro_rules! mwhere {
    ($facility:expr) => {
        $crate::mwrite!($facility, $crate::Importance::Where, "{}:{}", file!(), line!())
    };
    ($facility:expr, $($arg:tt)+) => {
        $crate::mwrite!($facility, $crate::Importance::Where, $($arg)+)
    };
}

/// Write an INFO-level line.
///
/// # Examples
///
/// ```
/// # use mlog::prelude::*;
/// # let fac = Facility::with_destination("demo", Destination::null());
/// use mlog::minfo;
/// minfo!(fac, "application started");
/// minfo!(fac, "processing {} items", 100);
/// ```
#[macro_export]
macro_rules! minfo {
    ($facility:expr, $($arg:tt)+) => {
        $crate::mwrite!($facility, $crate::Importance::Info, $($arg)+)
    };
}

/// Write a WARN-level line.
#[macro_export]
macro_rules! mwarn {
    ($facility:expr, $($arg:tt)+) => {
        $crate::mwrite!($facility, $crate::Importance::Warn, $($arg)+)
    };
}

/// Write an ERROR-level line.
#[macro_export]
macro_rules! merror {
    ($facility:expr, $($arg:tt)+) => {
        $crate::mwrite!($facility, $crate::Importance::Error, $($arg)+)
    };
}

/// Write a FATAL-level line.
#[macro_export]
macro_rules! mfatal {
    ($facility:expr, $($arg:tt)+) => {
        $crate::mwrite!($facility, $crate::Importance::Fatal, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::facility::Facility;
    use crate::core::importance::Importance;
    use crate::dest::Destination;

    fn quiet(name: &str) -> Facility {
        Facility::with_destination(name, Destination::null())
    }

    #[test]
    fn test_mwrite_macro() {
        let fac = quiet("macro-test");
        mwrite!(fac, Importance::Info, "test message");
        mwrite!(fac, Importance::Info, "formatted: {}", 42);
    }

    #[test]
    fn test_level_macros() {
        let fac = quiet("macro-test");
        mdebug!(fac, "debug message");
        mtrace!(fac, "value: {}", 10);
        mwhere!(fac);
        minfo!(fac, "items: {}", 100);
        mwarn!(fac, "retry {} of {}", 1, 3);
        merror!(fac, "code: {}", 500);
        mfatal!(fac, "critical failure: {}", "system");
    }
}
