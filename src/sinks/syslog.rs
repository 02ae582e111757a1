//! Syslog sink backend (unix)
//!
//! Uses libc `openlog`/`syslog` directly rather than pulling in a dedicated
//! syslog crate. Messages are forwarded whole-line with the priority mapped
//! from the message importance.

use super::SinkWrite;
use crate::core::error::Result;
use crate::core::importance::Importance;
use crate::core::properties::MessageProperties;
use std::ffi::CString;
use std::sync::OnceLock;

/// Maps an importance level to a syslog(3) priority.
pub fn priority_for(importance: Importance) -> libc::c_int {
    match importance {
        Importance::Debug | Importance::Trace => libc::LOG_DEBUG,
        Importance::Where | Importance::Info => libc::LOG_INFO,
        Importance::Warn => libc::LOG_WARNING,
        Importance::Error => libc::LOG_ERR,
        Importance::Fatal => libc::LOG_CRIT,
    }
}

/// Forwards complete lines to the system logging service.
///
/// Line-oriented: partial messages never reach syslog, and the trailing
/// newline is stripped before forwarding.
pub struct SyslogSink {
    _private: (),
}

impl SyslogSink {
    /// Open the syslog connection under `ident` with the given syslog
    /// facility code (e.g. `libc::LOG_USER`).
    ///
    /// syslog(3) keeps a single identity per process. The first
    /// constructed sink registers its `ident` for the process lifetime;
    /// later constructions reopen the connection under that original
    /// ident and their own `ident` argument is ignored.
    pub fn new(ident: &str, facility: libc::c_int) -> Self {
        // syslog(3) stores the ident pointer internally, so it must live
        // for the process lifetime.
        static IDENT: OnceLock<CString> = OnceLock::new();
        let ident = IDENT.get_or_init(|| {
            CString::new(ident)
                .unwrap_or_else(|_| CString::new("mlog").expect("no NUL bytes"))
        });

        // SAFETY: the ident pointer is valid for the process lifetime
        // because it is stored in a static OnceLock.
        unsafe {
            libc::openlog(ident.as_ptr(), libc::LOG_PID, facility);
        }
        Self { _private: () }
    }

    fn send(&self, priority: libc::c_int, line: &[u8]) {
        let body = line.strip_suffix(b"\n").unwrap_or(line);
        let c_message = match CString::new(body) {
            Ok(s) => s,
            Err(_) => return,
        };
        // syslog(3) interprets `%` as a format specifier; forwarding
        // through "%s" avoids format string injection.
        static FORMAT: &[u8] = b"%s\0";

        // SAFETY: both strings are valid NUL-terminated C strings and
        // openlog has been called by the constructor.
        unsafe {
            libc::syslog(
                priority,
                FORMAT.as_ptr().cast::<libc::c_char>(),
                c_message.as_ptr(),
            );
        }
    }
}

impl SinkWrite for SyslogSink {
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.send(libc::LOG_INFO, bytes);
        Ok(())
    }

    fn write_line(&mut self, line: &[u8], properties: &MessageProperties) -> Result<()> {
        let priority = priority_for(properties.importance.unwrap_or_default());
        self.send(priority, line);
        Ok(())
    }

    fn line_oriented(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "syslog"
    }
}
