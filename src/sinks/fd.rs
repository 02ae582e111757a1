//! Raw file-descriptor sink backend (unix)

use super::SinkWrite;
use crate::core::error::{MlogError, Result};
use std::os::unix::io::RawFd;

/// Writes message bytes directly to a POSIX file descriptor.
///
/// Descriptors 0..=2 are never closed. An owned descriptor above that
/// range is closed when the sink is dropped.
pub struct FdSink {
    fd: RawFd,
    owned: bool,
}

impl FdSink {
    /// Borrow a descriptor; the caller remains responsible for closing it.
    pub fn borrowed(fd: RawFd) -> Self {
        Self { fd, owned: false }
    }

    /// Take ownership of a descriptor; it is closed on drop unless it is
    /// one of the standard descriptors.
    pub fn owned(fd: RawFd) -> Self {
        Self { fd, owned: true }
    }

    pub fn fd(&self) -> RawFd {
        self.fd
    }
}

impl SinkWrite for FdSink {
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        let mut remaining = bytes;
        while !remaining.is_empty() {
            // SAFETY: the pointer/length pair comes from a valid slice and
            // the descriptor is the one this sink was constructed over.
            let written = unsafe {
                libc::write(
                    self.fd,
                    remaining.as_ptr().cast::<libc::c_void>(),
                    remaining.len(),
                )
            };
            if written < 0 {
                let err = std::io::Error::last_os_error();
                if err.kind() == std::io::ErrorKind::Interrupted {
                    continue;
                }
                return Err(MlogError::io_operation(
                    "writing file descriptor",
                    format!("fd {}", self.fd),
                    err,
                ));
            }
            remaining = &remaining[written as usize..];
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "fd"
    }
}

impl Drop for FdSink {
    fn drop(&mut self) {
        // Standard descriptors stay open for the process lifetime.
        if self.owned && self.fd > 2 {
            // SAFETY: we own the descriptor and drop runs at most once.
            unsafe {
                libc::close(self.fd);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::os::unix::io::IntoRawFd;
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_to_owned_fd() {
        let tmp = NamedTempFile::new().expect("temp file");
        let path = tmp.path().to_path_buf();
        let file = tmp.reopen().expect("reopen");
        let fd = file.into_raw_fd();

        {
            let mut sink = FdSink::owned(fd);
            sink.write_all(b"fd bytes\n").unwrap();
        }

        let mut content = String::new();
        std::fs::File::open(&path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "fd bytes\n");
    }
}
