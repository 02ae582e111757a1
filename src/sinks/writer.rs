//! Generic `io::Write` sink backend

use super::SinkWrite;
use crate::core::error::Result;
use std::io::Write;

/// Routes message bytes to any boxed [`std::io::Write`] implementor:
/// standard streams, pipes, in-memory capture buffers in tests.
pub struct WriterSink {
    writer: Box<dyn Write + Send>,
    name: String,
}

impl WriterSink {
    pub fn new(writer: Box<dyn Write + Send>, name: impl Into<String>) -> Self {
        Self {
            writer,
            name: name.into(),
        }
    }

    /// A sink over the process standard error stream.
    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()), "stderr")
    }

    /// A sink over the process standard output stream.
    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()), "stdout")
    }
}

impl SinkWrite for WriterSink {
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
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

    #[test]
    fn test_writes_pass_through() {
        let buf = SharedBuf(Arc::new(Mutex::new(Vec::new())));
        let mut sink = WriterSink::new(Box::new(buf.clone()), "test");
        sink.write_all(b"hello").unwrap();
        sink.flush().unwrap();
        assert_eq!(&*buf.0.lock(), b"hello");
        assert_eq!(sink.name(), "test");
    }
}
