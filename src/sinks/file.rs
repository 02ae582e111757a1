//! File sink backend

use super::SinkWrite;
use crate::core::error::{MlogError, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Appends message bytes to a file.
pub struct FileSink {
    writer: Option<BufWriter<File>>,
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            writer: Some(BufWriter::new(file)),
            path,
        })
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SinkWrite for FileSink {
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| MlogError::sink("file writer not initialized"))?;
        writer.write_all(bytes)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_append_and_flush() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("out.log");

        let mut sink = FileSink::new(&path).expect("create sink");
        sink.write_all(b"F[INFO ] hello\n").unwrap();
        sink.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "F[INFO ] hello\n");
    }

    #[test]
    fn test_reopen_appends() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("out.log");

        {
            let mut sink = FileSink::new(&path).unwrap();
            sink.write_all(b"one\n").unwrap();
        }
        {
            let mut sink = FileSink::new(&path).unwrap();
            sink.write_all(b"two\n").unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "one\ntwo\n");
    }
}
