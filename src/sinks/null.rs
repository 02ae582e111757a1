//! Discarding sink backend

use super::SinkWrite;
use crate::core::error::Result;

/// Swallows everything.
#[derive(Debug, Default)]
pub struct NullSink;

impl NullSink {
    pub fn new() -> Self {
        Self
    }
}

impl SinkWrite for NullSink {
    fn write_all(&mut self, _bytes: &[u8]) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}
