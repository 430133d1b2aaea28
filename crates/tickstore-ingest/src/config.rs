//! Pipeline configuration.

use tickstore_types::InstrumentToken;

use crate::IngestError;

/// Configuration for an ingestion [`Pipeline`](crate::Pipeline).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Instruments subscribed on the stream collaborator.
    pub tokens: Vec<InstrumentToken>,
    /// Flush threshold and conduit capacity. `None` or zero means
    /// [`Self::DUMP_SIZE_PER_TOKEN`] times the number of tokens.
    pub dump_size: Option<usize>,
    /// Persist the partially filled batch when every sender has been dropped.
    /// When false the partial batch is discarded.
    pub flush_on_close: bool,
}

impl PipelineConfig {
    /// Default ticks buffered per subscribed instrument.
    pub const DUMP_SIZE_PER_TOKEN: usize = 5;

    /// Creates a configuration for the given instruments with the default dump size.
    #[must_use]
    pub fn new(tokens: impl Into<Vec<InstrumentToken>>) -> Self {
        Self {
            tokens: tokens.into(),
            ..Default::default()
        }
    }

    /// Sets an explicit dump size.
    #[must_use]
    pub const fn with_dump_size(mut self, dump_size: usize) -> Self {
        self.dump_size = Some(dump_size);
        self
    }

    /// Sets whether a partial batch is flushed when the pipeline closes.
    #[must_use]
    pub const fn with_flush_on_close(mut self, flush_on_close: bool) -> Self {
        self.flush_on_close = flush_on_close;
        self
    }

    /// Returns the effective dump size.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::ZeroDumpSize`] if no dump size is set and no
    /// tokens are subscribed.
    pub fn dump_size(&self) -> Result<usize, IngestError> {
        let size = self
            .dump_size
            .filter(|&size| size > 0)
            .unwrap_or(self.tokens.len() * Self::DUMP_SIZE_PER_TOKEN);
        if size == 0 {
            return Err(IngestError::ZeroDumpSize);
        }
        Ok(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dump_size_scales_with_tokens() {
        let config = PipelineConfig::new(vec![633601, 895745]);
        assert_eq!(config.dump_size().unwrap(), 10);
    }

    #[test]
    fn test_explicit_dump_size() {
        let config = PipelineConfig::new(vec![633601]).with_dump_size(1000);
        assert_eq!(config.dump_size().unwrap(), 1000);
    }

    #[test]
    fn test_zero_dump_size_falls_back_to_default() {
        let config = PipelineConfig::new(vec![633601]).with_dump_size(0);
        assert_eq!(config.dump_size().unwrap(), 5);
    }

    #[test]
    fn test_no_tokens_and_no_dump_size_is_rejected() {
        let config = PipelineConfig::default();
        assert!(matches!(config.dump_size(), Err(IngestError::ZeroDumpSize)));
    }

    #[test]
    fn test_flush_on_close_defaults_off() {
        assert!(!PipelineConfig::new(vec![1]).flush_on_close);
        assert!(PipelineConfig::new(vec![1]).with_flush_on_close(true).flush_on_close);
    }
}
