use crate::error::{Result, ShareError};

/// Processing mode for the interpolation loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitMode {
    /// Process every byte offset on the calling thread
    #[default]
    Sequential,
    /// Split the byte range into chunks processed on the rayon pool
    Parallel,
}

/// What `join` does when handed fewer shares than the threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuorumPolicy {
    /// Fail with [`ShareError::InsufficientShares`]
    #[default]
    Enforce,
    /// Interpolate anyway; the result is not the secret
    Permissive,
}

/// Configuration options for splitting and joining
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of byte offsets handed to one worker in parallel mode
    pub chunk_size: usize,
    /// Processing mode
    pub mode: SplitMode,
    /// Quorum handling for join
    pub quorum: QuorumPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chunk_size: 64 * 1024, // 64KB per worker
            mode: SplitMode::default(),
            quorum: QuorumPolicy::default(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the parallel chunk size
    pub fn with_chunk_size(mut self, size: usize) -> Result<Self> {
        if size == 0 {
            return Err(ShareError::InvalidConfig(
                "Chunk size cannot be zero".into(),
            ));
        }
        self.chunk_size = size;
        Ok(self)
    }

    /// Sets the processing mode
    pub fn with_mode(mut self, mode: SplitMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the quorum policy used by join
    pub fn with_quorum(mut self, quorum: QuorumPolicy) -> Self {
        self.quorum = quorum;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(ShareError::InvalidConfig(
                "Chunk size cannot be zero".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.mode, SplitMode::Sequential);
        assert_eq!(config.chunk_size, 64 * 1024);
        assert_eq!(config.quorum, QuorumPolicy::Enforce);
    }

    #[test]
    fn test_config_builder() {
        let config = Config::new()
            .with_chunk_size(4096)
            .unwrap()
            .with_mode(SplitMode::Parallel)
            .with_quorum(QuorumPolicy::Permissive);

        assert_eq!(config.chunk_size, 4096);
        assert_eq!(config.mode, SplitMode::Parallel);
        assert_eq!(config.quorum, QuorumPolicy::Permissive);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::new().with_chunk_size(0).is_err());

        let config = Config {
            chunk_size: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ShareError::InvalidConfig(_))
        ));
    }
}
