//! Engine configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::{GraphError, Result},
    MAX_BLOCK_SIZE,
};

/// Sample rate and block size the engine renders at.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Audio sample rate in Hz
    pub sample_rate: f32,
    /// Frames rendered per internal block (1..=MAX_BLOCK_SIZE)
    pub block_size: usize,
}

impl EngineConfig {
    pub fn new(sample_rate: f32, block_size: usize) -> Result<Self> {
        let config = Self {
            sample_rate,
            block_size,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(GraphError::InvalidConfig(format!(
                "sample rate must be positive, got {}",
                self.sample_rate
            )));
        }
        if self.block_size == 0 || self.block_size > MAX_BLOCK_SIZE {
            return Err(GraphError::InvalidConfig(format!(
                "block size must be in 1..={MAX_BLOCK_SIZE}, got {}",
                self.block_size
            )));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            block_size: 128,
        }
    }
}
