//! Configuration for the reclamation-sweep simulation
//!
//! Centralized configuration with sensible defaults.

use crate::error::{Result, TombstoneError};

/// Upper bound on `members * tombstones_per_member` for one simulation
pub const MAX_WORKLOAD: u64 = 100_000_000;

/// Shape of a simulated multi-member tombstone workload
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Workload Configuration
    // -------------------------------------------------------------------------
    /// Number of members producing tombstones
    pub members: u32,

    /// Tombstones generated by each member
    pub tombstones_per_member: u64,

    // -------------------------------------------------------------------------
    // Clock Configuration
    // -------------------------------------------------------------------------
    /// Timestamp of version 0 on member 0 (unix millis)
    pub base_timestamp_ms: i64,

    /// Milliseconds between consecutive versions on one member
    pub version_interval_ms: i64,

    /// Extra offset added per member index, modelling clock skew
    /// (may be negative)
    pub clock_skew_ms: i64,

    // -------------------------------------------------------------------------
    // Sweep Configuration
    // -------------------------------------------------------------------------
    /// Max tombstones reclaimed per sweep batch
    pub batch_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            members: 3,
            tombstones_per_member: 1000,
            base_timestamp_ms: 1_700_000_000_000,
            version_interval_ms: 10,
            clock_skew_ms: 3,
            batch_size: 100,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check that the workload can actually be generated and swept
    pub fn validate(&self) -> Result<()> {
        if self.members == 0 {
            return Err(TombstoneError::Config(
                "members must be at least 1".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(TombstoneError::Config(
                "batch_size must be at least 1".to_string(),
            ));
        }
        let total = u64::from(self.members)
            .checked_mul(self.tombstones_per_member)
            .filter(|total| *total <= MAX_WORKLOAD);
        if total.is_none() {
            return Err(TombstoneError::Config(format!(
                "{} members x {} tombstones exceeds the workload limit of {}",
                self.members, self.tombstones_per_member, MAX_WORKLOAD
            )));
        }
        if self.version_interval_ms <= 0 {
            return Err(TombstoneError::Config(format!(
                "version_interval_ms must be positive, got {}",
                self.version_interval_ms
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the number of members
    pub fn members(mut self, count: u32) -> Self {
        self.config.members = count;
        self
    }

    /// Set the number of tombstones each member generates
    pub fn tombstones_per_member(mut self, count: u64) -> Self {
        self.config.tombstones_per_member = count;
        self
    }

    /// Set the base timestamp (unix millis)
    pub fn base_timestamp_ms(mut self, ms: i64) -> Self {
        self.config.base_timestamp_ms = ms;
        self
    }

    /// Set the gap between versions on one member (milliseconds)
    pub fn version_interval_ms(mut self, ms: i64) -> Self {
        self.config.version_interval_ms = ms;
        self
    }

    /// Set the per-member clock skew (milliseconds)
    pub fn clock_skew_ms(mut self, ms: i64) -> Self {
        self.config.clock_skew_ms = ms;
        self
    }

    /// Set the sweep batch size
    pub fn batch_size(mut self, size: usize) -> Self {
        self.config.batch_size = size;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
