//! Reclamation-sweep simulation
//!
//! Drives an [`OrderedTombstoneMap`] with a deterministic multi-member
//! workload the way a garbage-collection sweep would: every member records
//! its tombstones, then the sweep reclaims them in bounded batches.
//!
//! ## Workload
//! Member `i` (0-based) produces versions `1..=n` with timestamps
//! `base + v * interval + i * skew`. Tags are emitted round-robin across
//! members, so each member's own stream stays in version order.

use std::collections::{HashMap, HashSet};

use crate::config::Config;
use crate::error::Result;
use crate::tombstone::{OrderKey, OrderedTombstoneMap, VersionTag};

/// Outcome of one simulated sweep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationReport {
    /// Tombstones recorded
    pub inserted: u64,

    /// Tombstones handed out by the sweep
    pub reclaimed: u64,

    /// Number of non-empty sweep batches
    pub batches: u64,

    /// Distinct members observed during the sweep
    pub members_seen: usize,

    /// Reclaimed tombstones whose timestamp is older than the one reclaimed
    /// just before it. Nonzero only because cross-member order is approximate.
    pub timestamp_inversions: u64,

    /// Whether every member's tombstones came out in ascending key order
    pub per_member_ordered: bool,
}

/// A configured, repeatable sweep over synthetic tombstones
pub struct Simulation {
    config: Config,
}

impl Simulation {
    /// Create a simulation, rejecting configs that cannot be swept
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Version tags for the whole workload, interleaved across members
    ///
    /// The total is bounded by [`MAX_WORKLOAD`](crate::config::MAX_WORKLOAD),
    /// checked when the simulation is created.
    pub fn generate(&self) -> Vec<VersionTag<u32>> {
        let cfg = &self.config;
        let capacity = (cfg.members as usize).saturating_mul(cfg.tombstones_per_member as usize);
        let mut tags = Vec::with_capacity(capacity);

        for version in 1..=cfg.tombstones_per_member {
            let version = version as i64;
            for member in 0..cfg.members {
                let timestamp = cfg
                    .base_timestamp_ms
                    .saturating_add(version.saturating_mul(cfg.version_interval_ms))
                    .saturating_add(i64::from(member).saturating_mul(cfg.clock_skew_ms));
                tags.push(VersionTag::new(member, version, timestamp));
            }
        }

        tags
    }

    /// Record the workload, then sweep it to empty in batches
    pub fn run(&self) -> Result<SimulationReport> {
        let mut map = OrderedTombstoneMap::new();
        for (id, tag) in self.generate().into_iter().enumerate() {
            map.insert_tag(tag, id as u64)?;
        }

        let inserted = map.len() as u64;
        tracing::info!(
            "Recorded {} tombstones from {} members",
            inserted,
            map.member_count()
        );

        let mut reclaimed = 0u64;
        let mut batches = 0u64;
        let mut timestamp_inversions = 0u64;
        let mut per_member_ordered = true;
        let mut previous_timestamp: Option<i64> = None;
        let mut last_key: HashMap<u32, OrderKey> = HashMap::new();
        let mut members_seen: HashSet<u32> = HashSet::new();

        loop {
            let batch = map.take_batch(self.config.batch_size);
            if batch.is_empty() {
                break;
            }
            batches += 1;
            tracing::debug!(
                "Sweep batch {}: {} tombstones, {} remaining",
                batches,
                batch.len(),
                map.len()
            );

            for taken in batch {
                reclaimed += 1;
                members_seen.insert(taken.member);

                if let Some(prev) = previous_timestamp {
                    if taken.key.timestamp < prev {
                        timestamp_inversions += 1;
                    }
                }
                previous_timestamp = Some(taken.key.timestamp);

                if let Some(prev_key) = last_key.insert(taken.member, taken.key) {
                    if prev_key >= taken.key {
                        tracing::warn!(
                            "Member {} reclaimed {} after {}",
                            taken.member,
                            taken.key,
                            prev_key
                        );
                        per_member_ordered = false;
                    }
                }
            }
        }

        let report = SimulationReport {
            inserted,
            reclaimed,
            batches,
            members_seen: members_seen.len(),
            timestamp_inversions,
            per_member_ordered,
        };
        tracing::info!(
            "Sweep done: {} reclaimed in {} batches, {} timestamp inversions",
            report.reclaimed,
            report.batches,
            report.timestamp_inversions
        );

        Ok(report)
    }
}
