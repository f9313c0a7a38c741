//! Tombstone Sweep Simulator
//!
//! Runs a synthetic multi-member workload through the tombstone map and
//! reports how the reclamation order came out.

use clap::Parser;
use tombstone_merge::{Config, Simulation};
use tracing_subscriber::{fmt, EnvFilter};

/// Tombstone sweep simulator
#[derive(Parser, Debug)]
#[command(name = "tombstone-sim")]
#[command(about = "Simulate ordered tombstone reclamation across replica members")]
#[command(version)]
struct Args {
    /// Number of members producing tombstones
    #[arg(short, long, default_value = "3")]
    members: u32,

    /// Tombstones generated per member
    #[arg(short, long, default_value = "1000")]
    per_member: u64,

    /// Milliseconds between versions on one member
    #[arg(short, long, default_value = "10")]
    interval_ms: i64,

    /// Clock skew added per member index (milliseconds, may be negative)
    #[arg(short, long, default_value = "3", allow_hyphen_values = true)]
    skew_ms: i64,

    /// Max tombstones reclaimed per sweep batch
    #[arg(short, long, default_value = "100")]
    batch_size: usize,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tombstone_merge=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let args = Args::parse();

    tracing::info!("tombstone-sim v{}", tombstone_merge::VERSION);
    tracing::info!(
        "{} members x {} tombstones, interval {} ms, skew {} ms",
        args.members,
        args.per_member,
        args.interval_ms,
        args.skew_ms
    );

    // Build config from args
    let config = Config::builder()
        .members(args.members)
        .tombstones_per_member(args.per_member)
        .version_interval_ms(args.interval_ms)
        .clock_skew_ms(args.skew_ms)
        .batch_size(args.batch_size)
        .build();

    let simulation = match Simulation::new(config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let report = match simulation.run() {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Simulation failed: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Inserted:              {}", report.inserted);
    tracing::info!("Reclaimed:             {}", report.reclaimed);
    tracing::info!("Batches:               {}", report.batches);
    tracing::info!("Members seen:          {}", report.members_seen);
    tracing::info!("Timestamp inversions:  {}", report.timestamp_inversions);
    tracing::info!("Per-member ordered:    {}", report.per_member_ordered);

    if !report.per_member_ordered || report.reclaimed != report.inserted {
        tracing::error!("Sweep violated per-member ordering or lost tombstones");
        std::process::exit(1);
    }
}
