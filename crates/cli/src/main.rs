use anyhow::Result;
use clap::Parser;
use log::info;
use serilink_cluster::{
    DEFAULT_BRACKETS_PATTERN, DEFAULT_PREFIXES_PATTERN, DEFAULT_SUFFIXES_PATTERN,
};
use serilink_linker::{Pipeline, RealFs, Reconciler, SourceScanner};
use std::path::PathBuf;

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "serilink")]
#[command(about = "Groups recorded media into series directories of symlinks", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Source directory to scan for recordings (repeatable)
    #[arg(
        long = "mount-point",
        env = "MOUNT_POINTS",
        value_delimiter = ':',
        required = true
    )]
    pub mount_points: Vec<PathBuf>,

    /// Root of the derived link tree
    #[arg(long, env = "OUTPUT_DIRECTORY")]
    pub output_directory: PathBuf,

    /// File extension selecting candidate source files
    #[arg(long, env = "TARGET_EXTENSION", default_value = "m2ts")]
    pub target_extension: String,

    /// Maximum edit-distance ratio for two names to count as similar
    #[arg(long, env = "LD_THRESHOLD", default_value_t = 0.5)]
    pub ld_threshold: f64,

    /// Minimum number of similar entries required to realize a group
    #[arg(long, env = "MATCH_THRESHOLD", default_value_t = 4)]
    pub match_threshold: usize,

    /// Minimum length of a derived group name, in chars
    #[arg(long, env = "SEQUENCE_THRESHOLD", default_value_t = 4)]
    pub sequence_threshold: usize,

    /// Seconds between scan cycles
    #[arg(long, env = "INTERVAL_SECONDS", default_value_t = 900)]
    pub interval_seconds: u64,

    /// Prefix pattern stripped from the start of normalized names
    #[arg(long, env = "PREFIXES_PATTERN", default_value = DEFAULT_PREFIXES_PATTERN)]
    pub prefixes_pattern: String,

    /// Suffix pattern stripped from the end of normalized names
    #[arg(long, env = "SUFFIXES_PATTERN", default_value = DEFAULT_SUFFIXES_PATTERN)]
    pub suffixes_pattern: String,

    /// Decorative bracket spans removed from names
    #[arg(long, env = "BRACKETS_PATTERN", default_value = DEFAULT_BRACKETS_PATTERN)]
    pub brackets_pattern: String,

    /// Link comskip/TvtPlay chapter sidecar files alongside recordings
    #[arg(long, env = "SUPPORT_COMSKIP_TVTPLAY")]
    pub support_comskip_tvtplay: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_cli(cli)?;
    info!(
        "watching {} mount point(s), linking into {}",
        config.mount_points.len(),
        config.output_directory.display()
    );

    let pipeline = Pipeline::new(
        SourceScanner::new(config.mount_points, config.target_extension),
        config.rules,
        config.thresholds,
        Reconciler::new(RealFs, config.output_directory, config.chapter_support),
    );
    pipeline.run_forever(config.interval).await;
    Ok(())
}
