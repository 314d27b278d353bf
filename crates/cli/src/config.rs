use crate::Cli;
use anyhow::{ensure, Context, Result};
use serilink_cluster::{NormalizeRules, Thresholds};
use std::path::PathBuf;
use std::time::Duration;

/// Immutable runtime configuration, assembled once at startup and passed
/// into the pipeline constructors. Patterns are compiled here so a bad
/// regex fails the process before the first cycle.
#[derive(Debug, Clone)]
pub struct Config {
    pub mount_points: Vec<PathBuf>,
    pub output_directory: PathBuf,
    pub target_extension: String,
    pub thresholds: Thresholds,
    pub rules: NormalizeRules,
    pub interval: Duration,
    pub chapter_support: bool,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        ensure!(
            (0.0..1.0).contains(&cli.ld_threshold),
            "edit-distance threshold must be in [0, 1), got {}",
            cli.ld_threshold
        );

        let rules = NormalizeRules::new(
            &cli.brackets_pattern,
            &cli.prefixes_pattern,
            &cli.suffixes_pattern,
        )
        .context("invalid normalizer pattern")?;

        Ok(Self {
            mount_points: cli.mount_points,
            output_directory: cli.output_directory,
            target_extension: cli.target_extension,
            thresholds: Thresholds {
                ld_threshold: cli.ld_threshold,
                match_threshold: cli.match_threshold,
                sequence_threshold: cli.sequence_threshold,
            },
            rules,
            interval: Duration::from_secs(cli.interval_seconds),
            chapter_support: cli.support_comskip_tvtplay,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use crate::Cli;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        // Keep an ambient deployment environment from leaking into the
        // env-fallback args.
        for var in [
            "MOUNT_POINTS",
            "OUTPUT_DIRECTORY",
            "TARGET_EXTENSION",
            "LD_THRESHOLD",
            "MATCH_THRESHOLD",
            "SEQUENCE_THRESHOLD",
            "INTERVAL_SECONDS",
            "PREFIXES_PATTERN",
            "SUFFIXES_PATTERN",
            "BRACKETS_PATTERN",
            "SUPPORT_COMSKIP_TVTPLAY",
        ] {
            std::env::remove_var(var);
        }
        let mut full = vec!["serilink"];
        full.extend_from_slice(args);
        Cli::parse_from(full)
    }

    #[test]
    fn defaults_match_the_documented_configuration() {
        let cli = parse(&["--mount-point", "/rec", "--output-directory", "/links"]);
        let config = Config::from_cli(cli).unwrap();

        assert_eq!(config.target_extension, "m2ts");
        assert_eq!(config.thresholds.ld_threshold, 0.5);
        assert_eq!(config.thresholds.match_threshold, 4);
        assert_eq!(config.thresholds.sequence_threshold, 4);
        assert_eq!(config.interval.as_secs(), 900);
        assert!(!config.chapter_support);
    }

    #[test]
    fn rejects_out_of_range_distance_threshold() {
        let cli = parse(&[
            "--mount-point",
            "/rec",
            "--output-directory",
            "/links",
            "--ld-threshold",
            "1.0",
        ]);
        assert!(Config::from_cli(cli).is_err());
    }

    #[test]
    fn rejects_invalid_patterns() {
        let cli = parse(&[
            "--mount-point",
            "/rec",
            "--output-directory",
            "/links",
            "--prefixes-pattern",
            "([unclosed",
        ]);
        assert!(Config::from_cli(cli).is_err());
    }

    #[test]
    fn accepts_multiple_mount_points() {
        let cli = parse(&[
            "--mount-point",
            "/rec/a",
            "--mount-point",
            "/rec/b",
            "--output-directory",
            "/links",
        ]);
        let config = Config::from_cli(cli).unwrap();
        assert_eq!(config.mount_points.len(), 2);
    }
}
