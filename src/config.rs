use clap::Parser;
use color_eyre::eyre::{bail, eyre};
use std::path::PathBuf;
use std::time::Duration;

use crate::stats::StatsSource;

#[derive(Parser, Debug)]
#[command(
    name = "contmon",
    version,
    about = "A rolling CPU usage chart for a Docker container"
)]
pub struct Config {
    /// Container ID or name to watch
    #[arg(required_unless_present = "demo")]
    pub container: Option<String>,

    /// Docker Engine API endpoint (http:// or tcp://)
    #[arg(
        short = 'H',
        long,
        env = "DOCKER_HOST",
        default_value = "http://localhost:2375"
    )]
    pub host: String,

    /// Chart a synthetic load instead of a real container
    #[arg(long)]
    pub demo: bool,

    /// Demo sample interval in milliseconds
    #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(100..=10000))]
    pub demo_interval_ms: u64,

    /// Append tracing output to this file (RUST_LOG sets the filter)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn stats_source(&self) -> color_eyre::Result<StatsSource> {
        if self.demo {
            let num_cpus = std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1);
            return Ok(StatsSource::Demo {
                interval: Duration::from_millis(self.demo_interval_ms),
                num_cpus,
            });
        }
        let container = self
            .container
            .clone()
            .ok_or_else(|| eyre!("a container ID or name is required"))?;
        Ok(StatsSource::Docker {
            host: normalize_host(&self.host)?,
            container,
        })
    }
}

/// Accept the forms `DOCKER_HOST` usually takes and turn them into an HTTP base URL.
pub fn normalize_host(host: &str) -> color_eyre::Result<String> {
    let host = host.trim().trim_end_matches('/');
    if host.is_empty() {
        bail!("docker host is empty");
    }
    if let Some(rest) = host.strip_prefix("tcp://") {
        return Ok(format!("http://{rest}"));
    }
    if host.starts_with("unix://") || host.starts_with("npipe://") {
        bail!("{host}: only TCP endpoints are supported, expose the daemon with -H tcp://HOST:2375");
    }
    if host.starts_with("http://") || host.starts_with("https://") {
        return Ok(host.to_string());
    }
    Ok(format!("http://{host}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_docker_host_forms() {
        assert_eq!(
            normalize_host("tcp://10.0.0.5:2375").unwrap(),
            "http://10.0.0.5:2375"
        );
        assert_eq!(
            normalize_host("http://localhost:2375/").unwrap(),
            "http://localhost:2375"
        );
        assert_eq!(
            normalize_host("dockerd:2375").unwrap(),
            "http://dockerd:2375"
        );
        assert!(normalize_host("unix:///var/run/docker.sock").is_err());
        assert!(normalize_host("  ").is_err());
    }

    #[test]
    fn container_required_without_demo() {
        assert!(Config::try_parse_from(["contmon"]).is_err());
        let config = Config::try_parse_from(["contmon", "--demo"]).unwrap();
        assert!(matches!(
            config.stats_source().unwrap(),
            StatsSource::Demo { .. }
        ));
    }

    #[test]
    fn docker_source_from_args() {
        let config =
            Config::try_parse_from(["contmon", "-H", "tcp://box:2375", "web-1"]).unwrap();
        match config.stats_source().unwrap() {
            StatsSource::Docker { host, container } => {
                assert_eq!(host, "http://box:2375");
                assert_eq!(container, "web-1");
            }
            other => panic!("unexpected source {other:?}"),
        }
    }

    #[test]
    fn demo_interval_is_range_checked() {
        assert!(Config::try_parse_from(["contmon", "--demo", "--demo-interval-ms", "50"]).is_err());
    }
}
