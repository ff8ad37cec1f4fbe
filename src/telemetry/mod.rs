// Host telemetry module
//
// Supplies the host status records the hexbin view lays out. Three sources
// exist: the local machine (sysinfo), a JSON fleet file that is re-read on
// every poll, and a synthetic fleet for demos. All sources are read-only.

pub mod alerts;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use sysinfo::{Networks, System};
use thiserror::Error;
use tracing::debug;

/// Status of one monitored host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostStatusRecord {
    pub name: String,
    /// CPU usage in percent
    pub cpu: f64,
    /// Memory usage in percent
    pub memory: f64,
    /// Network traffic rate (KiB/s for the local source)
    #[serde(default)]
    pub traffic: f64,
}

impl HostStatusRecord {
    pub fn new(name: impl Into<String>, cpu: f64, memory: f64, traffic: f64) -> Self {
        Self {
            name: name.into(),
            cpu,
            memory,
            traffic,
        }
    }

    /// Average of CPU and memory usage, the value health is judged on
    pub fn load(&self) -> f64 {
        (self.cpu + self.memory) / 2.0
    }

    /// Reject records the layout cannot use
    pub fn validate(&self) -> Result<(), SourceError> {
        if self.name.trim().is_empty() {
            return Err(SourceError::InvalidRecord {
                name: self.name.clone(),
                reason: "host name is empty".to_string(),
            });
        }
        for (field, value) in [
            ("cpu", self.cpu),
            ("memory", self.memory),
            ("traffic", self.traffic),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SourceError::InvalidRecord {
                    name: self.name.clone(),
                    reason: format!("{} must be a finite, non-negative number (got {})", field, value),
                });
            }
        }
        Ok(())
    }
}

/// One poll's worth of data: host records plus any alerts the source itself reports
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FleetSnapshot {
    pub hosts: Vec<HostStatusRecord>,
    pub alerts: Vec<String>,
}

/// Errors raised while fetching host telemetry
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot read fleet file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse fleet file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid record for host '{name}': {reason}")]
    InvalidRecord { name: String, reason: String },
}

/// A polled supplier of host status records
pub trait HostSource {
    /// Short label shown in the header
    fn label(&self) -> String;

    /// Fetch the current fleet state
    fn fetch(&mut self) -> Result<FleetSnapshot, SourceError>;
}

// ============================================================================
// Fleet file source
// ============================================================================

/// Accepted fleet file layouts
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FleetFileContent {
    Document {
        hosts: Vec<HostStatusRecord>,
        #[serde(default)]
        alerts: Vec<String>,
    },
    Records(Vec<HostStatusRecord>),
}

/// Parse fleet file JSON text
///
/// Accepts either `{"hosts": [...], "alerts": [...]}` or a bare array of records.
pub fn parse_fleet(text: &str, path: &Path) -> Result<FleetSnapshot, SourceError> {
    let content: FleetFileContent =
        serde_json::from_str(text).map_err(|source| SourceError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let snapshot = match content {
        FleetFileContent::Document { hosts, alerts } => FleetSnapshot { hosts, alerts },
        FleetFileContent::Records(hosts) => FleetSnapshot {
            hosts,
            alerts: Vec::new(),
        },
    };

    for host in &snapshot.hosts {
        host.validate()?;
    }

    Ok(snapshot)
}

/// Fleet described by a JSON file maintained by some external collector
pub struct FleetFileSource {
    path: PathBuf,
}

impl FleetFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HostSource for FleetFileSource {
    fn label(&self) -> String {
        format!("file:{}", self.path.display())
    }

    fn fetch(&mut self) -> Result<FleetSnapshot, SourceError> {
        let text = fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        let snapshot = parse_fleet(&text, &self.path)?;
        debug!(
            path = %self.path.display(),
            hosts = snapshot.hosts.len(),
            alerts = snapshot.alerts.len(),
            "Loaded fleet file"
        );
        Ok(snapshot)
    }
}

// ============================================================================
// Local host source
// ============================================================================

/// The machine hexwatch runs on, sampled through sysinfo
pub struct LocalHostSource {
    system: System,
    networks: Networks,
    host_name: String,
    last_sample: std::time::Instant,
}

impl LocalHostSource {
    pub fn new() -> Self {
        let mut system = System::new();
        system.refresh_cpu_usage();
        system.refresh_memory();
        let host_name = System::host_name().unwrap_or_else(|| "localhost".to_string());

        Self {
            system,
            networks: Networks::new_with_refreshed_list(),
            host_name,
            last_sample: std::time::Instant::now(),
        }
    }
}

impl Default for LocalHostSource {
    fn default() -> Self {
        Self::new()
    }
}

impl HostSource for LocalHostSource {
    fn label(&self) -> String {
        format!("local:{}", self.host_name)
    }

    fn fetch(&mut self) -> Result<FleetSnapshot, SourceError> {
        self.system.refresh_cpu_usage();
        self.system.refresh_memory();
        self.networks.refresh(true);

        let cpu = self.system.global_cpu_usage() as f64;
        let total = self.system.total_memory();
        let memory = if total > 0 {
            self.system.used_memory() as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        // received()/transmitted() count bytes since the previous refresh
        let bytes: u64 = self
            .networks
            .list()
            .values()
            .map(|data| data.received() + data.transmitted())
            .sum();
        let elapsed = self.last_sample.elapsed().as_secs_f64().max(0.001);
        self.last_sample = std::time::Instant::now();
        let traffic = bytes as f64 / 1024.0 / elapsed;

        let record = HostStatusRecord::new(
            self.host_name.clone(),
            cpu.clamp(0.0, 100.0),
            memory.clamp(0.0, 100.0),
            traffic,
        );
        record.validate()?;

        Ok(FleetSnapshot {
            hosts: vec![record],
            alerts: Vec::new(),
        })
    }
}

// ============================================================================
// Simulated fleet source
// ============================================================================

/// Synthetic fleet with smoothly varying load, for demos and screenshots
pub struct SimulatedFleetSource {
    host_count: usize,
    tick: u64,
}

impl SimulatedFleetSource {
    pub fn new(host_count: usize) -> Self {
        Self {
            host_count,
            tick: 0,
        }
    }

    /// Record for host `idx` at simulation step `tick`
    ///
    /// Each host gets its own phase so the honeycomb shows a spread of levels.
    pub fn sample(idx: usize, tick: u64) -> HostStatusRecord {
        let t = tick as f64 * 0.15 + idx as f64 * 0.7;
        let base = 20.0 + (idx * 37 % 60) as f64;
        let cpu = (base + t.sin() * 18.0 + (t * 1.7).cos() * 8.0).clamp(0.0, 100.0);
        let memory = (base * 0.9 + (t * 0.5).cos() * 15.0 + 10.0).clamp(0.0, 100.0);
        let traffic = ((t * 0.8).sin() * 40.0 + 60.0 + (idx % 7) as f64 * 10.0).max(0.0);

        HostStatusRecord::new(format!("host-{}", idx), cpu, memory, traffic)
    }
}

impl HostSource for SimulatedFleetSource {
    fn label(&self) -> String {
        format!("simulated:{}", self.host_count)
    }

    fn fetch(&mut self) -> Result<FleetSnapshot, SourceError> {
        self.tick += 1;
        let hosts = (0..self.host_count)
            .map(|idx| Self::sample(idx, self.tick))
            .collect();
        Ok(FleetSnapshot {
            hosts,
            alerts: Vec::new(),
        })
    }
}
