//! CPU and RAM utilisation providers backed by procfs.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::data::telemetry::{CpuTicks, MemInfo};
use crate::error::{Error, Result};
use crate::queries::telemetry::{cpu_percent, ram_percent};

pub const PROC_STAT: &str = "/proc/stat";
pub const PROC_MEMINFO: &str = "/proc/meminfo";

/// Default gauge refresh period.
pub const SAMPLE_INTERVAL: Duration = Duration::from_millis(500);

/// A gauge source returning a percentage in `[0, 100]`.
pub trait UsageProvider {
    fn sample(&mut self) -> u8;
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::Telemetry {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Read the aggregate CPU counters from a `/proc/stat`-format file.
pub fn read_cpu_ticks(path: &Path) -> Result<CpuTicks> {
    CpuTicks::parse(&read_source(path)?).ok_or_else(|| Error::Telemetry {
        path: path.to_path_buf(),
        reason: "no aggregate cpu line".to_string(),
    })
}

/// Read memory totals from a `/proc/meminfo`-format file.
pub fn read_mem_info(path: &Path) -> Result<MemInfo> {
    MemInfo::parse(&read_source(path)?).ok_or_else(|| Error::Telemetry {
        path: path.to_path_buf(),
        reason: "missing MemTotal or MemAvailable".to_string(),
    })
}

/// CPU utilisation since the previous sample.
#[derive(Debug, Clone)]
pub struct CpuSampler {
    path: PathBuf,
    previous: Option<CpuTicks>,
}

impl CpuSampler {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            previous: None,
        }
    }

    /// Start from a known previous sample instead of priming on first call.
    pub fn with_previous(mut self, previous: CpuTicks) -> Self {
        self.previous = Some(previous);
        self
    }

    pub fn previous(&self) -> Option<CpuTicks> {
        self.previous
    }
}

impl Default for CpuSampler {
    fn default() -> Self {
        Self::new(PROC_STAT)
    }
}

impl UsageProvider for CpuSampler {
    /// First call primes the history and returns 0. A failed read returns 0
    /// and keeps the previous sample.
    fn sample(&mut self) -> u8 {
        match read_cpu_ticks(&self.path) {
            Ok(current) => {
                let usage = cpu_percent(self.previous, current);
                self.previous = Some(current);
                usage
            }
            Err(e) => {
                log::warn!("{}", e);
                0
            }
        }
    }
}

/// Memory in use as a share of total.
#[derive(Debug, Clone)]
pub struct RamSampler {
    path: PathBuf,
}

impl RamSampler {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for RamSampler {
    fn default() -> Self {
        Self::new(PROC_MEMINFO)
    }
}

impl UsageProvider for RamSampler {
    fn sample(&mut self) -> u8 {
        match read_mem_info(&self.path) {
            Ok(mem) => ram_percent(mem),
            Err(e) => {
                log::warn!("{}", e);
                0
            }
        }
    }
}

/// Both gauges, sampled on a fixed cadence by the display loop.
pub struct Telemetry {
    cpu: Box<dyn UsageProvider>,
    ram: Box<dyn UsageProvider>,
    interval: Duration,
    last_sample: Option<Instant>,
}

impl Telemetry {
    pub fn new(
        cpu: Box<dyn UsageProvider>,
        ram: Box<dyn UsageProvider>,
        interval: Duration,
    ) -> Self {
        Self {
            cpu,
            ram,
            interval,
            last_sample: None,
        }
    }

    /// Procfs-backed gauges refreshed every `interval`.
    pub fn procfs(interval: Duration) -> Self {
        Self::new(
            Box::new(CpuSampler::default()),
            Box::new(RamSampler::default()),
            interval,
        )
    }

    /// Sample both providers if the interval has elapsed since the last
    /// sample. Returns `(cpu, ram)` when a sample was taken.
    pub fn refresh(&mut self, now: Instant) -> Option<(u8, u8)> {
        if let Some(last) = self.last_sample {
            if now.saturating_duration_since(last) < self.interval {
                return None;
            }
        }
        self.last_sample = Some(now);
        Some((self.cpu.sample(), self.ram.sample()))
    }
}
