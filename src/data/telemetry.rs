//! Raw counters read from the kernel for the CPU and RAM gauges.

/// Cumulative CPU tick counters from the aggregate `cpu` line of `/proc/stat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CpuTicks {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
}

impl CpuTicks {
    /// Parse the first `cpu ` line of a `/proc/stat` dump.
    pub fn parse(stat: &str) -> Option<Self> {
        let line = stat.lines().find(|l| l.starts_with("cpu "))?;
        let mut fields = line.split_whitespace().skip(1).map(|f| f.parse::<u64>());
        let mut next = || fields.next()?.ok();
        Some(Self {
            user: next()?,
            nice: next()?,
            system: next()?,
            idle: next()?,
        })
    }

    /// Ticks spent in user, low-priority and system mode.
    pub fn busy(&self) -> u64 {
        self.user.saturating_add(self.nice).saturating_add(self.system)
    }
}

/// Memory totals from `/proc/meminfo`, in the file's unit (kB).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemInfo {
    pub total: u64,
    pub available: u64,
}

impl MemInfo {
    /// Parse `MemTotal` and `MemAvailable` out of a `/proc/meminfo` dump.
    pub fn parse(meminfo: &str) -> Option<Self> {
        let mut total = None;
        let mut available = None;
        for line in meminfo.lines() {
            let mut parts = line.split_whitespace();
            match parts.next() {
                Some("MemTotal:") => total = parts.next().and_then(|v| v.parse().ok()),
                Some("MemAvailable:") => available = parts.next().and_then(|v| v.parse().ok()),
                _ => continue,
            }
            if total.is_some() && available.is_some() {
                break;
            }
        }
        Some(Self {
            total: total?,
            available: available?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAT: &str = "cpu  4705 356 584 3699 23 0 12 0 0 0\n\
                        cpu0 1393 32 292 1799 11 0 5 0 0 0\n\
                        intr 114930548 113199788 3 0 5\n";

    #[test]
    fn test_parse_cpu_line() {
        let ticks = CpuTicks::parse(STAT).unwrap();
        assert_eq!(
            ticks,
            CpuTicks {
                user: 4705,
                nice: 356,
                system: 584,
                idle: 3699
            }
        );
        assert_eq!(ticks.busy(), 4705 + 356 + 584);
    }

    #[test]
    fn test_parse_cpu_ignores_per_core_lines() {
        let stat = "cpu0 1 2 3 4\ncpu 10 20 30 40\n";
        assert_eq!(CpuTicks::parse(stat).unwrap().user, 10);
    }

    #[test]
    fn test_parse_cpu_rejects_garbage() {
        assert!(CpuTicks::parse("").is_none());
        assert!(CpuTicks::parse("cpu a b c d").is_none());
        assert!(CpuTicks::parse("cpu 1 2 3").is_none());
    }

    #[test]
    fn test_parse_meminfo() {
        let meminfo = "MemTotal:       16318412 kB\n\
                       MemFree:         1037588 kB\n\
                       MemAvailable:    9231340 kB\n\
                       Buffers:          400496 kB\n";
        let mem = MemInfo::parse(meminfo).unwrap();
        assert_eq!(mem.total, 16318412);
        assert_eq!(mem.available, 9231340);
    }

    #[test]
    fn test_parse_meminfo_missing_available() {
        assert!(MemInfo::parse("MemTotal: 1000 kB\nMemFree: 10 kB\n").is_none());
    }
}
