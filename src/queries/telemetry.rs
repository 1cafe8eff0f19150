//! Utilisation percentages derived from kernel counters.

use crate::data::telemetry::{CpuTicks, MemInfo};

/// CPU utilisation between two samples.
///
/// The caller threads `current` back in as `previous` on the next call.
/// With no previous sample the result is 0.
pub fn cpu_percent(previous: Option<CpuTicks>, current: CpuTicks) -> u8 {
    let Some(previous) = previous else {
        return 0;
    };
    // Counters only move forward; a reset reads as no activity.
    let busy = current.busy().saturating_sub(previous.busy());
    let idle = current.idle.saturating_sub(previous.idle);
    percent(busy, busy.saturating_add(idle))
}

/// Share of memory in use, as an absolute snapshot.
pub fn ram_percent(mem: MemInfo) -> u8 {
    percent(mem.total.saturating_sub(mem.available), mem.total)
}

fn percent(part: u64, whole: u64) -> u8 {
    if whole == 0 {
        return 0;
    }
    (u128::from(part) * 100 / u128::from(whole)).min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticks(user: u64, nice: u64, system: u64, idle: u64) -> CpuTicks {
        CpuTicks {
            user,
            nice,
            system,
            idle,
        }
    }

    #[test]
    fn test_first_sample_is_zero() {
        assert_eq!(cpu_percent(None, ticks(100, 5, 50, 900)), 0);
    }

    #[test]
    fn test_idle_only_advance_is_zero() {
        let prev = ticks(100, 5, 50, 900);
        assert_eq!(cpu_percent(Some(prev), ticks(100, 5, 50, 1400)), 0);
    }

    #[test]
    fn test_busy_only_advance_is_hundred() {
        let prev = ticks(100, 5, 50, 900);
        assert_eq!(cpu_percent(Some(prev), ticks(160, 25, 70, 900)), 100);
    }

    #[test]
    fn test_mixed_advance() {
        let prev = ticks(0, 0, 0, 0);
        // 30 busy out of 120 total
        assert_eq!(cpu_percent(Some(prev), ticks(20, 0, 10, 90)), 25);
    }

    #[test]
    fn test_no_advance_is_zero() {
        let t = ticks(1, 2, 3, 4);
        assert_eq!(cpu_percent(Some(t), t), 0);
    }

    #[test]
    fn test_threaded_history() {
        let history = [
            ticks(0, 0, 0, 0),
            ticks(0, 0, 0, 100),
            ticks(50, 0, 50, 100),
        ];
        let mut previous = None;
        let mut readings = Vec::new();
        for sample in history {
            readings.push(cpu_percent(previous, sample));
            previous = Some(sample);
        }
        assert_eq!(readings, vec![0, 0, 100]);
    }

    #[test]
    fn test_huge_counters_do_not_overflow() {
        let prev = ticks(0, 0, 0, 0);
        let half = u64::MAX / 2;
        assert_eq!(cpu_percent(Some(prev), ticks(half, 0, 0, half)), 50);

        let pegged = ticks(u64::MAX, 1, 1, 0);
        assert_eq!(pegged.busy(), u64::MAX);
        assert_eq!(cpu_percent(Some(prev), pegged), 100);
    }

    #[test]
    fn test_ram_percent() {
        let mem = MemInfo {
            total: 1000,
            available: 250,
        };
        assert_eq!(ram_percent(mem), 75);
    }

    #[test]
    fn test_ram_percent_zero_total() {
        assert_eq!(ram_percent(MemInfo::default()), 0);
    }
}
