use std::time::Instant;

use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

use super::counters::{CpuTicks, MemoryCounters, RawProcessCounters, RawSystemCounters};
use super::source::CounterSource;

/// Portable source backed by `sysinfo`.
///
/// sysinfo reports process CPU as accumulated milliseconds but the system only
/// as a usage ratio, so system ticks are integrated here in milliseconds of
/// capacity (wall time times core count) to keep both sides in one unit.
pub struct SysinfoSource {
    sys: System,
    last_refresh: Option<Instant>,
    busy_ms: u64,
    idle_ms: u64,
}

impl Default for SysinfoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoSource {
    pub fn new() -> Self {
        SysinfoSource {
            sys: System::new(),
            last_refresh: None,
            busy_ms: 0,
            idle_ms: 0,
        }
    }

    fn integrate_cpu(&mut self) -> Option<CpuTicks> {
        self.sys.refresh_cpu_all();
        let cores = self.sys.cpus().len() as u64;
        if cores == 0 {
            return None;
        }
        let now = Instant::now();
        if let Some(last) = self.last_refresh {
            let capacity_ms = (now.duration_since(last).as_millis() as u64).saturating_mul(cores);
            let usage = f64::from(self.sys.global_cpu_usage()).clamp(0.0, 100.0);
            let busy = (capacity_ms as f64 * usage / 100.0).round() as u64;
            self.busy_ms = self.busy_ms.saturating_add(busy.min(capacity_ms));
            self.idle_ms = self
                .idle_ms
                .saturating_add(capacity_ms.saturating_sub(busy));
        }
        self.last_refresh = Some(now);
        Some(CpuTicks {
            user: self.busy_ms,
            idle: self.idle_ms,
            ..CpuTicks::default()
        })
    }
}

impl CounterSource for SysinfoSource {
    fn list_process_ids(&mut self) -> Vec<u32> {
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_memory().with_cpu(),
        );
        let mut pids: Vec<u32> = self.sys.processes().keys().map(|p| p.as_u32()).collect();
        pids.sort_unstable();
        pids
    }

    fn read_process_counters(&mut self, pid: u32) -> Option<RawProcessCounters> {
        let process = self.sys.process(Pid::from_u32(pid))?;
        Some(RawProcessCounters {
            pid,
            name: process.name().to_string_lossy().to_string(),
            cpu_ticks: process.accumulated_cpu_time(),
            resident_kb: process.memory() / 1024,
            start_time: Some(process.start_time()),
        })
    }

    fn read_system_counters(&mut self) -> RawSystemCounters {
        self.sys.refresh_memory();
        let total = self.sys.total_memory();
        let memory = (total > 0).then(|| MemoryCounters {
            total_kb: total / 1024,
            free_kb: self.sys.free_memory() / 1024,
            available_kb: Some(self.sys.available_memory() / 1024),
        });
        RawSystemCounters {
            cpu: self.integrate_cpu(),
            memory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_and_reads_current_process() {
        let mut source = SysinfoSource::new();
        let pid = std::process::id();
        assert!(source.list_process_ids().contains(&pid));
        let counters = source.read_process_counters(pid).expect("own process readable");
        assert_eq!(counters.pid, pid);
        assert!(counters.resident_kb > 0);
    }

    #[test]
    fn synthesized_ticks_never_decrease() {
        let mut source = SysinfoSource::new();
        let first = source.read_system_counters().cpu.expect("cpu list populated");
        std::thread::sleep(std::time::Duration::from_millis(20));
        let second = source.read_system_counters().cpu.expect("cpu list populated");
        assert!(second.total() >= first.total());
        assert!(second.idle_total() >= first.idle_total());
    }

    #[test]
    fn unknown_pid_is_none() {
        let mut source = SysinfoSource::new();
        source.list_process_ids();
        assert!(source.read_process_counters(u32::MAX).is_none());
    }
}
