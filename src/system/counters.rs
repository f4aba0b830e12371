/// Cumulative system CPU time since boot, one field per `/proc/stat` category.
///
/// All fields share the same tick unit as [`RawProcessCounters::cpu_ticks`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CpuTicks {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
}

impl CpuTicks {
    pub fn total(&self) -> u64 {
        self.user
            .saturating_add(self.nice)
            .saturating_add(self.system)
            .saturating_add(self.idle)
            .saturating_add(self.iowait)
            .saturating_add(self.irq)
            .saturating_add(self.softirq)
            .saturating_add(self.steal)
    }

    pub fn idle_total(&self) -> u64 {
        self.idle.saturating_add(self.iowait)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryCounters {
    pub total_kb: u64,
    pub free_kb: u64,
    /// `None` on kernels that predate `MemAvailable`.
    pub available_kb: Option<u64>,
}

impl MemoryCounters {
    pub fn used_kb(&self) -> u64 {
        let reclaimable = self.available_kb.unwrap_or(self.free_kb);
        self.total_kb.saturating_sub(reclaimable)
    }
}

/// System-wide counters for one tick. Each half is `None` when its source
/// could not be read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawSystemCounters {
    pub cpu: Option<CpuTicks>,
    pub memory: Option<MemoryCounters>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawProcessCounters {
    pub pid: u32,
    pub name: String,
    /// User plus system time, cumulative for the life of this process.
    pub cpu_ticks: u64,
    pub resident_kb: u64,
    /// Process start time in the source's own unit; used to spot PID reuse.
    pub start_time: Option<u64>,
}
