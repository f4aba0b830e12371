use std::cmp::Ordering;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Cpu,
    #[serde(rename = "mem")]
    Memory,
}

impl SortKey {
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Cpu => "CPU",
            SortKey::Memory => "MEM",
        }
    }

    pub fn from_str_config(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "mem" | "memory" => SortKey::Memory,
            _ => SortKey::Cpu,
        }
    }

    /// Descending by the key's percentage, then ascending PID.
    pub fn compare(self, a: &ProcessMetrics, b: &ProcessMetrics) -> Ordering {
        let by_key = match self {
            SortKey::Cpu => b.cpu_percent.total_cmp(&a.cpu_percent),
            SortKey::Memory => b.mem_percent.total_cmp(&a.mem_percent),
        };
        by_key.then_with(|| a.pid.cmp(&b.pid))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProcessMetrics {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f64,
    pub mem_percent: f64,
    pub resident_kb: u64,
}

/// Output of one tick. Replaced wholesale on the next tick.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub total_cpu_percent: f64,
    pub total_mem_percent: f64,
    pub mem_total_kb: u64,
    pub mem_used_kb: u64,
    pub sort_key: SortKey,
    pub processes: Vec<ProcessMetrics>,
}

impl MetricsSnapshot {
    /// Re-rank the rows without resampling, e.g. after a sort keypress.
    pub fn resort(&mut self, key: SortKey) {
        self.sort_key = key;
        self.processes.sort_by(|a, b| key.compare(a, b));
    }
}
