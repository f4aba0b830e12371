use std::collections::HashMap;

use super::counters::{CpuTicks, RawProcessCounters};
use super::rates::{cpu_busy_percent, elapsed_ticks, memory_used_percent, share_percent};
use super::snapshot::{MetricsSnapshot, ProcessMetrics, SortKey};
use super::source::{CounterSource, RawPull};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProcessBaseline {
    pub cpu_ticks: u64,
    pub start_time: Option<u64>,
}

impl ProcessBaseline {
    /// Ticks to diff against, or zero when `cur` is evidently a different
    /// process that inherited the PID.
    fn ticks_for(&self, cur: &RawProcessCounters) -> u64 {
        let restarted = matches!(
            (self.start_time, cur.start_time),
            (Some(prev), Some(now)) if prev != now
        );
        if restarted || cur.cpu_ticks < self.cpu_ticks {
            0
        } else {
            self.cpu_ticks
        }
    }
}

/// The previous tick, as needed to turn cumulative counters into rates.
#[derive(Clone, Debug, Default)]
pub struct SamplerState {
    cpu: Option<CpuTicks>,
    processes: HashMap<u32, ProcessBaseline>,
}

impl SamplerState {
    pub fn is_primed(&self) -> bool {
        self.cpu.is_some()
    }

    pub fn baseline(&self, pid: u32) -> Option<&ProcessBaseline> {
        self.processes.get(&pid)
    }

    /// Consume the previous tick and a fresh pull; return the next state and
    /// the snapshot for this tick.
    ///
    /// A PID seen for the first time is diffed against zero, so its first
    /// figure is a lifetime average rather than an instantaneous rate.
    pub fn advance(self, pull: RawPull, sort_key: SortKey) -> (SamplerState, MetricsSnapshot) {
        let _span = tracing::debug_span!("sampler.tick", processes = pull.processes.len()).entered();

        let (total_cpu_percent, total_delta) = match (&self.cpu, &pull.system.cpu) {
            (Some(prev), Some(cur)) => (cpu_busy_percent(prev, cur), elapsed_ticks(prev, cur)),
            _ => (0.0, 0),
        };
        if pull.system.cpu.is_none() {
            tracing::warn!("system CPU counters unavailable; reporting 0% CPU");
        }

        let (total_mem_percent, mem_total_kb, mem_used_kb) = match &pull.system.memory {
            Some(mem) => (memory_used_percent(mem), mem.total_kb, mem.used_kb()),
            None => {
                tracing::warn!("memory counters unavailable; reporting 0% memory");
                (0.0, 0, 0)
            }
        };

        let mut rows = Vec::with_capacity(pull.processes.len());
        let mut next = HashMap::with_capacity(pull.processes.len());
        for raw in pull.processes {
            let prev_ticks = self
                .processes
                .get(&raw.pid)
                .map_or(0, |baseline| baseline.ticks_for(&raw));
            let cpu_percent = share_percent(raw.cpu_ticks.saturating_sub(prev_ticks), total_delta);
            let mem_percent = share_percent(raw.resident_kb, mem_total_kb).min(100.0);

            next.insert(
                raw.pid,
                ProcessBaseline {
                    cpu_ticks: raw.cpu_ticks,
                    start_time: raw.start_time,
                },
            );
            rows.push(ProcessMetrics {
                pid: raw.pid,
                name: raw.name,
                cpu_percent,
                mem_percent,
                resident_kb: raw.resident_kb,
            });
        }
        rows.sort_by(|a, b| sort_key.compare(a, b));

        tracing::debug!(
            cpu = total_cpu_percent,
            mem = total_mem_percent,
            live = rows.len(),
            dropped = pull.dropped,
            "tick complete"
        );

        let snapshot = MetricsSnapshot {
            total_cpu_percent,
            total_mem_percent,
            mem_total_kb,
            mem_used_kb,
            sort_key,
            processes: rows,
        };
        let state = SamplerState {
            cpu: pull.system.cpu,
            processes: next,
        };
        (state, snapshot)
    }
}

/// Drives a [`CounterSource`] one tick at a time.
pub struct Sampler<S> {
    source: S,
    state: SamplerState,
}

impl<S> Sampler<S> {
    pub fn new(source: S) -> Self {
        Sampler {
            source,
            state: SamplerState::default(),
        }
    }

    pub fn state(&self) -> &SamplerState {
        &self.state
    }
}

impl<S: CounterSource> Sampler<S> {
    pub fn tick(&mut self, sort_key: SortKey) -> MetricsSnapshot {
        let pull = RawPull::collect(&mut self.source);
        let (state, snapshot) = std::mem::take(&mut self.state).advance(pull, sort_key);
        self.state = state;
        snapshot
    }
}
