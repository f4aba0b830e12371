use super::counters::{RawProcessCounters, RawSystemCounters};

/// Where raw counters come from. Implementations must treat a process that
/// vanished, is unreadable, or has garbled data as a plain `None`.
pub trait CounterSource {
    /// Best-effort; processes exiting mid-enumeration may be missing.
    fn list_process_ids(&mut self) -> Vec<u32>;
    fn read_process_counters(&mut self, pid: u32) -> Option<RawProcessCounters>;
    fn read_system_counters(&mut self) -> RawSystemCounters;
}

impl<S: CounterSource + ?Sized> CounterSource for Box<S> {
    fn list_process_ids(&mut self) -> Vec<u32> {
        (**self).list_process_ids()
    }

    fn read_process_counters(&mut self, pid: u32) -> Option<RawProcessCounters> {
        (**self).read_process_counters(pid)
    }

    fn read_system_counters(&mut self) -> RawSystemCounters {
        (**self).read_system_counters()
    }
}

/// Everything read from a source for one tick.
#[derive(Clone, Debug, Default)]
pub struct RawPull {
    pub system: RawSystemCounters,
    pub processes: Vec<RawProcessCounters>,
    /// Identifiers that were listed but could not be read.
    pub dropped: usize,
}

impl RawPull {
    pub fn collect<S: CounterSource + ?Sized>(source: &mut S) -> Self {
        let system = source.read_system_counters();
        let pids = source.list_process_ids();
        let mut processes = Vec::with_capacity(pids.len());
        let mut dropped = 0;
        for pid in pids {
            match source.read_process_counters(pid) {
                Some(counters) => processes.push(counters),
                None => {
                    tracing::trace!(pid, "process vanished or unreadable; skipped");
                    dropped += 1;
                }
            }
        }
        RawPull {
            system,
            processes,
            dropped,
        }
    }
}
