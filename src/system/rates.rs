//! Percentage arithmetic shared by the system and per-process figures.
//!
//! Every function here returns a finite value `>= 0.0`. Anything that would
//! divide by zero or produce NaN resolves to `0.0`.

use super::counters::{CpuTicks, MemoryCounters};

/// `100 * part / whole`, or `0.0` when `whole` is zero.
pub fn share_percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    finite_or_zero(100.0 * part as f64 / whole as f64)
}

/// Busy share of the elapsed CPU capacity between two samples.
pub fn cpu_busy_percent(prev: &CpuTicks, cur: &CpuTicks) -> f64 {
    let total_delta = elapsed_ticks(prev, cur);
    let idle_delta = cur.idle_total().saturating_sub(prev.idle_total());
    share_percent(total_delta.saturating_sub(idle_delta), total_delta).clamp(0.0, 100.0)
}

/// Elapsed capacity between two samples; zero when the counters went backwards.
pub fn elapsed_ticks(prev: &CpuTicks, cur: &CpuTicks) -> u64 {
    cur.total().saturating_sub(prev.total())
}

pub fn memory_used_percent(mem: &MemoryCounters) -> f64 {
    share_percent(mem.used_kb(), mem.total_kb).clamp(0.0, 100.0)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
