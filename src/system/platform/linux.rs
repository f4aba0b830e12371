use std::fs;
use std::path::PathBuf;

use crate::system::counters::{CpuTicks, MemoryCounters, RawProcessCounters, RawSystemCounters};
use crate::system::source::CounterSource;

/// Reads counters straight out of a procfs mount.
pub struct ProcfsSource {
    root: PathBuf,
    page_size_kb: u64,
}

impl Default for ProcfsSource {
    fn default() -> Self {
        Self::new("/proc")
    }
}

impl ProcfsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ProcfsSource {
            root: root.into(),
            page_size_kb: page_size_kb(),
        }
    }

    fn read_rss_kb(&self, pid: u32) -> Option<u64> {
        let pid_dir = self.root.join(pid.to_string());
        match fs::read_to_string(pid_dir.join("status")) {
            // Kernel threads have no VmRSS line at all.
            Ok(status) => Some(parse_vm_rss_kb(&status).unwrap_or(0)),
            Err(_) => {
                let statm = fs::read_to_string(pid_dir.join("statm")).ok()?;
                let pages: u64 = statm.split_whitespace().nth(1)?.parse().ok()?;
                Some(pages.saturating_mul(self.page_size_kb))
            }
        }
    }
}

impl CounterSource for ProcfsSource {
    fn list_process_ids(&mut self) -> Vec<u32> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(root = %self.root.display(), %err, "cannot enumerate processes");
                return Vec::new();
            }
        };
        let mut pids: Vec<u32> = entries
            .flatten()
            .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .filter_map(|entry| {
                let name = entry.file_name();
                let name = name.to_str()?;
                if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                name.parse().ok()
            })
            .collect();
        pids.sort_unstable();
        pids
    }

    fn read_process_counters(&mut self, pid: u32) -> Option<RawProcessCounters> {
        let stat_path = self.root.join(pid.to_string()).join("stat");
        let contents = fs::read_to_string(&stat_path).ok()?;
        let Some(stat) = parse_pid_stat(&contents) else {
            tracing::debug!(pid, "malformed stat record; skipped");
            return None;
        };
        let resident_kb = self.read_rss_kb(pid)?;
        Some(RawProcessCounters {
            pid,
            name: stat.comm,
            cpu_ticks: stat.utime.saturating_add(stat.stime),
            resident_kb,
            start_time: Some(stat.starttime),
        })
    }

    fn read_system_counters(&mut self) -> RawSystemCounters {
        let cpu = fs::read_to_string(self.root.join("stat"))
            .ok()
            .and_then(|s| parse_cpu_line(&s));
        let memory = fs::read_to_string(self.root.join("meminfo"))
            .ok()
            .and_then(|s| parse_meminfo(&s));
        RawSystemCounters { cpu, memory }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct PidStat {
    comm: String,
    utime: u64,
    stime: u64,
    starttime: u64,
}

fn parse_pid_stat(contents: &str) -> Option<PidStat> {
    // comm may contain spaces and parens, so anchor on the first '(' and last ')'
    let open = contents.find('(')?;
    let close = contents.rfind(')')?;
    if close <= open {
        return None;
    }
    let comm = contents[open + 1..close].to_string();
    let fields: Vec<&str> = contents[close + 1..].split_whitespace().collect();
    // Fields after comm: state(0) ppid(1) pgrp(2) session(3) tty_nr(4)
    // tpgid(5) flags(6) minflt(7) cminflt(8) majflt(9) cmajflt(10)
    // utime(11) stime(12) cutime(13) cstime(14) priority(15) nice(16)
    // num_threads(17) itrealvalue(18) starttime(19)
    Some(PidStat {
        comm,
        utime: fields.get(11)?.parse().ok()?,
        stime: fields.get(12)?.parse().ok()?,
        starttime: fields.get(19)?.parse().ok()?,
    })
}

fn parse_cpu_line(stat: &str) -> Option<CpuTicks> {
    let line = stat.lines().find(|l| l.starts_with("cpu "))?;
    let mut cols = line
        .split_whitespace()
        .skip(1)
        .map(|v| v.parse::<u64>().ok());
    let mut next = || cols.next().flatten();
    Some(CpuTicks {
        user: next()?,
        nice: next()?,
        system: next()?,
        idle: next()?,
        iowait: next()?,
        irq: next()?,
        softirq: next()?,
        // Absent before 2.6.11.
        steal: next().unwrap_or(0),
    })
}

fn parse_meminfo(meminfo: &str) -> Option<MemoryCounters> {
    let mut total = None;
    let mut free = None;
    let mut available = None;
    for line in meminfo.lines() {
        let mut parts = line.split_whitespace();
        let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
            continue;
        };
        let Ok(value) = value.parse::<u64>() else {
            continue;
        };
        match key {
            "MemTotal:" => total = Some(value),
            "MemFree:" => free = Some(value),
            "MemAvailable:" => available = Some(value),
            _ => {}
        }
    }
    Some(MemoryCounters {
        total_kb: total?,
        free_kb: free.unwrap_or(0),
        available_kb: available,
    })
}

fn parse_vm_rss_kb(status: &str) -> Option<u64> {
    status
        .lines()
        .find_map(|line| line.strip_prefix("VmRSS:"))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|kb| kb.parse().ok())
}

fn page_size_kb() -> u64 {
    let bytes = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if bytes > 0 { bytes as u64 / 1024 } else { 4 }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAT_LINE: &str = "1234 (tmux: server) S 1 1234 1234 0 -1 4194560 2207 0 0 0 \
                             117 42 0 0 20 0 1 0 9001 10350592 1024 18446744073709551615";

    #[test]
    fn pid_stat_extracts_times_and_comm() {
        let stat = parse_pid_stat(STAT_LINE).unwrap();
        assert_eq!(stat.comm, "tmux: server");
        assert_eq!(stat.utime, 117);
        assert_eq!(stat.stime, 42);
        assert_eq!(stat.starttime, 9001);
    }

    #[test]
    fn pid_stat_comm_with_closing_paren() {
        let line = STAT_LINE.replace("(tmux: server)", "(evil) (name)");
        let stat = parse_pid_stat(&line).unwrap();
        assert_eq!(stat.comm, "evil) (name");
        assert_eq!(stat.utime, 117);
    }

    #[test]
    fn pid_stat_truncated_is_rejected() {
        assert!(parse_pid_stat("1 (init) S 0 1 1").is_none());
        assert!(parse_pid_stat("garbage").is_none());
    }

    #[test]
    fn cpu_line_without_steal_column() {
        let ticks = parse_cpu_line("cpu  10 20 30 40 50 60 70\ncpu0 1 2 3 4 5 6 7\n").unwrap();
        assert_eq!(ticks.user, 10);
        assert_eq!(ticks.softirq, 70);
        assert_eq!(ticks.steal, 0);
        assert_eq!(ticks.total(), 280);
    }

    #[test]
    fn cpu_line_missing_is_none() {
        assert!(parse_cpu_line("intr 1 2 3\nctxt 99\n").is_none());
        assert!(parse_cpu_line("cpu  10 x 30 40 50 60 70 80\n").is_none());
    }

    #[test]
    fn meminfo_fields() {
        let mem = parse_meminfo(
            "MemTotal:       16000000 kB\nMemFree:         2000000 kB\nMemAvailable:   12000000 kB\n",
        )
        .unwrap();
        assert_eq!(mem.total_kb, 16_000_000);
        assert_eq!(mem.free_kb, 2_000_000);
        assert_eq!(mem.available_kb, Some(12_000_000));

        assert!(parse_meminfo("MemFree: 10 kB\n").is_none());
    }

    #[test]
    fn vm_rss_line() {
        let status = "Name:\tbash\nVmPeak:\t  9000 kB\nVmRSS:\t  5120 kB\nThreads:\t1\n";
        assert_eq!(parse_vm_rss_kb(status), Some(5120));
        assert_eq!(parse_vm_rss_kb("Name:\tkthreadd\n"), None);
    }
}
