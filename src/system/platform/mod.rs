use std::path::Path;

use super::source::CounterSource;
use super::sysinfo_source::SysinfoSource;

#[cfg(target_os = "linux")]
pub mod linux;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Auto,
    Procfs,
    Sysinfo,
}

impl SourceKind {
    pub fn from_str_config(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "procfs" | "proc" => SourceKind::Procfs,
            "sysinfo" => SourceKind::Sysinfo,
            _ => SourceKind::Auto,
        }
    }
}

/// Pick a counter source for this platform. procfs is only available on Linux;
/// asking for it elsewhere falls back to sysinfo.
pub fn open_source(kind: SourceKind, proc_root: &Path) -> Box<dyn CounterSource> {
    match kind {
        SourceKind::Sysinfo => Box::new(SysinfoSource::new()),
        SourceKind::Auto | SourceKind::Procfs => procfs_or_fallback(kind, proc_root),
    }
}

#[cfg(target_os = "linux")]
fn procfs_or_fallback(_kind: SourceKind, proc_root: &Path) -> Box<dyn CounterSource> {
    Box::new(linux::ProcfsSource::new(proc_root))
}

#[cfg(not(target_os = "linux"))]
fn procfs_or_fallback(kind: SourceKind, _proc_root: &Path) -> Box<dyn CounterSource> {
    if kind == SourceKind::Procfs {
        tracing::warn!("procfs source requested on a non-Linux platform; using sysinfo");
    }
    Box::new(SysinfoSource::new())
}
