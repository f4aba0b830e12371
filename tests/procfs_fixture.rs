#![cfg(target_os = "linux")]

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use ticktop::system::platform::linux::ProcfsSource;
use ticktop::system::sampler::Sampler;
use ticktop::system::snapshot::SortKey;
use ticktop::system::source::CounterSource;

fn stat_line(pid: u32, comm: &str, utime: u64, stime: u64, starttime: u64) -> String {
    format!(
        "{pid} ({comm}) S 1 {pid} {pid} 0 -1 4194560 100 0 0 0 {utime} {stime} 0 0 20 0 1 0 {starttime} 1000000 250 18446744073709551615\n"
    )
}

fn write_proc(root: &Path, pid: u32, stat: &str, status: Option<&str>, statm: Option<&str>) {
    let dir = root.join(pid.to_string());
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("stat"), stat).unwrap();
    if let Some(status) = status {
        fs::write(dir.join("status"), status).unwrap();
    }
    if let Some(statm) = statm {
        fs::write(dir.join("statm"), statm).unwrap();
    }
}

fn write_system(root: &Path, user: u64, idle: u64) {
    fs::write(
        root.join("stat"),
        format!("cpu  {user} 0 0 {idle} 0 0 0 0 0 0\ncpu0 {user} 0 0 {idle} 0 0 0 0 0 0\nintr 0\n"),
    )
    .unwrap();
    fs::write(
        root.join("meminfo"),
        "MemTotal:       16000000 kB\nMemFree:         1000000 kB\nMemAvailable:   12000000 kB\n",
    )
    .unwrap();
}

fn fixture() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_system(root, 100, 900);
    write_proc(
        root,
        1,
        &stat_line(1, "systemd", 150, 50, 1),
        Some("Name:\tsystemd\nVmRSS:\t   12000 kB\n"),
        None,
    );
    write_proc(
        root,
        42,
        &stat_line(42, "Web Content (x)", 600, 200, 777),
        Some("Name:\tWeb Content\nVmRSS:\t  320000 kB\n"),
        None,
    );
    // kernel thread: no VmRSS line
    write_proc(root, 2, &stat_line(2, "kthreadd", 0, 3, 1), Some("Name:\tkthreadd\n"), None);
    // status unreadable, statm fallback
    write_proc(root, 77, &stat_line(77, "sleepy", 1, 1, 50), None, Some("500 10 3 1 0 8 0\n"));
    // malformed stat
    write_proc(root, 88, "88 (broken", Some("VmRSS:\t 1 kB\n"), None);
    // non-pid entries are ignored
    fs::create_dir_all(root.join("self_not_numeric")).unwrap();
    fs::create_dir_all(root.join("sys")).unwrap();
    dir
}

#[test]
fn lists_numeric_directories_only() {
    let dir = fixture();
    let mut source = ProcfsSource::new(dir.path());
    assert_eq!(source.list_process_ids(), vec![1, 2, 42, 77, 88]);
}

#[test]
fn reads_process_counters() {
    let dir = fixture();
    let mut source = ProcfsSource::new(dir.path());

    let web = source.read_process_counters(42).unwrap();
    assert_eq!(web.name, "Web Content (x)");
    assert_eq!(web.cpu_ticks, 800);
    assert_eq!(web.resident_kb, 320_000);
    assert_eq!(web.start_time, Some(777));

    let kthread = source.read_process_counters(2).unwrap();
    assert_eq!(kthread.resident_kb, 0);

    let sleepy = source.read_process_counters(77).unwrap();
    assert!(sleepy.resident_kb >= 10);
    assert_eq!(sleepy.resident_kb % 10, 0);
}

#[test]
fn malformed_and_missing_processes_are_none() {
    let dir = fixture();
    let mut source = ProcfsSource::new(dir.path());
    assert!(source.read_process_counters(88).is_none());
    assert!(source.read_process_counters(12345).is_none());
}

#[test]
fn missing_system_files_are_reported_separately() {
    let dir = fixture();
    fs::remove_file(dir.path().join("meminfo")).unwrap();
    let mut source = ProcfsSource::new(dir.path());
    let system = source.read_system_counters();
    assert_eq!(system.cpu.map(|c| c.total()), Some(1000));
    assert!(system.memory.is_none());
}

#[test]
fn sampler_over_procfs_fixture() {
    let dir = fixture();
    let mut sampler = Sampler::new(ProcfsSource::new(dir.path()));
    let first = sampler.tick(SortKey::Cpu);
    assert_eq!(first.total_cpu_percent, 0.0);
    assert_eq!(first.total_mem_percent, 25.0);
    assert_eq!(first.processes.len(), 4);

    write_system(dir.path(), 150, 950);
    write_proc(
        dir.path(),
        42,
        &stat_line(42, "Web Content (x)", 610, 210, 777),
        Some("VmRSS:\t  320000 kB\n"),
        None,
    );
    // pid 1 exited and was reused by an unrelated process
    write_proc(
        dir.path(),
        1,
        &stat_line(1, "reborn", 5, 0, 9999),
        Some("VmRSS:\t 100 kB\n"),
        None,
    );

    let second = sampler.tick(SortKey::Cpu);
    assert_eq!(second.total_cpu_percent, 50.0);
    let web = second.processes.iter().find(|p| p.pid == 42).unwrap();
    assert_eq!(web.cpu_percent, 20.0);
    assert_eq!(web.mem_percent, 2.0);
    let reborn = second.processes.iter().find(|p| p.pid == 1).unwrap();
    assert_eq!(reborn.name, "reborn");
    assert_eq!(reborn.cpu_percent, 5.0);
    assert_eq!(second.processes[0].pid, 42);
}
