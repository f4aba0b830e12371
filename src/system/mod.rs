pub mod counters;
pub mod platform;
pub mod rates;
pub mod sampler;
pub mod snapshot;
pub mod source;
pub mod sysinfo_source;
