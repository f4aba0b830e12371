use std::io::Write;
use std::time::{Duration, Instant};

use color_eyre::Result;

use crate::event::{ShutdownFlag, tick_budget};
use crate::system::sampler::Sampler;
use crate::system::snapshot::SortKey;
use crate::system::source::CounterSource;

/// Headless mode: `ticks` samples, one JSON object per line on `out`.
pub async fn run<S, W>(
    sampler: &mut Sampler<S>,
    sort_key: SortKey,
    interval: Duration,
    ticks: usize,
    shutdown: &ShutdownFlag,
    mut out: W,
) -> Result<()>
where
    S: CounterSource,
    W: Write,
{
    for n in 0..ticks {
        if shutdown.is_set() {
            break;
        }
        let started = Instant::now();
        let snapshot = sampler.tick(sort_key);
        serde_json::to_writer(&mut out, &snapshot)?;
        out.write_all(b"\n")?;
        out.flush()?;

        if n + 1 < ticks {
            tokio::time::sleep(tick_budget(interval, started.elapsed())).await;
        }
    }
    Ok(())
}
