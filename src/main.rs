use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use color_eyre::Result;
use ticktop::action::Action;
use ticktop::app::App;
use ticktop::batch;
use ticktop::config::{self, load_config, load_config_from_path};
use ticktop::event::{ShutdownFlag, poll_keypress, tick_budget};
use ticktop::logging::init_file_logging;
use ticktop::system::platform::{SourceKind, open_source};
use ticktop::system::sampler::Sampler;
use ticktop::system::snapshot::SortKey;
use ticktop::system::source::CounterSource;
use ticktop::ui;

#[derive(Parser)]
#[command(
    name = "ticktop",
    about = "Live process monitor: system CPU/memory and a ranked process table"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial sort key
    #[arg(long, value_parser = ["cpu", "mem"])]
    sort: Option<String>,

    /// Refresh interval in milliseconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    interval: Option<u64>,

    /// Counter source: auto, procfs, sysinfo
    #[arg(long)]
    source: Option<String>,

    /// Root of the procfs mount (e.g. /host/proc inside a container)
    #[arg(long)]
    proc_root: Option<PathBuf>,

    /// Number of process rows to show
    #[arg(long)]
    rows: Option<usize>,

    /// Print this many snapshots as JSON lines instead of starting the TUI
    #[arg(long)]
    batch: Option<usize>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `ticktop=trace`
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_file_logging(path, &cli.log_level)?;
    }
    let config = load_config_for_cli(&cli);
    tracing::info!(
        interval_ms = config.general.refresh_rate_ms,
        sort = %config.general.default_sort,
        source = %config.general.source,
        "starting"
    );

    let shutdown = ShutdownFlag::default();
    shutdown.listen_for_signals();

    let source = open_source(
        SourceKind::from_str_config(&config.general.source),
        &config.general.proc_root,
    );
    let interval = Duration::from_millis(config.general.refresh_rate_ms);

    if let Some(ticks) = cli.batch {
        let mut sampler = Sampler::new(source);
        let sort_key = SortKey::from_str_config(&config.general.default_sort);
        return batch::run(
            &mut sampler,
            sort_key,
            interval,
            ticks,
            &shutdown,
            std::io::stdout().lock(),
        )
        .await;
    }

    // ratatui::init installs a panic hook that restores the terminal
    let mut terminal = ratatui::init();
    let result = run(&mut terminal, &config, source, interval, &shutdown).await;
    ratatui::restore();

    result
}

async fn run<S: CounterSource>(
    terminal: &mut ratatui::DefaultTerminal,
    config: &config::Config,
    source: S,
    interval: Duration,
    shutdown: &ShutdownFlag,
) -> Result<()> {
    let mut started = Instant::now();
    let mut app = App::new(config, source);

    while app.running && !shutdown.is_set() {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        let action = poll_keypress(&app.keybinds)?;
        app.dispatch(action);
        if !app.running {
            break;
        }
        if matches!(action, Action::SortBy(_)) {
            terminal.draw(|frame| ui::draw(frame, &app))?;
        }

        tokio::time::sleep(tick_budget(interval, started.elapsed())).await;
        started = Instant::now();
        app.refresh_data();
    }

    tracing::info!(ticks = app.ticks, "stopped");
    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> config::Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(rate) = cli.interval {
        config.general.refresh_rate_ms = rate;
    }
    if let Some(ref sort) = cli.sort {
        config.general.default_sort = sort.clone();
    }
    if let Some(ref source) = cli.source {
        config.general.source = source.clone();
    }
    if let Some(ref root) = cli.proc_root {
        config.general.proc_root = root.clone();
    }
    if let Some(rows) = cli.rows {
        config.general.max_rows = rows;
    }

    config
}
