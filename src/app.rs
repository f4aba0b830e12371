use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::Action;
use crate::config::{Config, KeybindsConfig, parse_key};
use crate::system::sampler::Sampler;
use crate::system::snapshot::{MetricsSnapshot, ProcessMetrics, SortKey};
use crate::system::source::CounterSource;
use crate::ui::theme::Theme;

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub sort_cpu: KeyCode,
    pub sort_memory: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            sort_cpu: parse_key(&kb.sort_cpu).unwrap_or(KeyCode::Char('c')),
            sort_memory: parse_key(&kb.sort_memory).unwrap_or(KeyCode::Char('m')),
        }
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits; raw mode swallows SIGINT
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        if key.code == self.quit {
            Action::Quit
        } else if key.code == self.sort_cpu {
            Action::SortBy(SortKey::Cpu)
        } else if key.code == self.sort_memory {
            Action::SortBy(SortKey::Memory)
        } else {
            Action::None
        }
    }

    /// (key_label, description) pairs for the status bar.
    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        vec![
            (key_label(self.sort_cpu), "CPU sort"),
            (key_label(self.sort_memory), "MEM sort"),
            (key_label(self.quit), "Quit"),
        ]
    }
}

fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        KeyCode::Delete => "Del".to_string(),
        _ => "?".to_string(),
    }
}

pub struct App<S> {
    pub running: bool,
    pub sampler: Sampler<S>,
    pub snapshot: MetricsSnapshot,
    pub sort_key: SortKey,
    pub keybinds: ResolvedKeybinds,
    pub theme: Theme,
    pub max_rows: usize,
    pub name_width: usize,
    pub ticks: u64,
}

impl<S: CounterSource> App<S> {
    /// Builds the app and takes the priming sample, which always shows 0% CPU.
    pub fn new(config: &Config, source: S) -> Self {
        let sort_key = SortKey::from_str_config(&config.general.default_sort);
        let mut app = App {
            running: true,
            sampler: Sampler::new(source),
            snapshot: MetricsSnapshot::default(),
            sort_key,
            keybinds: ResolvedKeybinds::from_config(&config.keybinds),
            theme: Theme::from_config(&config.colors.theme),
            max_rows: config.general.max_rows,
            name_width: config.general.name_width,
            ticks: 0,
        };
        app.refresh_data();
        app
    }

    pub fn refresh_data(&mut self) {
        self.snapshot = self.sampler.tick(self.sort_key);
        self.ticks += 1;
    }
}

impl<S> App<S> {
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::SortBy(key) => {
                if key != self.sort_key {
                    self.sort_key = key;
                    self.snapshot.resort(key);
                }
            }
            Action::None => {}
        }
    }

    /// The rows that fit on one page of the table.
    pub fn visible_rows(&self) -> &[ProcessMetrics] {
        let end = self.snapshot.processes.len().min(self.max_rows);
        &self.snapshot.processes[..end]
    }
}
