use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEventKind};

use crate::action::Action;
use crate::app::ResolvedKeybinds;

/// Drain every pending terminal event without blocking and fold the key
/// presses into one action.
pub fn poll_keypress(keybinds: &ResolvedKeybinds) -> Result<Action> {
    let mut pressed = Vec::new();
    while event::poll(Duration::ZERO)? {
        if let CrosstermEvent::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            pressed.push(keybinds.map_key(key));
        }
    }
    Ok(fold_actions(pressed))
}

/// A quit anywhere in the backlog wins; otherwise the most recent sort
/// request does.
pub fn fold_actions(actions: impl IntoIterator<Item = Action>) -> Action {
    let mut folded = Action::None;
    for action in actions {
        match action {
            Action::Quit => return Action::Quit,
            Action::None => {}
            other => folded = other,
        }
    }
    folded
}

/// How long to sleep after a tick that took `elapsed`. An overrun tick gets
/// no sleep and no catch-up.
pub fn tick_budget(interval: Duration, elapsed: Duration) -> Duration {
    interval.saturating_sub(elapsed)
}

/// Set by SIGINT/SIGTERM, checked once per loop iteration.
#[derive(Clone, Debug, Default)]
pub struct ShutdownFlag(Arc<AtomicBool>);

impl ShutdownFlag {
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn set(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Spawn signal listeners on the current runtime. They only run while the
    /// tick loop is parked in its sleep.
    pub fn listen_for_signals(&self) {
        let flag = self.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("interrupt received; shutting down");
                flag.set();
            }
        });

        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};

            let flag = self.clone();
            match signal(SignalKind::terminate()) {
                Ok(mut term) => {
                    tokio::spawn(async move {
                        if term.recv().await.is_some() {
                            tracing::info!("SIGTERM received; shutting down");
                            flag.set();
                        }
                    });
                }
                Err(err) => tracing::warn!(%err, "cannot listen for SIGTERM"),
            }
        }
    }
}
