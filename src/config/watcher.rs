//! Mapping document watcher for hot reload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_rule_set;
use crate::mapping::RuleSet;

/// Watches one mapping document and delivers a freshly compiled
/// [`RuleSet`] after every successful reload.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<RuleSet>,
}

impl ConfigWatcher {
    /// Returns the watcher and the receiving end for rebuilt rule sets.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<RuleSet>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let watcher = Self {
            path: path.to_path_buf(),
            update_tx,
        };
        (watcher, update_rx)
    }

    /// Start watching in notify's background thread.
    ///
    /// Events stop when the returned watcher is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Self { path, update_tx } = self;
        let watched = path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| handle_event(&watched, &update_tx, res),
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;
        watcher.watch(&path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = %path.display(), "Mapping watcher started");
        Ok(watcher)
    }
}

fn handle_event(path: &Path, tx: &mpsc::UnboundedSender<RuleSet>, res: notify::Result<Event>) {
    let event = match res {
        Ok(event) => event,
        Err(e) => {
            tracing::error!(error = %e, "Mapping watch error");
            return;
        }
    };

    if !(event.kind.is_modify() || event.kind.is_create()) {
        return;
    }

    tracing::info!(path = %path.display(), "Mapping document changed, reloading");
    match load_rule_set(path) {
        Ok(rule_set) => {
            if tx.send(rule_set).is_err() {
                tracing::debug!("Rule set receiver dropped");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to reload url mappings, keeping current rules");
        }
    }
}
