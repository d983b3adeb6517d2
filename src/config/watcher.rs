//! Hot reload of the route configuration.
//!
//! The parent directory is watched rather than the file itself: editors that
//! save by rename would otherwise detach the watch after the first change.
//! Only a file that loads and validates is forwarded; anything else is logged
//! and the running routes stay in place.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::SiteRouterConfig;
use crate::observability::metrics;

/// Watches one config file and sends each new valid revision.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<SiteRouterConfig>,
}

impl ConfigWatcher {
    /// Returns the watcher and the receiving end for validated revisions.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<SiteRouterConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let watcher = Self {
            path: path.to_path_buf(),
            update_tx,
        };
        (watcher, update_rx)
    }

    /// Start watching. Dropping the returned handle stops the watch.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Self { path, update_tx } = self;
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let last_seen = Mutex::new(std::fs::read_to_string(&path).ok());
        let target = path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if touches_config(&event, &target) => {
                    let contents = std::fs::read_to_string(&target).ok();
                    {
                        let Ok(mut last) = last_seen.lock() else {
                            return;
                        };
                        if contents.is_none() || *last == contents {
                            return;
                        }
                        *last = contents;
                    }

                    tracing::info!(path = ?target, "Config change detected, reloading routes");
                    match load_config(&target) {
                        Ok(config) => {
                            if update_tx.send(config).is_err() {
                                tracing::debug!("Reload receiver gone, dropping config revision");
                            }
                        }
                        Err(e) => {
                            metrics::record_reload(false);
                            tracing::error!(error = %e, "Config reload failed, keeping current routes");
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = %e, "Config watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        tracing::info!(path = ?path, "Config watcher started");
        Ok(watcher)
    }
}

/// A create or modify event naming the config file.
fn touches_config(event: &Event, target: &Path) -> bool {
    let relevant = matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_));
    let Some(name) = target.file_name() else {
        return false;
    };
    relevant && event.paths.iter().any(|p| p.file_name() == Some(name))
}
