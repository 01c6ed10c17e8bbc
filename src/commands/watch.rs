//! Watch command implementation.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::errors::{LmtError, Result};
use crate::interface::Context;

use super::tangle::{tangle, TangleOptions};

/// Options for the watch command.
#[derive(Debug, Clone, Default)]
pub struct WatchOptions {
    /// Documents to watch (empty means the configured sources).
    pub files: Vec<PathBuf>,
    /// Debounce delay in milliseconds; the configured value when unset.
    pub debounce_ms: Option<u64>,
}

/// Tangles once, then again whenever an input document changes.
///
/// Runs until the watcher fails.
pub fn watch(ctx: &Context, options: &WatchOptions) -> Result<()> {
    let debounce = Duration::from_millis(options.debounce_ms.unwrap_or(ctx.config.watch.debounce_ms));
    let tangle_options = TangleOptions {
        files: options.files.clone(),
        ..Default::default()
    };

    tracing::info!("Watching for changes (debounce: {}ms)...", debounce.as_millis());
    run_tangle(ctx, &tangle_options);

    let (tx, rx) = channel();
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| {
            if let Ok(event) = res {
                let _ = tx.send(event);
            }
        },
        Config::default(),
    )
    .map_err(|e| LmtError::Watch(e.to_string()))?;

    watcher
        .watch(&ctx.base_dir, RecursiveMode::Recursive)
        .map_err(|e| LmtError::Watch(e.to_string()))?;

    loop {
        let event = rx
            .recv()
            .map_err(|e| LmtError::Watch(e.to_string()))?;
        let mut changed = event.paths;

        // Collect the rest of a burst before acting on it.
        loop {
            match rx.recv_timeout(debounce) {
                Ok(event) => changed.extend(event.paths),
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(LmtError::Watch("watcher disconnected".to_string()))
                }
            }
        }

        let inputs = watched_documents(ctx, &options.files);
        if is_relevant(&changed, &inputs) {
            tracing::debug!("Input changed: {:?}", changed);
            run_tangle(ctx, &tangle_options);
        }
    }
}

fn run_tangle(ctx: &Context, options: &TangleOptions) {
    if let Err(e) = tangle(ctx, options) {
        tracing::error!("{}", e);
    }
}

/// Absolute paths of the current input documents.
fn watched_documents(ctx: &Context, files: &[PathBuf]) -> Vec<PathBuf> {
    ctx.input_documents(files)
        .unwrap_or_default()
        .iter()
        .map(|path| canonical(&ctx.resolve_path(path)))
        .collect()
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Returns true if any changed path is one of the input documents.
fn is_relevant(changed: &[PathBuf], inputs: &[PathBuf]) -> bool {
    changed
        .iter()
        .any(|path| inputs.contains(&canonical(path)))
}
