use crate::traits::{ChangeDetector, ChangeEvent};
use chrono::Utc;
use notify::{EventKind, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use todo_core::{TodoError, TodoResult};
use tokio::sync::broadcast;
use tokio::sync::Mutex;

/// File system watcher for detecting changes to the storage file
/// Uses the `notify` crate for cross-platform file watching
/// Spawns the watcher in a tokio task to handle the Send requirement
///
/// Saves replace the file by rename, so creations and renames onto the
/// watched path count as changes as well as in-place modifications.
pub struct FileWatcher {
    tx: broadcast::Sender<ChangeEvent>,
    task_handle: Arc<Mutex<Option<tokio::task::JoinHandle<()>>>>,
    watching: Arc<AtomicBool>,
}

impl FileWatcher {
    /// Create a new file watcher
    /// The broadcast channel has a buffer size of 10
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(10);
        Self {
            tx,
            task_handle: Arc::new(Mutex::new(None)),
            watching: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl Default for FileWatcher {
    fn default() -> Self {
        Self::new()
    }
}

fn is_relevant(event: &notify::Event, watch_path: &Path) -> bool {
    matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
        && event.paths.iter().any(|p| p == watch_path)
}

#[async_trait::async_trait]
impl ChangeDetector for FileWatcher {
    async fn start_watching(&self, path: PathBuf) -> TodoResult<()> {
        let tx = self.tx.clone();
        let watching = self.watching.clone();

        // Canonicalize to absolute path so it matches OS event paths
        let canonical_path = tokio::fs::canonicalize(&path).await?;
        let parent = canonical_path
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| {
                TodoError::Internal(format!("{} has no parent directory", path.display()))
            })?;

        let handle = tokio::spawn(async move {
            let watch_path = canonical_path;

            match notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
                match res {
                    Ok(event) => {
                        if is_relevant(&event, &watch_path) {
                            let change = ChangeEvent {
                                path: watch_path.clone(),
                                detected_at: Utc::now(),
                            };
                            let _ = tx.send(change);
                        }
                    }
                    Err(e) => {
                        tracing::warn!("File watcher error: {}", e);
                    }
                }
            }) {
                Ok(mut watcher) => {
                    if let Err(e) = watcher.watch(&parent, RecursiveMode::NonRecursive) {
                        tracing::error!("Failed to watch directory: {}", e);
                    } else {
                        tracing::info!("Started watching directory: {}", parent.display());
                        watching.store(true, Ordering::SeqCst);
                        // Keep watcher alive
                        std::future::pending::<()>().await;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to create watcher: {}", e);
                }
            }
        });

        let mut guard = self.task_handle.lock().await;
        if let Some(previous) = guard.replace(handle) {
            previous.abort();
        }

        Ok(())
    }

    async fn stop_watching(&self) -> TodoResult<()> {
        let mut guard = self.task_handle.lock().await;
        if let Some(handle) = guard.take() {
            handle.abort();
            self.watching.store(false, Ordering::SeqCst);
            tracing::info!("Stopped file watching");
        }
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.tx.subscribe()
    }

    fn is_watching(&self) -> bool {
        self.watching.load(Ordering::SeqCst)
    }
}
