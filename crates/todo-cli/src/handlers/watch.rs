use crate::context::CliContext;
use crate::output;
use serde::Serialize;
use todo_domain::{RefreshOutcome, View};
use todo_persistence::{ChangeDetector, FileWatcher};
use tokio::sync::broadcast::error::RecvError;

#[derive(Serialize)]
struct WatchUpdate {
    refresh: RefreshOutcome,
    view: View,
}

pub async fn handle(ctx: &mut CliContext, list: Option<String>) -> anyhow::Result<()> {
    if let Some(id) = list {
        if let Err(e) = ctx.session.open_list(&id) {
            output::output_error(&e.to_string());
        }
    }

    ctx.storage().ensure_exists()?;
    let watcher = FileWatcher::new();
    let mut rx = watcher.subscribe();
    watcher
        .start_watching(ctx.storage().path().to_path_buf())
        .await?;

    output::output_success(WatchUpdate {
        refresh: RefreshOutcome::default(),
        view: ctx.session.view(),
    });

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Ok(event) => {
                    tracing::debug!(path = %event.path.display(), "Storage file changed");
                    refresh(ctx);
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Missed {} change events", skipped);
                    refresh(ctx);
                }
                Err(RecvError::Closed) => break,
            },
            _ = &mut shutdown => break,
        }
    }

    watcher.stop_watching().await?;
    Ok(())
}

fn refresh(ctx: &mut CliContext) {
    let outcome = ctx.session.refresh();
    if outcome.changed {
        output::output_success(WatchUpdate {
            refresh: outcome,
            view: ctx.session.view(),
        });
    }
}
