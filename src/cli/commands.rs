use std::io::{BufRead, Read};
use std::path::Path;

use anyhow::{bail, Context};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use cn_app::usecases::{
    ClipboardHistoryService, CopyFromHistory, StartClipboardWatcher, StopClipboardWatcher,
};
use cn_core::network::Connectivity;
use cn_platform::ipc::{PlatformCommand, PlatformEvent};
use cn_platform::watch_lock::WatchLock;

use super::history_edit::{self, HistoryEdit};
use super::{HistoryAction, NotesAction, PinAction};
use crate::bootstrap::{self, spawn_clipboard_runtime, AppContext};
use crate::server;

const PREVIEW_CHARS: usize = 60;

/// One-line preview of clipboard text.
pub(super) fn preview(text: &str) -> String {
    let line: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .take(PREVIEW_CHARS)
        .collect();
    if text.chars().count() > PREVIEW_CHARS {
        format!("{line}…")
    } else {
        line
    }
}

/// Forward stdin lines from a plain thread; a blocking read on a runtime
/// thread would hold up shutdown.
fn spawn_stdin_lines() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
    rx
}

async fn handle_watch_input(history: &ClipboardHistoryService, line: &str) {
    let edit = match HistoryEdit::parse(line) {
        Ok(Some(edit)) => edit,
        Ok(None) => return,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };
    match edit.apply(history).await {
        Ok(message) => println!("{message}"),
        Err(e) => eprintln!("error: {e:#}"),
    }
}

/// Refuse to edit the history file while another process is watching it.
fn ensure_not_watching(lock_path: &Path) -> anyhow::Result<()> {
    if let Some(pid) = WatchLock::holder(lock_path) {
        bail!(
            "a clipboard watcher (pid {pid}) is running; edit the history from its prompt \
             or stop it first (delete {} if no watcher is running)",
            lock_path.display()
        );
    }
    Ok(())
}

pub async fn watch(ctx: &AppContext) -> anyhow::Result<()> {
    let _lock = WatchLock::acquire(&ctx.paths.watch_lock_path)?;

    let runtime = spawn_clipboard_runtime(ctx);
    let mut observer = runtime.observer;

    StartClipboardWatcher::from_port(runtime.watcher_control.clone())
        .execute()
        .await?;
    println!(
        "Watching the clipboard ({} entries recorded). Press Ctrl+C to stop.",
        ctx.history.all().await.len()
    );
    println!("{}", history_edit::HELP);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut stdin = spawn_stdin_lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                info!("interrupt received");
                break;
            }
            line = stdin.recv(), if stdin_open => match line {
                Some(line) => handle_watch_input(&ctx.history, &line).await,
                None => {
                    debug!("stdin closed, history edits disabled");
                    stdin_open = false;
                }
            },
            event = observer.recv() => match event {
                Ok(PlatformEvent::ClipboardChanged { text }) => println!("+ {}", preview(&text)),
                Ok(PlatformEvent::Error { message }) => eprintln!("warning: {message}"),
                Ok(PlatformEvent::Stopped) | Err(RecvError::Closed) => break,
                Ok(PlatformEvent::Started) => {}
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "event observer lagged"),
            },
        }
    }

    if let Err(e) = StopClipboardWatcher::from_port(runtime.watcher_control)
        .execute()
        .await
    {
        warn!(error = %e, "failed to stop clipboard watcher");
    }
    if runtime.command_tx.send(PlatformCommand::Shutdown).await.is_err() {
        runtime.shutdown.cancel();
    }
    runtime
        .join
        .await
        .context("platform runtime task failed")?;
    Ok(())
}

pub async fn history(ctx: &AppContext, action: HistoryAction) -> anyhow::Result<()> {
    match action {
        HistoryAction::List => println!("{}", HistoryEdit::List.apply(&ctx.history).await?),
        HistoryAction::Remove { text } => {
            ensure_not_watching(&ctx.paths.watch_lock_path)?;
            println!("{}", HistoryEdit::Remove(text).apply(&ctx.history).await?);
        }
        HistoryAction::Replace { old, new } => {
            ensure_not_watching(&ctx.paths.watch_lock_path)?;
            println!(
                "{}",
                HistoryEdit::Replace { old, new }.apply(&ctx.history).await?
            );
        }
        HistoryAction::Copy { text } => {
            CopyFromHistory::new(ctx.history.clone(), ctx.clipboard.clone())
                .execute(&text)
                .await?;
            println!("Copied to clipboard.");
        }
        HistoryAction::Clear => {
            ensure_not_watching(&ctx.paths.watch_lock_path)?;
            println!("{}", HistoryEdit::Clear.apply(&ctx.history).await?);
        }
    }
    Ok(())
}

pub async fn pin(ctx: &AppContext, action: PinAction) -> anyhow::Result<()> {
    match action {
        PinAction::Add { text } => {
            if ctx.pinned.pin(text).await? {
                println!("Pinned.");
            } else {
                println!("Already pinned.");
            }
        }
        PinAction::Remove { text } => {
            if !ctx.pinned.unpin(&text).await? {
                bail!("item is not pinned: {text}");
            }
            println!("Unpinned.");
        }
        PinAction::List => {
            for item in ctx.pinned.all().await {
                println!("* {}", preview(&item));
            }
        }
    }
    Ok(())
}

pub async fn notes(ctx: &AppContext, action: NotesAction) -> anyhow::Result<()> {
    let notes = &ctx.notes;
    if ctx.config.has_remote() && notes.connect().await == Connectivity::Offline {
        eprintln!("Remote notes unavailable, using local notes.");
    }

    match action {
        NotesAction::List => {
            for title in notes.list().await? {
                println!("{title}");
            }
        }
        NotesAction::Read { title } => {
            let note = notes.read(&title).await?;
            println!("{}", note.content);
        }
        NotesAction::Write { title, content } => {
            let content = match content {
                Some(content) => content,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read note content from stdin")?;
                    buf
                }
            };
            notes.write(&title, &content).await?;
            println!("Note saved successfully.");
        }
        NotesAction::Delete { title } => {
            notes.delete(&title).await?;
            println!("Note '{title}' deleted successfully.");
        }
    }
    Ok(())
}

pub async fn serve(ctx: &AppContext, port: Option<u16>) -> anyhow::Result<()> {
    let port = port.unwrap_or(ctx.config.server_port);
    let shutdown = CancellationToken::new();

    let on_interrupt = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, stopping notes server");
        }
        on_interrupt.cancel();
    });

    println!(
        "Serving notes from {} on http://127.0.0.1:{port}",
        ctx.paths.notes_dir.display()
    );
    server::serve(ctx.local_notes_service(), port, shutdown).await
}

/// Flip the persisted theme between light and dark.
pub fn toggle_theme(ctx: &AppContext) -> anyhow::Result<()> {
    let theme = ctx.config.theme.toggled();
    bootstrap::save_theme(&ctx.paths.config_path, theme)?;
    println!(
        "Theme set to {} in {}",
        theme.name(),
        ctx.paths.config_path.display()
    );
    Ok(())
}

pub fn print_config(ctx: &AppContext) {
    let config = &ctx.config;
    let palette = config.theme.palette();

    println!("config file:      {}", ctx.paths.config_path.display());
    println!("theme:            {:?}", config.theme);
    println!(
        "  palette:        background={} foreground={} button={}/{}",
        palette.background,
        palette.foreground,
        palette.button_background,
        palette.button_foreground
    );
    println!("history file:     {}", ctx.paths.history_path.display());
    println!("pinned file:      {}", ctx.paths.pinned_path.display());
    println!("notes directory:  {}", ctx.paths.notes_dir.display());
    println!("logs directory:   {}", ctx.paths.logs_dir.display());
    if config.has_remote() {
        println!("remote notes:     {}", config.remote_url);
        println!("probe timeout:    {} ms", config.probe_timeout_ms);
    } else {
        println!("remote notes:     (none)");
    }
    println!("server port:      {}", config.server_port);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn history_edits_are_refused_while_watching() {
        let dir = TempDir::new().unwrap();
        let lock_path = dir.path().join("watch.lock");
        assert!(ensure_not_watching(&lock_path).is_ok());

        let lock = WatchLock::acquire(&lock_path).unwrap();
        let err = ensure_not_watching(&lock_path).unwrap_err();
        assert!(err.to_string().contains(&std::process::id().to_string()));

        drop(lock);
        assert!(ensure_not_watching(&lock_path).is_ok());
    }

    #[test]
    fn preview_flattens_and_truncates() {
        assert_eq!(preview("a\nb"), "a b");
        let long = "x".repeat(PREVIEW_CHARS + 5);
        let shown = preview(&long);
        assert!(shown.ends_with('…'));
        assert_eq!(shown.chars().count(), PREVIEW_CHARS + 1);
    }

    #[test]
    fn preview_counts_characters_not_bytes() {
        let text = "剪".repeat(PREVIEW_CHARS);
        assert_eq!(preview(&text), text);
    }
}
