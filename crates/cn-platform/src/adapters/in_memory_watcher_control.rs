use tokio::sync::mpsc;

use cn_core::ports::watcher_control::{WatcherControlError, WatcherControlPort};

use crate::ipc::PlatformCommand;

/// In-memory watcher control implementation.
///
/// 内存版的剪贴板轮询器控制实现。
///
/// Sends poller lifecycle commands to the [`PlatformRuntime`](crate::runtime::runtime::PlatformRuntime)
/// through its in-process command channel.
pub struct InMemoryWatcherControl {
    cmd_tx: mpsc::Sender<PlatformCommand>,
}

impl InMemoryWatcherControl {
    pub fn new(cmd_tx: mpsc::Sender<PlatformCommand>) -> Self {
        Self { cmd_tx }
    }

    async fn send(
        &self,
        command: PlatformCommand,
        on_error: fn(String) -> WatcherControlError,
    ) -> Result<(), WatcherControlError> {
        self.cmd_tx.send(command).await.map_err(|e| {
            if self.cmd_tx.is_closed() {
                WatcherControlError::ChannelClosed
            } else {
                on_error(e.to_string())
            }
        })
    }
}

#[async_trait::async_trait]
impl WatcherControlPort for InMemoryWatcherControl {
    async fn start_watcher(&self) -> Result<(), WatcherControlError> {
        self.send(
            PlatformCommand::StartClipboardWatcher,
            WatcherControlError::StartFailed,
        )
        .await
    }

    async fn stop_watcher(&self) -> Result<(), WatcherControlError> {
        self.send(
            PlatformCommand::StopClipboardWatcher,
            WatcherControlError::StopFailed,
        )
        .await
    }
}
