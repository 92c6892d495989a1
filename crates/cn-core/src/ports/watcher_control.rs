use async_trait::async_trait;

/// Port for controlling the clipboard poller lifecycle.
///
/// 剪贴板轮询器生命周期控制端口。
///
/// # Behavior / 行为
/// - `start_watcher()` should be idempotent.
/// - `stop_watcher()` should be idempotent.
#[async_trait]
pub trait WatcherControlPort: Send + Sync {
    /// Request the clipboard poller to start.
    ///
    /// 请求启动剪贴板轮询器。
    async fn start_watcher(&self) -> Result<(), WatcherControlError>;

    /// Request the clipboard poller to stop.
    ///
    /// 请求停止剪贴板轮询器。
    async fn stop_watcher(&self) -> Result<(), WatcherControlError>;
}

#[derive(Debug, thiserror::Error)]
pub enum WatcherControlError {
    #[error("Failed to send start command: {0}")]
    StartFailed(String),

    #[error("Failed to send stop command: {0}")]
    StopFailed(String),

    #[error("Watcher channel closed")]
    ChannelClosed,
}
