//! Start / stop the clipboard poller
//! 启动与停止剪贴板轮询器的用例

use std::sync::Arc;

use tracing::{info, info_span, Instrument};

use cn_core::ports::{WatcherControlError, WatcherControlPort};

#[derive(Debug, thiserror::Error)]
pub enum ClipboardWatcherError {
    #[error("Failed to start clipboard poller: {0}")]
    StartFailed(#[source] WatcherControlError),

    #[error("Failed to stop clipboard poller: {0}")]
    StopFailed(#[source] WatcherControlError),
}

/// Ask the platform runtime to start polling the clipboard.
///
/// Idempotent: starting a running poller is a no-op on the runtime side.
pub struct StartClipboardWatcher {
    watcher_control: Arc<dyn WatcherControlPort>,
}

impl StartClipboardWatcher {
    pub fn from_port(watcher_control: Arc<dyn WatcherControlPort>) -> Self {
        Self { watcher_control }
    }

    pub async fn execute(&self) -> Result<(), ClipboardWatcherError> {
        let span = info_span!("usecase.start_clipboard_watcher.execute");

        async {
            self.watcher_control
                .start_watcher()
                .await
                .map_err(ClipboardWatcherError::StartFailed)?;

            info!("Clipboard poller start requested");
            Ok(())
        }
        .instrument(span)
        .await
    }
}

/// Ask the platform runtime to stop polling the clipboard.
pub struct StopClipboardWatcher {
    watcher_control: Arc<dyn WatcherControlPort>,
}

impl StopClipboardWatcher {
    pub fn from_port(watcher_control: Arc<dyn WatcherControlPort>) -> Self {
        Self { watcher_control }
    }

    pub async fn execute(&self) -> Result<(), ClipboardWatcherError> {
        let span = info_span!("usecase.stop_clipboard_watcher.execute");

        async {
            self.watcher_control
                .stop_watcher()
                .await
                .map_err(ClipboardWatcherError::StopFailed)?;

            info!("Clipboard poller stop requested");
            Ok(())
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingWatcherControl {
        starts: AtomicUsize,
        stops: AtomicUsize,
        closed: bool,
    }

    #[async_trait]
    impl WatcherControlPort for CountingWatcherControl {
        async fn start_watcher(&self) -> Result<(), WatcherControlError> {
            if self.closed {
                return Err(WatcherControlError::ChannelClosed);
            }
            self.starts.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn stop_watcher(&self) -> Result<(), WatcherControlError> {
            if self.closed {
                return Err(WatcherControlError::ChannelClosed);
            }
            self.stops.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn start_and_stop_reach_the_port() {
        let control = Arc::new(CountingWatcherControl::default());

        StartClipboardWatcher::from_port(control.clone())
            .execute()
            .await
            .unwrap();
        StopClipboardWatcher::from_port(control.clone())
            .execute()
            .await
            .unwrap();

        assert_eq!(control.starts.load(Ordering::SeqCst), 1);
        assert_eq!(control.stops.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn closed_runtime_is_reported() {
        let control = Arc::new(CountingWatcherControl {
            closed: true,
            ..Default::default()
        });

        let start = StartClipboardWatcher::from_port(control.clone()).execute().await;
        let stop = StopClipboardWatcher::from_port(control).execute().await;

        assert!(matches!(start, Err(ClipboardWatcherError::StartFailed(_))));
        assert!(matches!(stop, Err(ClipboardWatcherError::StopFailed(_))));
    }
}
