use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use cn_core::ports::{ClipboardChangeHandler, SystemClipboardPort};

use super::clipboard::ClipboardPoller;
use super::event_bus::{
    PlatformCommandReceiver, PlatformEventObserver, PlatformEventReceiver, PlatformEventSender,
    CHANNEL_CAPACITY,
};
use crate::ipc::{PlatformCommand, PlatformEvent};

struct PollerHandle {
    cancel: CancellationToken,
    join: JoinHandle<()>,
}

/// Event loop owning the clipboard poller lifecycle.
///
/// Commands arrive on `command_rx`; events produced by the poller arrive on
/// `event_rx`, are dispatched (clipboard changes go to the registered
/// handler) and then fanned out to observers.
pub struct PlatformRuntime {
    local_clipboard: Arc<dyn SystemClipboardPort>,
    event_tx: PlatformEventSender,
    event_rx: PlatformEventReceiver,
    command_rx: PlatformCommandReceiver,
    observers: broadcast::Sender<PlatformEvent>,
    shutdown: CancellationToken,
    shutting_down: bool,
    poller: Option<PollerHandle>,
    /// Callback handler for clipboard change events
    clipboard_handler: Option<Arc<dyn ClipboardChangeHandler>>,
}

impl PlatformRuntime {
    pub fn new(
        local_clipboard: Arc<dyn SystemClipboardPort>,
        event_tx: PlatformEventSender,
        event_rx: PlatformEventReceiver,
        command_rx: PlatformCommandReceiver,
        clipboard_handler: Option<Arc<dyn ClipboardChangeHandler>>,
    ) -> Self {
        let (observers, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            local_clipboard,
            event_tx,
            event_rx,
            command_rx,
            observers,
            shutdown: CancellationToken::new(),
            shutting_down: false,
            poller: None,
            clipboard_handler,
        }
    }

    /// Set the clipboard change handler callback.
    ///
    /// This can be called after construction if the handler is not available
    /// at initialization time.
    pub fn set_clipboard_handler(&mut self, handler: Arc<dyn ClipboardChangeHandler>) {
        self.clipboard_handler = Some(handler);
    }

    /// Subscribe to the events processed by this runtime.
    pub fn subscribe(&self) -> PlatformEventObserver {
        self.observers.subscribe()
    }

    /// Token cancelled when the runtime shuts down.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub async fn start(mut self) {
        self.publish(PlatformEvent::Started);

        while !self.shutting_down {
            tokio::select! {
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event).await;
                }
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd).await,
                    None => {
                        debug!("command channel closed, shutting down");
                        self.shutting_down = true;
                    }
                },
                _ = self.shutdown.cancelled() => {
                    self.shutting_down = true;
                }
            }
        }

        self.stop_clipboard_watcher().await;
        self.shutdown.cancel();
        self.publish(PlatformEvent::Stopped);
    }

    fn publish(&self, event: PlatformEvent) {
        // no observers is fine
        let _ = self.observers.send(event);
    }

    fn start_clipboard_watcher(&mut self) {
        if self.poller.is_some() {
            debug!("Clipboard poller already running, skipping start");
            return;
        }

        let poller = Arc::new(ClipboardPoller::new(
            self.local_clipboard.clone(),
            self.event_tx.clone(),
        ));
        let cancel = self.shutdown.child_token();
        let join = tokio::spawn(poller.run(cancel.clone()));

        self.poller = Some(PollerHandle { cancel, join });
    }

    async fn stop_clipboard_watcher(&mut self) {
        match self.poller.take() {
            Some(handle) => {
                handle.cancel.cancel();
                if let Err(e) = handle.join.await {
                    error!(error = %e, "Clipboard poller task failed");
                }
                info!("Clipboard poller stopped");
            }
            None => debug!("Clipboard poller already stopped"),
        }
    }

    async fn handle_event(&self, event: PlatformEvent) {
        match &event {
            PlatformEvent::ClipboardChanged { text } => {
                debug!(len = text.len(), "Clipboard changed");

                if let Some(handler) = &self.clipboard_handler {
                    if let Err(e) = handler.on_clipboard_changed(text.clone()).await {
                        error!(error = %e, "Failed to handle clipboard change");
                        self.publish(event);
                        self.publish(PlatformEvent::Error {
                            message: e.to_string(),
                        });
                        return;
                    }
                } else {
                    warn!("Clipboard changed but no handler registered");
                }
            }
            PlatformEvent::Started => {
                info!("Platform runtime started");
            }
            PlatformEvent::Stopped => {
                info!("Platform runtime stopped");
            }
            PlatformEvent::Error { message } => {
                error!(error = %message, "Platform error");
            }
        }
        self.publish(event);
    }

    async fn handle_command(&mut self, command: PlatformCommand) {
        match command {
            PlatformCommand::Shutdown => {
                self.shutting_down = true;
                info!("Platform runtime shutting down");
            }
            PlatformCommand::StartClipboardWatcher => {
                debug!("StartClipboardWatcher command received");
                self.start_clipboard_watcher();
            }
            PlatformCommand::StopClipboardWatcher => {
                debug!("StopClipboardWatcher command received");
                self.stop_clipboard_watcher().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cn_core::ports::{ClipboardError, HistoryError};
    use std::sync::Mutex;
    use tokio::sync::mpsc;
    use tokio::time::{timeout, Duration};

    struct FixedClipboard(Mutex<String>);

    #[async_trait::async_trait]
    impl SystemClipboardPort for FixedClipboard {
        async fn read_text(&self) -> Result<String, ClipboardError> {
            Ok(self.0.lock().unwrap().clone())
        }

        async fn write_text(&self, text: String) -> Result<(), ClipboardError> {
            *self.0.lock().unwrap() = text;
            Ok(())
        }
    }

    struct FailingHandler;

    #[async_trait::async_trait]
    impl ClipboardChangeHandler for FailingHandler {
        async fn on_clipboard_changed(&self, _text: String) -> Result<(), HistoryError> {
            Err(HistoryError::Storage("disk full".into()))
        }
    }

    fn build_runtime(
        handler: Option<Arc<dyn ClipboardChangeHandler>>,
    ) -> (PlatformRuntime, PlatformEventSender, mpsc::Sender<PlatformCommand>) {
        let clipboard: Arc<dyn SystemClipboardPort> =
            Arc::new(FixedClipboard(Mutex::new("hello".into())));
        let (event_tx, event_rx) = mpsc::channel(8);
        let (command_tx, command_rx) = mpsc::channel(8);
        let runtime =
            PlatformRuntime::new(clipboard, event_tx.clone(), event_rx, command_rx, handler);
        (runtime, event_tx, command_tx)
    }

    #[tokio::test]
    async fn handler_failure_is_reported_as_error_event() {
        let (runtime, _event_tx, _command_tx) = build_runtime(Some(Arc::new(FailingHandler)));
        let mut observer = runtime.subscribe();

        runtime
            .handle_event(PlatformEvent::ClipboardChanged { text: "x".into() })
            .await;

        assert!(matches!(
            observer.try_recv().unwrap(),
            PlatformEvent::ClipboardChanged { .. }
        ));
        assert!(matches!(
            observer.try_recv().unwrap(),
            PlatformEvent::Error { message } if message.contains("disk full")
        ));
    }

    #[tokio::test]
    async fn start_twice_keeps_a_single_poller() {
        let (mut runtime, _event_tx, _command_tx) = build_runtime(None);

        runtime
            .handle_command(PlatformCommand::StartClipboardWatcher)
            .await;
        runtime
            .handle_command(PlatformCommand::StartClipboardWatcher)
            .await;
        assert!(runtime.poller.is_some());

        runtime
            .handle_command(PlatformCommand::StopClipboardWatcher)
            .await;
        assert!(runtime.poller.is_none());

        // stopping again is a no-op
        runtime
            .handle_command(PlatformCommand::StopClipboardWatcher)
            .await;
        assert!(runtime.poller.is_none());
    }

    #[tokio::test]
    async fn shutdown_command_ends_the_loop() {
        let (runtime, _event_tx, command_tx) = build_runtime(None);
        let mut observer = runtime.subscribe();
        let task = tokio::spawn(runtime.start());

        command_tx.send(PlatformCommand::Shutdown).await.unwrap();

        timeout(Duration::from_millis(500), task)
            .await
            .expect("runtime shutdown timeout")
            .unwrap();
        assert_eq!(observer.recv().await.unwrap(), PlatformEvent::Started);
        assert_eq!(observer.recv().await.unwrap(), PlatformEvent::Stopped);
    }
}
