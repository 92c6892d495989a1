//! Clipboard poller
//!
//! Samples the system clipboard at a fixed interval and turns text changes
//! into `PlatformEvent::ClipboardChanged` events on the runtime event bus.
//!
//! ```text
//! System Clipboard
//!      ↓
//! SystemClipboardPort
//!      ↓
//! ClipboardPoller   (this module)
//!      ↓
//! PlatformEvent
//!      ↓
//! Runtime Event Loop → ClipboardChangeHandler
//! ```
//!
//! ## Change Detection
//!
//! The poller remembers the last text it observed and only emits when the
//! current text differs. The remembered value is updated on every change,
//! whether or not the downstream handler ends up recording it, so a value
//! that is already in the history is not offered again on every tick.
//!
//! The poller does not decide what gets stored; deduplication and the
//! capacity bound belong to the history.
//!
//! ## Error Boundary
//!
//! A failed sample is logged and reported as `PlatformEvent::Error`; the
//! loop keeps running until its cancellation token fires.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::Mutex;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use cn_core::ports::{ClipboardError, SystemClipboardPort};

use crate::ipc::PlatformEvent;
use crate::runtime::event_bus::PlatformEventSender;

/// Sampling interval of the poller.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

pub struct ClipboardPoller {
    clipboard: Arc<dyn SystemClipboardPort>,
    tx: PlatformEventSender,
    last_observed: Mutex<Option<String>>,
}

impl ClipboardPoller {
    pub fn new(clipboard: Arc<dyn SystemClipboardPort>, tx: PlatformEventSender) -> Self {
        Self {
            clipboard,
            tx,
            last_observed: Mutex::new(None),
        }
    }

    /// Sample the clipboard once.
    ///
    /// Returns `true` when a `ClipboardChanged` event was emitted.
    pub async fn check_once(&self) -> Result<bool> {
        let text = match self.clipboard.read_text().await {
            Ok(text) => text,
            // nothing textual on the clipboard is an observation, not a failure
            Err(ClipboardError::Empty) => String::new(),
            Err(e) => return Err(e.into()),
        };

        let mut last = self.last_observed.lock().await;
        if last.as_deref() == Some(text.as_str()) {
            return Ok(false);
        }
        *last = Some(text.clone());
        drop(last);

        if text.is_empty() {
            return Ok(false);
        }

        debug!(len = text.len(), "clipboard text changed");
        self.tx
            .send(PlatformEvent::ClipboardChanged { text })
            .await
            .map_err(|e| anyhow::anyhow!("event channel closed: {e}"))?;
        Ok(true)
    }

    /// Last text the poller observed, if any.
    pub async fn last_observed(&self) -> Option<String> {
        self.last_observed.lock().await.clone()
    }

    /// Poll every [`POLL_INTERVAL`] until `cancel` fires.
    pub async fn run(self: Arc<Self>, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(POLL_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!("clipboard poller started");
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    if let Err(e) = self.check_once().await {
                        warn!(error = %e, "clipboard sample failed");
                        let _ = self
                            .tx
                            .send(PlatformEvent::Error { message: e.to_string() })
                            .await;
                    }
                }
            }
        }
        info!("clipboard poller stopped");
    }
}
