use tokio::sync::{broadcast, mpsc};

use crate::ipc::{PlatformCommand, PlatformEvent};

pub type PlatformEventSender = mpsc::Sender<PlatformEvent>;
pub type PlatformEventReceiver = mpsc::Receiver<PlatformEvent>;

pub type PlatformCommandSender = mpsc::Sender<PlatformCommand>;
pub type PlatformCommandReceiver = mpsc::Receiver<PlatformCommand>;

/// Fan-out of processed events to observers.
pub type PlatformEventObserver = broadcast::Receiver<PlatformEvent>;

/// Capacity of the runtime channels.
pub const CHANNEL_CAPACITY: usize = 100;

/// Create the event and command channels of a runtime.
pub fn channels() -> (
    (PlatformEventSender, PlatformEventReceiver),
    (PlatformCommandSender, PlatformCommandReceiver),
) {
    (mpsc::channel(CHANNEL_CAPACITY), mpsc::channel(CHANNEL_CAPACITY))
}
