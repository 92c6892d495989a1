mod poller;

pub use poller::{ClipboardPoller, POLL_INTERVAL};
