//! Remote mirror connectivity.
mod connectivity;

pub use connectivity::{Connectivity, ConnectivityEvent};
