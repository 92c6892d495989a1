//! Connectivity state machine for the remote notes mirror.
//!
//! Defines a pure state transition function. The only transition is
//! `Online -> Offline`; once a session is offline it stays offline.

/// Remote mirror reachability for the current session.
///
/// 当前会话中远端镜像的可达状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Connectivity {
    /// The remote mirror answered the startup probe and no call has failed since.
    ///
    /// 远端镜像已通过启动探测，且之后没有调用失败。
    Online,
    /// Local files only, for the rest of the session.
    ///
    /// 本会话剩余时间仅使用本地文件。
    Offline,
}

/// Events that drive the connectivity state.
///
/// 驱动连接状态的事件。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityEvent {
    /// The startup probe succeeded.
    ProbeSucceeded,
    /// The startup probe failed or timed out.
    ProbeFailed,
    /// A remote call failed with a connection error.
    RemoteCallFailed,
}

impl Connectivity {
    /// Apply an event and return the next state.
    ///
    /// A successful probe only confirms `Online`; nothing moves a session
    /// back from `Offline`.
    pub fn transition(self, event: ConnectivityEvent) -> Connectivity {
        match (self, event) {
            (Connectivity::Online, ConnectivityEvent::ProbeSucceeded) => Connectivity::Online,
            (Connectivity::Online, ConnectivityEvent::ProbeFailed)
            | (Connectivity::Online, ConnectivityEvent::RemoteCallFailed) => Connectivity::Offline,
            (Connectivity::Offline, _) => Connectivity::Offline,
        }
    }

    pub fn is_online(self) -> bool {
        self == Connectivity::Online
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_failure_moves_online_to_offline() {
        let next = Connectivity::Online.transition(ConnectivityEvent::RemoteCallFailed);
        assert_eq!(next, Connectivity::Offline);
    }

    #[test]
    fn probe_failure_moves_online_to_offline() {
        let next = Connectivity::Online.transition(ConnectivityEvent::ProbeFailed);
        assert_eq!(next, Connectivity::Offline);
    }

    #[test]
    fn offline_is_terminal() {
        for event in [
            ConnectivityEvent::ProbeSucceeded,
            ConnectivityEvent::ProbeFailed,
            ConnectivityEvent::RemoteCallFailed,
        ] {
            assert_eq!(Connectivity::Offline.transition(event), Connectivity::Offline);
        }
    }

    #[test]
    fn probe_success_keeps_online() {
        let next = Connectivity::Online.transition(ConnectivityEvent::ProbeSucceeded);
        assert!(next.is_online());
    }
}
