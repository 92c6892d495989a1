// A PlatformEvent states a fact that already happened, never an intent.
// Observers (CLI, tests) must be able to consume it without asking the
// platform what it means.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformEvent {
    /// 平台启动完成（runtime 已就绪）
    Started,

    /// 平台已停止（所有后台任务已退出）
    Stopped,

    /// 本地剪切板文本发生变化
    ClipboardChanged { text: String },

    /// 操作失败（一次性错误，运行继续）
    Error { message: String },
}
