pub enum PlatformCommand {
    /// 启动剪切板轮询器
    StartClipboardWatcher,
    /// 停止剪切板轮询器
    StopClipboardWatcher,
    /// 关闭
    Shutdown,
}
