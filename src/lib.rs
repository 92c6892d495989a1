//! clipnote
//!
//! 剪贴板历史与笔记工具：进程装配、命令行与笔记 HTTP 服务。

pub mod bootstrap;
pub mod cli;
pub mod server;
