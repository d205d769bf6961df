//! # 控制台日志后端
//!
//! 把记录分帧后写入 [`SyncConsole`]。每次调用在自己的栈上分帧，
//! 多个线程同时打日志不会共享行缓冲区。
//!
//! 后端短写时从已写位置继续写，直到整行写完；
//! 某次写入返回 0 或出错则放弃这一行，向注册表报告 0。
//! 中断里打日志时控制台被占用同样按丢弃处理，不会自旋等锁。

use super::framer::LineBuffer;
use super::record::Stringify;
use super::registry::LogBackend;
use crate::config::LOGGING_MESSAGE_MAXLEN;
use crate::console::SyncConsole;
use crate::drivers::Transport;
use crate::error::{MadiError, Result};

/// 控制台日志后端
pub struct ConsoleBackend<'a, T: Transport, const N: usize = LOGGING_MESSAGE_MAXLEN> {
    console: &'a SyncConsole<T>,
}

impl<'a, T: Transport, const N: usize> ConsoleBackend<'a, T, N> {
    pub const fn new(console: &'a SyncConsole<T>) -> Self {
        Self { console }
    }

    /// 底层控制台
    pub fn console(&self) -> &'a SyncConsole<T> {
        self.console
    }

    /// 分帧并写出一行，返回写出的字节数（含换行）
    pub fn write_line(&self, record: &dyn Stringify) -> Result<usize> {
        let mut line = LineBuffer::<N>::new();
        let framed = line.frame(record);
        if framed.is_empty() {
            return Ok(0);
        }

        let mut written = 0;
        while written < framed.len() {
            match self.console.write(&framed[written..])? {
                0 => return Err(MadiError::ShortWrite),
                n => written += n.min(framed.len() - written),
            }
        }
        Ok(written)
    }
}

impl<T: Transport, const N: usize> LogBackend for ConsoleBackend<'_, T, N> {
    fn write(&self, record: &dyn Stringify) -> usize {
        self.write_line(record).unwrap_or(0)
    }
}
