//! 日志记录及其文本化

use core::fmt;

use log::Level;

use super::framer::format_into;

/// 可以写成一行文本的记录
///
/// 实现者把内容写入 `buf`，超出部分直接截断，返回写入的字节数（不超过 `buf.len()`）。
/// 不需要写换行，换行由 [`frame_into`](super::framer::frame_into) 追加。
pub trait Stringify {
    fn stringify(&self, buf: &mut [u8]) -> usize;
}

impl Stringify for [u8] {
    fn stringify(&self, buf: &mut [u8]) -> usize {
        let n = self.len().min(buf.len());
        buf[..n].copy_from_slice(&self[..n]);
        n
    }
}

impl Stringify for str {
    fn stringify(&self, buf: &mut [u8]) -> usize {
        self.as_bytes().stringify(buf)
    }
}

impl<T: Stringify + ?Sized> Stringify for &T {
    fn stringify(&self, buf: &mut [u8]) -> usize {
        (**self).stringify(buf)
    }
}

/// 一条带时间戳的日志记录
///
/// 文本格式：`<启动以来毫秒数> <级别> <target>: <消息>`
#[derive(Clone, Copy)]
pub struct LogRecord<'a> {
    pub timestamp_ms: u32,
    pub level: Level,
    pub target: &'a str,
    pub args: fmt::Arguments<'a>,
}

impl fmt::Display for LogRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}: {}",
            self.timestamp_ms, self.level, self.target, self.args
        )
    }
}

impl Stringify for LogRecord<'_> {
    fn stringify(&self, buf: &mut [u8]) -> usize {
        format_into(buf, format_args!("{}", self))
    }
}
