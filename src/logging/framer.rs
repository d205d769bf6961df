//! # 消息分帧
//!
//! 把一条记录变成以 `'\n'` 结尾的有界文本行。缓冲区末尾始终预留两个字节，
//! 分别放换行符和 C 风格的结尾 NUL，所以内容最多 `N - 2` 字节，超出部分截断。
//!
//! ```rust
//! use madi::logging::framer::LineBuffer;
//!
//! let mut line = LineBuffer::<32>::new();
//! assert_eq!(line.frame(&"boot ok"), b"boot ok\n");
//! ```

use core::fmt::{self, Write};

use super::record::Stringify;
use crate::config::LOGGING_MESSAGE_MAXLEN;

/// 换行符和 NUL 占用的字节数
pub const FRAME_OVERHEAD: usize = 2;

/// 截断式格式化写入器，写满之后静默丢弃剩余内容
struct TruncatingWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl Write for TruncatingWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        let remaining = self.buf.len() - self.pos;
        let to_write = bytes.len().min(remaining);
        self.buf[self.pos..self.pos + to_write].copy_from_slice(&bytes[..to_write]);
        self.pos += to_write;
        Ok(())
    }
}

/// 把格式化参数写入 `buf`，返回写入的字节数
pub fn format_into(buf: &mut [u8], args: fmt::Arguments<'_>) -> usize {
    let mut writer = TruncatingWriter { buf, pos: 0 };
    let _ = writer.write_fmt(args);
    writer.pos
}

/// 把记录分帧写入 `buf`
///
/// 返回的长度包含换行符，不包含结尾 NUL；`buf[len]` 是 NUL。
/// 缓冲区小于两个字节时不写任何内容，返回 0。
pub fn frame_into(buf: &mut [u8], record: &dyn Stringify) -> usize {
    if buf.len() < FRAME_OVERHEAD {
        return 0;
    }
    let max = buf.len() - FRAME_OVERHEAD;
    let len = record.stringify(&mut buf[..max]).min(max);
    buf[len] = b'\n';
    buf[len + 1] = 0;
    len + 1
}

/// 固定容量的行缓冲区
pub struct LineBuffer<const N: usize = LOGGING_MESSAGE_MAXLEN> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> LineBuffer<N> {
    pub const fn new() -> Self {
        Self { buf: [0; N], len: 0 }
    }

    /// 容量（含换行和 NUL）
    pub const fn capacity(&self) -> usize {
        N
    }

    /// 分帧并返回包含换行符的一行
    pub fn frame(&mut self, record: &dyn Stringify) -> &[u8] {
        self.len = frame_into(&mut self.buf, record);
        &self.buf[..self.len]
    }

    /// 上一次分帧的结果
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// 上一次分帧的结果，带结尾 NUL
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        if self.len == 0 {
            &[]
        } else {
            &self.buf[..self.len + 1]
        }
    }
}

impl<const N: usize> Default for LineBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
