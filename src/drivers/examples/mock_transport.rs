//! # Mock 传输后端
//!
//! 内存中的 [`Transport`] 实现，可以模拟短写、零字节写和错误，
//! 用于验证控制台的互斥和日志后端的重试逻辑。
//!
//! ```rust
//! use madi::drivers::examples::MockTransport;
//! use madi::drivers::Transport;
//!
//! let mut t = MockTransport::with_chunk_limit(3);
//! t.init().unwrap();
//! assert_eq!(t.write(b"hello"), Ok(3));
//! assert_eq!(t.transmitted(), b"hel");
//! ```

use crate::drivers::Transport;
use crate::error::{MadiError, Result};

/// 发送捕获缓冲区大小
const CAPTURE_SIZE: usize = 4096;
/// 接收缓冲区大小
const RX_SIZE: usize = 64;

/// Mock 传输后端
pub struct MockTransport {
    /// 已接受的发送数据
    tx: [u8; CAPTURE_SIZE],
    tx_len: usize,
    /// 待读取的接收数据
    rx: [u8; RX_SIZE],
    rx_len: usize,
    rx_pos: usize,
    /// 单次写入最多接受的字节数（0 表示不限制）
    chunk_limit: usize,
    /// 成功写入多少次之后开始返回 0
    fail_after: Option<usize>,
    /// 写入时返回的错误
    write_error: Option<MadiError>,
    /// 是否支持读取
    readable: bool,
    /// 调用计数
    write_calls: usize,
    read_calls: usize,
    init_count: usize,
    deinit_count: usize,
}

impl MockTransport {
    /// 创建一个健康的、不限制写入长度的后端
    pub const fn new() -> Self {
        Self {
            tx: [0; CAPTURE_SIZE],
            tx_len: 0,
            rx: [0; RX_SIZE],
            rx_len: 0,
            rx_pos: 0,
            chunk_limit: 0,
            fail_after: None,
            write_error: None,
            readable: true,
            write_calls: 0,
            read_calls: 0,
            init_count: 0,
            deinit_count: 0,
        }
    }

    /// 创建每次最多接受 `limit` 字节的后端
    pub const fn with_chunk_limit(limit: usize) -> Self {
        let mut t = Self::new();
        t.chunk_limit = limit;
        t
    }

    /// 创建一个只写后端（读取返回 `DeviceUnavailable`）
    pub const fn write_only() -> Self {
        let mut t = Self::new();
        t.readable = false;
        t
    }

    /// 设置单次写入上限
    pub fn set_chunk_limit(&mut self, limit: usize) {
        self.chunk_limit = limit;
    }

    /// 成功写入 `calls` 次之后，后续写入都返回 0
    pub fn fail_writes_after(&mut self, calls: usize) {
        self.fail_after = Some(calls);
    }

    /// 让后续写入返回指定错误
    pub fn set_write_error(&mut self, error: Option<MadiError>) {
        self.write_error = error;
    }

    /// 模拟接收数据，返回实际放入的字节数
    pub fn mock_receive(&mut self, data: &[u8]) -> usize {
        if self.rx_pos == self.rx_len {
            self.rx_pos = 0;
            self.rx_len = 0;
        }
        let n = data.len().min(RX_SIZE - self.rx_len);
        self.rx[self.rx_len..self.rx_len + n].copy_from_slice(&data[..n]);
        self.rx_len += n;
        n
    }

    /// 已被接受的全部发送数据
    pub fn transmitted(&self) -> &[u8] {
        &self.tx[..self.tx_len]
    }

    /// 清空发送捕获和调用计数
    pub fn clear(&mut self) {
        self.tx_len = 0;
        self.write_calls = 0;
        self.read_calls = 0;
    }

    /// 写入调用次数（包括失败的调用）
    pub fn write_calls(&self) -> usize {
        self.write_calls
    }

    /// 读取调用次数
    pub fn read_calls(&self) -> usize {
        self.read_calls
    }

    /// `init` 被调用的次数
    pub fn init_count(&self) -> usize {
        self.init_count
    }

    /// `deinit` 被调用的次数
    pub fn deinit_count(&self) -> usize {
        self.deinit_count
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for MockTransport {
    fn init(&mut self) -> Result<()> {
        self.init_count += 1;
        Ok(())
    }

    fn deinit(&mut self) -> Result<()> {
        self.deinit_count += 1;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "mock"
    }

    fn write(&mut self, data: &[u8]) -> Result<usize> {
        self.write_calls += 1;

        if let Some(e) = self.write_error {
            return Err(e);
        }
        if let Some(limit) = self.fail_after {
            if self.write_calls > limit {
                return Ok(0);
            }
        }

        let mut n = data.len().min(CAPTURE_SIZE - self.tx_len);
        if self.chunk_limit > 0 {
            n = n.min(self.chunk_limit);
        }
        self.tx[self.tx_len..self.tx_len + n].copy_from_slice(&data[..n]);
        self.tx_len += n;
        Ok(n)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.read_calls += 1;
        if !self.readable {
            return Err(MadiError::DeviceUnavailable);
        }
        let n = buf.len().min(self.rx_len - self.rx_pos);
        buf[..n].copy_from_slice(&self.rx[self.rx_pos..self.rx_pos + n]);
        self.rx_pos += n;
        Ok(n)
    }
}
