//! # Mock UART 驱动
//!
//! 模拟轮询式 UART 外设，用于测试 [`UartTransport`](crate::console::backend::uart::UartTransport)。
//!
//! ## 功能特性
//!
//! - 实现 [`PolledUart`] trait
//! - 内部环形缓冲区模拟收发
//! - 可模拟设备未就绪
//! - 提供测试辅助方法
//!
//! ## 使用示例
//!
//! ```rust
//! use madi::drivers::examples::MockUart;
//! use madi::drivers::PolledUart;
//!
//! let mut uart = MockUart::new();
//! uart.mock_receive(b"ok");
//! assert_eq!(uart.poll_in(), Some(b'o'));
//! ```

use crate::drivers::PolledUart;

/// Mock UART 缓冲区大小
const BUFFER_SIZE: usize = 256;

/// Mock UART 驱动
pub struct MockUart {
    /// 发送缓冲区
    tx_buffer: [u8; BUFFER_SIZE],
    /// 接收缓冲区
    rx_buffer: [u8; BUFFER_SIZE],
    /// 发送缓冲区头指针
    tx_head: usize,
    /// 发送缓冲区尾指针
    tx_tail: usize,
    /// 接收缓冲区头指针
    rx_head: usize,
    /// 接收缓冲区尾指针
    rx_tail: usize,
    /// 设备是否就绪
    ready: bool,
    /// 发送字节计数
    tx_count: usize,
    /// 接收字节计数
    rx_count: usize,
    /// 发送缓冲区满时丢弃的字节数
    tx_overruns: usize,
}

impl MockUart {
    /// 创建新的 Mock UART 实例（就绪状态）
    pub const fn new() -> Self {
        Self {
            tx_buffer: [0; BUFFER_SIZE],
            rx_buffer: [0; BUFFER_SIZE],
            tx_head: 0,
            tx_tail: 0,
            rx_head: 0,
            rx_tail: 0,
            ready: true,
            tx_count: 0,
            rx_count: 0,
            tx_overruns: 0,
        }
    }

    /// 创建一个未就绪的设备（设备树中存在但驱动未加载）
    pub const fn not_ready() -> Self {
        let mut uart = Self::new();
        uart.ready = false;
        uart
    }

    /// 设置设备就绪状态（测试用）
    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    /// 模拟接收数据（测试用）
    ///
    /// 返回实际放入接收缓冲区的字节数
    pub fn mock_receive(&mut self, data: &[u8]) -> usize {
        let mut count = 0;
        for &byte in data {
            let next = (self.rx_head + 1) % BUFFER_SIZE;
            if next == self.rx_tail {
                break; // 缓冲区满
            }
            self.rx_buffer[self.rx_head] = byte;
            self.rx_head = next;
            count += 1;
        }
        count
    }

    /// 取出已发送的数据到固定缓冲区（测试用）
    ///
    /// 返回实际复制的字节数
    pub fn mock_get_transmitted_to(&mut self, buf: &mut [u8]) -> usize {
        let mut count = 0;
        while self.tx_tail != self.tx_head && count < buf.len() {
            buf[count] = self.tx_buffer[self.tx_tail];
            self.tx_tail = (self.tx_tail + 1) % BUFFER_SIZE;
            count += 1;
        }
        count
    }

    /// 获取发送字节总数
    pub fn tx_count(&self) -> usize {
        self.tx_count
    }

    /// 获取接收字节总数
    pub fn rx_count(&self) -> usize {
        self.rx_count
    }

    /// 发送缓冲区溢出丢弃的字节数
    pub fn tx_overruns(&self) -> usize {
        self.tx_overruns
    }

    /// 获取接收缓冲区中的数据量
    pub fn rx_available(&self) -> usize {
        if self.rx_head >= self.rx_tail {
            self.rx_head - self.rx_tail
        } else {
            BUFFER_SIZE - self.rx_tail + self.rx_head
        }
    }
}

impl Default for MockUart {
    fn default() -> Self {
        Self::new()
    }
}

impl PolledUart for MockUart {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn poll_in(&mut self) -> Option<u8> {
        if self.rx_tail == self.rx_head {
            return None;
        }
        let byte = self.rx_buffer[self.rx_tail];
        self.rx_tail = (self.rx_tail + 1) % BUFFER_SIZE;
        self.rx_count += 1;
        Some(byte)
    }

    fn poll_out(&mut self, byte: u8) {
        let next = (self.tx_head + 1) % BUFFER_SIZE;
        if next == self.tx_tail {
            self.tx_overruns += 1;
            return;
        }
        self.tx_buffer[self.tx_head] = byte;
        self.tx_head = next;
        self.tx_count += 1;
    }
}

// ============================================================================
// 单元测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_uart_receive_and_poll() {
        let mut uart = MockUart::new();
        assert!(uart.is_ready());

        assert_eq!(uart.mock_receive(b"Hi"), 2);
        assert_eq!(uart.rx_available(), 2);
        assert_eq!(uart.poll_in(), Some(b'H'));
        assert_eq!(uart.poll_in(), Some(b'i'));
        assert_eq!(uart.poll_in(), None);
        assert_eq!(uart.rx_count(), 2);
    }

    #[test]
    fn test_mock_uart_transmit() {
        let mut uart = MockUart::new();
        for &b in b"World" {
            uart.poll_out(b);
        }
        assert_eq!(uart.tx_count(), 5);

        let mut buf = [0u8; 10];
        let n = uart.mock_get_transmitted_to(&mut buf);
        assert_eq!(&buf[..n], b"World");
    }

    #[test]
    fn test_mock_uart_tx_overrun() {
        let mut uart = MockUart::new();
        for _ in 0..BUFFER_SIZE + 10 {
            uart.poll_out(b'x');
        }
        // 环形缓冲区保留一个空槽
        assert_eq!(uart.tx_count(), BUFFER_SIZE - 1);
        assert_eq!(uart.tx_overruns(), 11);
    }

    #[test]
    fn test_mock_uart_not_ready() {
        let mut uart = MockUart::not_ready();
        assert!(!uart.is_ready());
        uart.set_ready(true);
        assert!(uart.is_ready());
    }
}
