//! # 轮询 UART 后端
//!
//! 通过 [`PolledUart`] 逐字节收发。设备就绪状态只在 `init` 时采样一次，
//! 未就绪时所有读写都返回 [`MadiError::DeviceUnavailable`]。
//!
//! ```rust
//! use madi::console::backend::uart::UartTransport;
//! use madi::drivers::examples::MockUart;
//! use madi::drivers::Transport;
//!
//! let mut uart = MockUart::new();
//! uart.mock_receive(b"ab");
//!
//! let mut t = UartTransport::new(uart);
//! t.init().unwrap();
//! let mut buf = [0u8; 8];
//! assert_eq!(t.read(&mut buf), Ok(2));
//! ```

use crate::drivers::{PolledUart, Transport};
use crate::error::{MadiError, Result};

/// 后端名称
pub const NAME: &str = "uart";

/// 轮询 UART 后端
pub struct UartTransport<U: PolledUart> {
    uart: U,
    ready: bool,
    /// 是否作为输入设备（没有被选为控制台输入时只写）
    rx_enabled: bool,
}

impl<U: PolledUart> UartTransport<U> {
    /// 双向 UART
    pub const fn new(uart: U) -> Self {
        Self {
            uart,
            ready: false,
            rx_enabled: true,
        }
    }

    /// 只写 UART，读取总是返回 `DeviceUnavailable`
    pub const fn tx_only(uart: U) -> Self {
        Self {
            uart,
            ready: false,
            rx_enabled: false,
        }
    }

    /// `init` 时采样的就绪状态
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// 访问底层外设
    pub fn uart(&self) -> &U {
        &self.uart
    }

    /// 可变访问底层外设
    pub fn uart_mut(&mut self) -> &mut U {
        &mut self.uart
    }
}

impl<U: PolledUart> Transport for UartTransport<U> {
    fn init(&mut self) -> Result<()> {
        self.ready = self.uart.is_ready();
        Ok(())
    }

    fn deinit(&mut self) -> Result<()> {
        self.ready = false;
        Ok(())
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn write(&mut self, data: &[u8]) -> Result<usize> {
        if !self.ready {
            return Err(MadiError::DeviceUnavailable);
        }
        for &byte in data {
            self.uart.poll_out(byte);
        }
        Ok(data.len())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if !self.ready || !self.rx_enabled {
            return Err(MadiError::DeviceUnavailable);
        }
        let mut count = 0;
        for slot in buf.iter_mut() {
            match self.uart.poll_in() {
                Some(byte) => *slot = byte,
                None => break,
            }
            count += 1;
        }
        Ok(count)
    }
}
