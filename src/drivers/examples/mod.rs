//! # 示例驱动实现
//!
//! 提供基于 drivers traits 的 Mock 驱动实现，用于：
//! - 演示如何接入厂商 HAL
//! - 单元测试和集成测试
//! - 在没有真实硬件时进行开发（模拟器）
//!
//! ## 可用驱动
//!
//! | 驱动 | 实现的 Trait | 说明 |
//! |------|-------------|------|
//! | [`MockTransport`] | `Transport` | 可模拟短写和失败的传输后端 |
//! | [`MockUart`] | `PolledUart` | 轮询 UART |
//! | [`MockPin`] | `PinDriver` | 单个 GPIO 引脚 |
//! | [`MockResetLatch`] | `ResetLatch` | 复位原因锁存器 |
//!
//! ## 使用示例
//!
//! ```rust
//! use madi::console::SyncConsole;
//! use madi::drivers::examples::MockTransport;
//!
//! let console = SyncConsole::new(MockTransport::new());
//! console.init().unwrap();
//! assert_eq!(console.write(b"Hello"), Ok(5));
//! ```

mod mock_gpio;
mod mock_reset;
mod mock_transport;
mod mock_uart;

pub use mock_gpio::MockPin;
pub use mock_reset::MockResetLatch;
pub use mock_transport::MockTransport;
pub use mock_uart::MockUart;
