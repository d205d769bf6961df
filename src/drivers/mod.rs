//! # 设备驱动框架
//!
//! 控制台和板级代码只通过这里的 trait 访问硬件。
//!
//! ## 模块结构
//!
//! - [`traits`]: 设备驱动 trait 定义
//! - [`macros`]: 寄存器位域宏
//! - [`examples`]: Mock 驱动实现
//!
//! ## 支持的设备类型
//!
//! | 设备类型 | Trait | 说明 |
//! |---------|-------|------|
//! | 传输后端 | `Transport` | 控制台的字节出口 |
//! | UART | `PolledUart` | 逐字节轮询收发 |
//! | GPIO | `PinDriver` | 单引脚电平读写 |
//! | 复位原因 | `ResetLatch` | 读取并清除复位原因 |
//!
//! ## 使用示例
//!
//! ### 接入自定义 UART
//!
//! ```rust
//! use madi::drivers::PolledUart;
//!
//! struct MyUart {
//!     base_addr: usize,
//! }
//!
//! impl PolledUart for MyUart {
//!     fn is_ready(&self) -> bool {
//!         self.base_addr != 0
//!     }
//!
//!     fn poll_in(&mut self) -> Option<u8> {
//!         None
//!     }
//!
//!     fn poll_out(&mut self, _byte: u8) {}
//! }
//!
//! assert!(MyUart { base_addr: 0x4000_2000 }.is_ready());
//! ```
//!
//! ### 使用位域宏
//!
//! ```rust
//! use madi::bitfield;
//!
//! bitfield! {
//!     /// UART 状态寄存器
//!     pub struct UartStatus(u32) {
//!         tx_empty: 0,
//!         rx_full: 1,
//!     }
//! }
//!
//! let status = UartStatus::from_raw(0b01);
//! assert!(status.tx_empty());
//! assert!(!status.rx_full());
//! ```

pub mod examples;
pub mod macros;
pub mod traits;

// 重新导出常用类型
pub use traits::{
    // 传输
    Transport,
    // 串行通信
    PolledUart,
    // GPIO
    PinDriver,
    PinMode,
    // 复位
    ResetLatch,
};
