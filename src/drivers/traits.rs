//! # 设备驱动 Trait 定义
//!
//! 控制台和板级代码依赖的最小硬件能力集合。厂商 HAL 通过实现这些 trait
//! 接入，测试中由 [`crate::drivers::examples`] 中的 Mock 设备代替。
//!
//! ## Trait 层次结构
//!
//! ```text
//! Transport (字节传输后端，控制台的叶子节点)
//!    ├── RttTransport   (调试探针环形缓冲区)
//!    ├── UartTransport  (轮询 UART，基于 PolledUart)
//!    └── StdioTransport (标准输入输出流)
//! PolledUart (逐字节轮询的 UART 外设)
//! PinDriver  (单个 GPIO 引脚的电平读写)
//! ResetLatch (复位原因锁存寄存器)
//! ```
//!
//! 未实现的能力一律返回 [`MadiError::Unsupported`]，而不是在编译期裁掉。

use crate::error::{MadiError, Result};

// ============================================================================
// 传输后端 Trait
// ============================================================================

/// 字节传输后端
///
/// 每个构建只选择一个后端，由 [`crate::console::SyncConsole`] 独占持有并加锁访问，
/// 因此方法接收 `&mut self`，实现无需自行同步。
pub trait Transport: Send {
    /// 初始化后端
    ///
    /// 在第一次 `write`/`read` 之前由控制台调用，可能被重复调用。
    fn init(&mut self) -> Result<()>;

    /// 释放后端资源
    fn deinit(&mut self) -> Result<()> {
        Ok(())
    }

    /// 后端名称，用于日志
    fn name(&self) -> &'static str;

    /// 写入数据
    ///
    /// 返回后端实际接受的字节数，可能少于 `data.len()`，也可能为 0。
    fn write(&mut self, data: &[u8]) -> Result<usize>;

    /// 读取数据
    ///
    /// 默认实现用于不能读取的后端，立即返回 [`MadiError::DeviceUnavailable`]。
    /// 轮询型后端（RTT、UART）没有数据时立即返回 0；
    /// 阻塞型后端（标准输入）可以一直等到有输入为止。
    fn read(&mut self, _buf: &mut [u8]) -> Result<usize> {
        Err(MadiError::DeviceUnavailable)
    }

    /// 启用接收中断
    fn enable_interrupt(&mut self) -> Result<()> {
        Err(MadiError::Unsupported)
    }

    /// 禁用接收中断
    fn disable_interrupt(&mut self) -> Result<()> {
        Err(MadiError::Unsupported)
    }
}

// ============================================================================
// UART Trait
// ============================================================================

/// 轮询式 UART 外设
pub trait PolledUart: Send {
    /// 设备是否就绪
    fn is_ready(&self) -> bool;

    /// 非阻塞读取一个字节，没有数据时返回 `None`
    fn poll_in(&mut self) -> Option<u8>;

    /// 发送一个字节（阻塞到发送寄存器可用）
    fn poll_out(&mut self, byte: u8);
}

// ============================================================================
// GPIO Trait
// ============================================================================

/// GPIO 引脚模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    /// 断开（高阻，最低功耗）
    Disconnected,
    /// 输入模式
    Input,
    /// 输出模式，初始为无效电平
    OutputInactive,
}

impl PinMode {
    /// 是否为纯输出模式
    pub const fn is_output_only(self) -> bool {
        matches!(self, PinMode::OutputInactive)
    }
}

/// 单个 GPIO 引脚的底层驱动
pub trait PinDriver: Send {
    /// 引脚编号
    fn pin_number(&self) -> u16;

    /// 配置引脚模式
    fn configure(&mut self, mode: PinMode) -> Result<()>;

    /// 设置输出电平
    fn write_level(&mut self, high: bool) -> Result<()>;

    /// 读取引脚电平
    fn read_level(&self) -> Result<bool>;
}

// ============================================================================
// 复位原因 Trait
// ============================================================================

/// 复位原因锁存器
///
/// 硬件在复位时置位，软件读取后必须清除，否则下次启动会看到累积的原因。
pub trait ResetLatch {
    /// 读取原始复位原因位
    fn read(&mut self) -> u32;

    /// 清除锁存的复位原因
    fn clear(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    // 只实现必需方法的最小后端
    struct WriteOnly {
        written: usize,
    }

    impl Transport for WriteOnly {
        fn init(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &'static str {
            "write-only"
        }

        fn write(&mut self, data: &[u8]) -> Result<usize> {
            self.written += data.len();
            Ok(data.len())
        }
    }

    #[test]
    fn test_default_capabilities() {
        let mut t = WriteOnly { written: 0 };
        t.init().unwrap();
        assert_eq!(t.write(b"abc"), Ok(3));
        assert_eq!(t.written, 3);

        // 默认实现：不可读、不支持中断
        let mut buf = [0u8; 4];
        assert_eq!(t.read(&mut buf), Err(MadiError::DeviceUnavailable));
        assert_eq!(t.enable_interrupt(), Err(MadiError::Unsupported));
        assert_eq!(t.disable_interrupt(), Err(MadiError::Unsupported));
        assert_eq!(t.deinit(), Ok(()));
    }

    #[test]
    fn test_pin_mode_output_only() {
        assert!(PinMode::OutputInactive.is_output_only());
        assert!(!PinMode::Input.is_output_only());
        assert!(!PinMode::Disconnected.is_output_only());
    }
}
