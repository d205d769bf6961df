//! # 板级接口
//!
//! 启动流程依赖的板级能力：初始化、复位原因、序列号、启动时间、名称和版本。
//! 时钟、USB、BLE 等外设的初始化留给具体板子的 [`Board::init`] 实现。
//!
//! - [`reboot`]: 复位原因解码和缓存
//! - [`serial`]: 序列号字符串
//! - [`version`]: 应用版本号
//! - [`gpio`]: GPIO 能力集合和 LED 引脚
//! - `sim`: 主机模拟板（需要 `std`）

pub mod gpio;
pub mod reboot;
pub mod serial;
pub mod version;

#[cfg(feature = "std")]
pub mod sim;

pub use gpio::{Gpio, GpioCallback, LedGpio};
pub use reboot::{RebootReason, RebootReasonCache, ResetCause};
pub use serial::SerialNumber;
pub use version::{AppVersion, APP_VERSION};

use crate::error::Result;

/// 板级接口
pub trait Board {
    /// 板级初始化，必须最先调用
    fn init(&mut self) -> Result<()>;

    /// 板子名称
    fn name(&self) -> &'static str;

    /// 本次启动的复位原因
    fn reboot_reason(&self) -> RebootReason;

    /// 序列号字符串
    fn serial_number(&self) -> &str;

    /// 启动以来的毫秒数
    fn time_since_boot_ms(&self) -> u32;

    /// 启动以来的微秒数
    fn time_since_boot_us(&self) -> u64;

    /// 固件版本
    fn version(&self) -> AppVersion {
        APP_VERSION
    }
}
