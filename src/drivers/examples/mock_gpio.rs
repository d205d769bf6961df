//! # Mock GPIO 驱动
//!
//! 模拟单个 GPIO 引脚，实现 [`PinDriver`]，用于测试 [`LedGpio`](crate::board::gpio::LedGpio)。
//!
//! ```rust
//! use madi::drivers::examples::MockPin;
//! use madi::drivers::{PinDriver, PinMode};
//!
//! let mut pin = MockPin::new(20);
//! pin.configure(PinMode::OutputInactive).unwrap();
//! pin.write_level(true).unwrap();
//! assert!(pin.mock_get_output());
//! ```

use crate::drivers::{PinDriver, PinMode};
use crate::error::{MadiError, Result};

/// Mock GPIO 引脚
pub struct MockPin {
    /// 引脚编号
    pin: u16,
    /// 引脚模式
    mode: PinMode,
    /// 当前输出电平（true = 高电平）
    state: bool,
    /// 输入电平（用于模拟外部输入）
    input_state: bool,
    /// 电平写入次数
    write_count: usize,
    /// 模拟硬件故障
    faulty: bool,
}

impl MockPin {
    /// 创建新的 Mock 引脚，初始为断开状态
    pub const fn new(pin: u16) -> Self {
        Self {
            pin,
            mode: PinMode::Disconnected,
            state: false,
            input_state: false,
            write_count: 0,
            faulty: false,
        }
    }

    /// 模拟设置输入电平（测试用）
    pub fn mock_set_input(&mut self, high: bool) {
        self.input_state = high;
    }

    /// 获取当前输出状态（测试用）
    pub fn mock_get_output(&self) -> bool {
        self.state
    }

    /// 让后续所有操作失败（测试用）
    pub fn mock_set_faulty(&mut self, faulty: bool) {
        self.faulty = faulty;
    }

    /// 获取电平写入次数
    pub fn write_count(&self) -> usize {
        self.write_count
    }

    /// 获取当前模式
    pub fn mode(&self) -> PinMode {
        self.mode
    }
}

impl PinDriver for MockPin {
    fn pin_number(&self) -> u16 {
        self.pin
    }

    fn configure(&mut self, mode: PinMode) -> Result<()> {
        if self.faulty {
            return Err(MadiError::Io);
        }
        self.mode = mode;
        if mode == PinMode::OutputInactive {
            self.state = false;
        }
        Ok(())
    }

    fn write_level(&mut self, high: bool) -> Result<()> {
        if self.faulty {
            return Err(MadiError::Io);
        }
        self.state = high;
        self.write_count += 1;
        Ok(())
    }

    fn read_level(&self) -> Result<bool> {
        if self.faulty {
            return Err(MadiError::Io);
        }
        match self.mode {
            PinMode::Input => Ok(self.input_state),
            // 输出模式下读到的是输出锁存器
            PinMode::OutputInactive => Ok(self.state),
            PinMode::Disconnected => Ok(false),
        }
    }
}

// ============================================================================
// 单元测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_pin_output() {
        let mut pin = MockPin::new(20);
        assert_eq!(pin.pin_number(), 20);
        assert_eq!(pin.mode(), PinMode::Disconnected);

        pin.configure(PinMode::OutputInactive).unwrap();
        assert!(!pin.mock_get_output());
        pin.write_level(true).unwrap();
        assert!(pin.mock_get_output());
        assert_eq!(pin.read_level(), Ok(true));
        assert_eq!(pin.write_count(), 1);
    }

    #[test]
    fn test_mock_pin_input() {
        let mut pin = MockPin::new(3);
        pin.configure(PinMode::Input).unwrap();
        pin.mock_set_input(true);
        assert_eq!(pin.read_level(), Ok(true));
    }

    #[test]
    fn test_mock_pin_faulty() {
        let mut pin = MockPin::new(1);
        pin.mock_set_faulty(true);
        assert_eq!(pin.configure(PinMode::Input), Err(MadiError::Io));
        assert_eq!(pin.write_level(true), Err(MadiError::Io));
        assert_eq!(pin.read_level(), Err(MadiError::Io));
    }
}
