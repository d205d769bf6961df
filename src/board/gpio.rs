//! # GPIO
//!
//! 应用层看到的 GPIO 能力集合。板子上只有一个 LED 引脚
//! （[`PINMAP_LED`]），其它引脚号创建失败。
//!
//! 纯输出引脚读回的是最后一次写入的值，不去读硬件；
//! 中断目前不支持，返回 [`MadiError::Unsupported`]。
//!
//! ```rust
//! use madi::board::gpio::{Gpio, LedGpio};
//! use madi::config::PINMAP_LED;
//! use madi::drivers::examples::MockPin;
//!
//! let mut led = LedGpio::create(MockPin::new(PINMAP_LED)).unwrap();
//! led.enable().unwrap();
//! assert_eq!(led.toggle(), Ok(true));
//! assert_eq!(led.get(), Ok(true));
//! ```

use crate::config::PINMAP_LED;
use crate::drivers::{PinDriver, PinMode};
use crate::error::{MadiError, Result};

/// GPIO 中断回调，参数是引脚号
pub type GpioCallback = &'static (dyn Fn(u16) + Sync);

/// GPIO 能力集合
pub trait Gpio {
    /// 配置为输出，初始为无效电平
    fn enable(&mut self) -> Result<()>;

    /// 断开引脚
    fn disable(&mut self) -> Result<()>;

    fn enable_interrupt(&mut self) -> Result<()> {
        Err(MadiError::Unsupported)
    }

    fn disable_interrupt(&mut self) -> Result<()> {
        Err(MadiError::Unsupported)
    }

    /// 设置电平
    fn set(&mut self, high: bool) -> Result<()>;

    /// 读取电平
    fn get(&self) -> Result<bool>;

    /// 注册中断回调，替换之前的回调
    fn register_callback(&mut self, callback: GpioCallback) -> Result<()>;
}

/// LED 引脚
pub struct LedGpio<P: PinDriver> {
    pin: P,
    mode: PinMode,
    value: bool,
    callback: Option<GpioCallback>,
}

impl<P: PinDriver> LedGpio<P> {
    /// 只有 LED 引脚可以创建
    pub fn create(pin: P) -> Result<Self> {
        if pin.pin_number() != PINMAP_LED {
            return Err(MadiError::OutOfRange);
        }
        Ok(Self {
            pin,
            mode: PinMode::Disconnected,
            value: false,
            callback: None,
        })
    }

    /// 翻转电平，返回新的电平
    pub fn toggle(&mut self) -> Result<bool> {
        let next = !self.get()?;
        self.set(next)?;
        Ok(next)
    }

    /// 中断分发入口，调用已注册的回调
    pub fn handle_interrupt(&self) {
        if let Some(callback) = self.callback {
            callback(self.pin.pin_number());
        }
    }

    pub fn mode(&self) -> PinMode {
        self.mode
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }

    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }
}

impl<P: PinDriver> Gpio for LedGpio<P> {
    fn enable(&mut self) -> Result<()> {
        self.pin.configure(PinMode::OutputInactive)?;
        self.mode = PinMode::OutputInactive;
        self.value = false;
        Ok(())
    }

    fn disable(&mut self) -> Result<()> {
        self.pin.configure(PinMode::Disconnected)?;
        self.mode = PinMode::Disconnected;
        Ok(())
    }

    fn set(&mut self, high: bool) -> Result<()> {
        self.value = high;
        self.pin.write_level(high)
    }

    fn get(&self) -> Result<bool> {
        if self.mode.is_output_only() {
            return Ok(self.value);
        }
        self.pin.read_level()
    }

    fn register_callback(&mut self, callback: GpioCallback) -> Result<()> {
        self.callback = Some(callback);
        Ok(())
    }
}

// ============================================================================
// 单元测试
// ============================================================================
