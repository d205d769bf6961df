//! # 启动流程
//!
//! ```text
//! board.init() -> logging::init(clock) -> console.init()
//!   -> 注册控制台日志后端 -> "[<复位原因>] <序列号> <版本>"
//!   -> LED 使能 -> 按周期翻转
//! ```

use core::fmt;

use crate::board::{Board, Gpio, LedGpio};
use crate::config::LED_BLINK_PERIOD_MS;
use crate::drivers::{PinDriver, Transport};
use crate::error::{MadiError, Result};
use crate::logging::{self, Clock, ConsoleBackend};

/// 启动横幅：`[<复位原因>] <序列号> <版本>`
pub struct BootBanner<'a, B: Board + ?Sized> {
    board: &'a B,
}

impl<'a, B: Board + ?Sized> BootBanner<'a, B> {
    pub fn new(board: &'a B) -> Self {
        Self { board }
    }
}

impl<B: Board + ?Sized> fmt::Display for BootBanner<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {}",
            self.board.reboot_reason(),
            self.board.serial_number(),
            self.board.version()
        )
    }
}

/// 启动：板级初始化，接通日志，打印启动横幅
///
/// 板级初始化失败不会中止启动，错误在日志可用之后补记。
///
/// 进程里已经装了别的 `log` 实现时，控制台照常初始化并注册，
/// 直接在控制台上写一行提示，然后返回 [`MadiError::LoggerConflict`]。
pub fn boot<B, T, const N: usize>(
    board: &mut B,
    clock: Clock,
    sink: &'static ConsoleBackend<'static, T, N>,
) -> Result<()>
where
    B: Board + ?Sized,
    T: Transport + 'static,
{
    let board_status = board.init();

    let installed = logging::init(clock);
    sink.console().init()?;
    logging::console_backend_init(sink)?;

    if !installed {
        sink.write_line(&"logging: another logger is installed")?;
        return Err(MadiError::LoggerConflict);
    }

    if let Err(e) = board_status {
        log::error!("board: init failed: {}", e);
    }
    log::info!("{}", BootBanner::new(&*board));
    Ok(())
}

/// 创建并使能 LED
pub fn start_led<P: PinDriver>(pin: P) -> Result<LedGpio<P>> {
    let mut led = LedGpio::create(pin)?;
    led.enable()?;
    Ok(led)
}

/// 按 [`LED_BLINK_PERIOD_MS`] 周期翻转 LED
///
/// `count` 为 `None` 时永远运行；`sleep_ms` 由调用方提供延时。
pub fn blink<P, F>(led: &mut LedGpio<P>, count: Option<u64>, mut sleep_ms: F) -> Result<()>
where
    P: PinDriver,
    F: FnMut(u64),
{
    let mut toggles = 0u64;
    while count.is_none_or(|limit| toggles < limit) {
        let on = led.toggle()?;
        log::trace!("led: {}", if on { "on" } else { "off" });
        toggles += 1;
        sleep_ms(LED_BLINK_PERIOD_MS);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{AppVersion, RebootReason};
    use crate::config::PINMAP_LED;
    use crate::drivers::examples::MockPin;
    use crate::logging::framer::format_into;

    struct FixedBoard;

    impl Board for FixedBoard {
        fn init(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &'static str {
            "fixed"
        }

        fn reboot_reason(&self) -> RebootReason {
            RebootReason::Pin
        }

        fn serial_number(&self) -> &str {
            "0011223344556677"
        }

        fn time_since_boot_ms(&self) -> u32 {
            0
        }

        fn time_since_boot_us(&self) -> u64 {
            0
        }

        fn version(&self) -> AppVersion {
            AppVersion::new(1, 2, 3)
        }
    }

    #[test]
    fn test_banner() {
        let mut buf = [0u8; 64];
        let n = format_into(&mut buf, format_args!("{}", BootBanner::new(&FixedBoard)));
        assert_eq!(&buf[..n], b"[pin] 0011223344556677 1.2.3");
    }

    #[test]
    fn test_start_led_rejects_other_pins() {
        assert!(start_led(MockPin::new(PINMAP_LED + 3)).is_err());
    }

    #[test]
    fn test_blink_counts_and_sleeps() {
        let mut led = start_led(MockPin::new(PINMAP_LED)).unwrap();
        let mut slept = 0;
        blink(&mut led, Some(3), |ms| slept += ms).unwrap();
        assert_eq!(slept, 3 * LED_BLINK_PERIOD_MS);
        assert!(led.pin().mock_get_output());
        assert_eq!(led.pin().write_count(), 3);
    }
}
