//! 全局日志器在整个进程内只能安装一次，这里的测试共享同一个全局注册表

use madi::app;
use madi::board::{Board, RebootReason};
use madi::config::PINMAP_LED;
use madi::console::SyncConsole;
use madi::drivers::examples::{MockPin, MockTransport};
use madi::logging::{self, ConsoleBackend};
use madi::Result;
use serial_test::serial;

static CONSOLE: SyncConsole<MockTransport> = SyncConsole::new(MockTransport::new());
static SINK: ConsoleBackend<'static, MockTransport> = ConsoleBackend::new(&CONSOLE);

struct TestBoard {
    initialized: bool,
}

impl Board for TestBoard {
    fn init(&mut self) -> Result<()> {
        self.initialized = true;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "test"
    }

    fn reboot_reason(&self) -> RebootReason {
        RebootReason::Watchdog
    }

    fn serial_number(&self) -> &str {
        "unknown"
    }

    fn time_since_boot_ms(&self) -> u32 {
        7
    }

    fn time_since_boot_us(&self) -> u64 {
        7000
    }
}

fn clock() -> u32 {
    7
}

fn ensure_booted() {
    if logging::registry().is_empty() {
        let mut board = TestBoard { initialized: false };
        app::boot(&mut board, clock, &SINK).unwrap();
        assert!(board.initialized);
    }
}

fn console_text() -> String {
    CONSOLE.with_transport(|t| String::from_utf8_lossy(t.transmitted()).into_owned())
}

#[test]
#[serial]
fn test_boot_prints_banner() {
    ensure_booted();
    assert!(logging::is_installed());
    assert!(console_text().contains("7 INFO madi::app: [watchdog] unknown 0.0.1\n"));
}

#[test]
#[serial]
fn test_log_macros_reach_console() {
    ensure_booted();
    log::warn!(target: "sensor", "temperature {}C", 85);
    assert!(console_text().contains("7 WARN sensor: temperature 85C\n"));
}

#[test]
#[serial]
fn test_second_init_is_harmless() {
    ensure_booted();
    assert!(logging::init(|| 0));
    assert_eq!(logging::registry().len(), 1);

    log::error!(target: "again", "still stamped by the first clock");
    assert!(console_text().contains("7 ERROR again: still stamped by the first clock\n"));
}

#[test]
#[serial]
fn test_led_after_boot() {
    ensure_booted();
    let mut led = app::start_led(MockPin::new(PINMAP_LED)).unwrap();
    app::blink(&mut led, Some(2), |_| {}).unwrap();
    assert!(!led.pin().mock_get_output());
}
