//! 进程里先装了别的 `log` 实现时的启动行为

use madi::app;
use madi::board::{Board, RebootReason};
use madi::console::SyncConsole;
use madi::drivers::examples::MockTransport;
use madi::logging::{self, ConsoleBackend};
use madi::{MadiError, Result};

static CONSOLE: SyncConsole<MockTransport> = SyncConsole::new(MockTransport::new());
static SINK: ConsoleBackend<'static, MockTransport> = ConsoleBackend::new(&CONSOLE);

struct ForeignLogger;

impl log::Log for ForeignLogger {
    fn enabled(&self, _: &log::Metadata) -> bool {
        false
    }

    fn log(&self, _: &log::Record) {}

    fn flush(&self) {}
}

static FOREIGN: ForeignLogger = ForeignLogger;

struct QuietBoard;

impl Board for QuietBoard {
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "quiet"
    }

    fn reboot_reason(&self) -> RebootReason {
        RebootReason::PowerOn
    }

    fn serial_number(&self) -> &str {
        "unknown"
    }

    fn time_since_boot_ms(&self) -> u32 {
        0
    }

    fn time_since_boot_us(&self) -> u64 {
        0
    }
}

#[test]
fn test_boot_reports_logger_conflict_on_console() {
    log::set_logger(&FOREIGN).unwrap();

    let mut board = QuietBoard;
    assert_eq!(
        app::boot(&mut board, || 0, &SINK),
        Err(MadiError::LoggerConflict)
    );
    assert!(!logging::is_installed());
    assert!(CONSOLE.is_ready());
    assert_eq!(logging::registry().len(), 1);

    let text = CONSOLE.with_transport(|t| String::from_utf8_lossy(t.transmitted()).into_owned());
    assert_eq!(text, "logging: another logger is installed\n");
}
