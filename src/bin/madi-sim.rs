//! 在主机上运行 MADI 固件的启动流程
//!
//! ```text
//! madi-sim [闪烁次数]
//! ```
//!
//! 不给次数时一直运行。日志级别在编译期用 `MADI_LOG` 配置。

use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use madi::app;
use madi::board::sim::{self, SimBoard};
use madi::config::PINMAP_LED;
use madi::console::backend::Selected;
use madi::console::SyncConsole;
use madi::drivers::examples::MockPin;
use madi::logging::ConsoleBackend;

static CONSOLE: SyncConsole<Selected> = SyncConsole::new(Selected::new());
static SINK: ConsoleBackend<'static, Selected> = ConsoleBackend::new(&CONSOLE);

fn main() -> ExitCode {
    let count = match std::env::args().nth(1).map(|arg| arg.parse::<u64>()) {
        None => None,
        Some(Ok(n)) => Some(n),
        Some(Err(e)) => {
            eprintln!("madi-sim: invalid blink count: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut board = SimBoard::from_process();
    if let Err(e) = app::boot(&mut board, sim::uptime_ms, &SINK) {
        eprintln!("madi-sim: boot failed: {e}");
        return ExitCode::FAILURE;
    }

    let result = app::start_led(MockPin::new(PINMAP_LED))
        .and_then(|mut led| app::blink(&mut led, count, |ms| thread::sleep(Duration::from_millis(ms))));
    if let Err(e) = result {
        log::error!("led: {}", e);
        return ExitCode::FAILURE;
    }

    let _ = CONSOLE.deinit();
    ExitCode::SUCCESS
}
