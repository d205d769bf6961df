//! # 日志
//!
//! 日志从 `log` 门面进入，依次经过：
//!
//! ```text
//! log::info!() -> Logger（打时间戳）-> BackendRegistry（按注册顺序分发）
//!              -> ConsoleBackend（分帧 + 续写）-> SyncConsole -> Transport
//! ```
//!
//! 全局入口：
//!
//! - [`init`]：安装全局日志器，时间戳来自板级时钟
//! - [`add_backend`]：追加一个后端
//! - [`console_backend_init`]：把控制台注册为日志后端
//!
//! 日志级别在编译期通过 `MADI_LOG` 环境变量配置，见 [`crate::config::default_level_filter`]。
//!
//! ```rust,no_run
//! use madi::console::SyncConsole;
//! use madi::drivers::examples::MockTransport;
//! use madi::logging::{self, ConsoleBackend};
//!
//! static CONSOLE: SyncConsole<MockTransport> = SyncConsole::new(MockTransport::new());
//! static SINK: ConsoleBackend<'static, MockTransport> = ConsoleBackend::new(&CONSOLE);
//!
//! CONSOLE.init().unwrap();
//! logging::init(|| 0);
//! logging::console_backend_init(&SINK).unwrap();
//! log::info!("boot ok");
//! ```

pub mod console_sink;
pub mod framer;
pub mod logger;
pub mod record;
pub mod registry;

pub use console_sink::ConsoleBackend;
pub use framer::{frame_into, LineBuffer};
pub use logger::{Clock, Logger};
pub use record::{LogRecord, Stringify};
pub use registry::{BackendRegistry, DispatchReport, LogBackend};

use core::sync::atomic::{AtomicBool, Ordering};

use spin::Once;

use crate::config;
use crate::drivers::Transport;
use crate::error::Result;

static REGISTRY: BackendRegistry<'static> = BackendRegistry::new();
static LOGGER: Once<Logger<'static>> = Once::new();
static INSTALLED: AtomicBool = AtomicBool::new(false);

/// 安装全局日志器
///
/// 只有第一次调用生效，之后的调用（包括换了时钟的）被忽略。
/// 如果进程里已经有别的 `log` 实现，返回 `false`。
pub fn init(clock: Clock) -> bool {
    let logger = LOGGER.call_once(|| Logger::new(&REGISTRY, clock, config::default_level_filter()));
    match log::set_logger(logger) {
        Ok(()) => {
            log::set_max_level(logger.level());
            INSTALLED.store(true, Ordering::Release);
            true
        }
        Err(_) => is_installed(),
    }
}

/// 全局日志器是否已经安装
pub fn is_installed() -> bool {
    INSTALLED.load(Ordering::Acquire)
}

/// 追加一个全局日志后端
pub fn add_backend(backend: &'static dyn LogBackend) -> Result<usize> {
    REGISTRY.add_backend(backend)
}

/// 把控制台注册为全局日志后端
pub fn console_backend_init<T: Transport + 'static, const N: usize>(
    sink: &'static ConsoleBackend<'static, T, N>,
) -> Result<usize> {
    add_backend(sink)
}

/// 全局注册表
pub fn registry() -> &'static BackendRegistry<'static> {
    &REGISTRY
}
