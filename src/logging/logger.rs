//! `log` 门面的实现：给记录打上启动时间戳，交给注册表分发

use log::{LevelFilter, Log, Metadata, Record};

use super::record::LogRecord;
use super::registry::BackendRegistry;
use crate::config::MAX_BACKENDS;

/// 启动以来的毫秒数
pub type Clock = fn() -> u32;

/// 分发到后端注册表的日志器
pub struct Logger<'a, const N: usize = MAX_BACKENDS> {
    registry: &'a BackendRegistry<'a, N>,
    clock: Clock,
    level: LevelFilter,
}

impl<'a, const N: usize> Logger<'a, N> {
    pub const fn new(registry: &'a BackendRegistry<'a, N>, clock: Clock, level: LevelFilter) -> Self {
        Self {
            registry,
            clock,
            level,
        }
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    pub fn registry(&self) -> &'a BackendRegistry<'a, N> {
        self.registry
    }
}

impl<const N: usize> Log for Logger<'_, N> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let record = LogRecord {
            timestamp_ms: (self.clock)(),
            level: record.level(),
            target: record.target(),
            args: *record.args(),
        };
        self.registry.dispatch(&record);
    }

    fn flush(&self) {}
}
