use log::LevelFilter;

// 日志配置
pub const LOGGING_MESSAGE_MAXLEN: usize = 128; // 单行日志缓冲区容量（含换行和结尾 NUL）
pub const MAX_BACKENDS: usize = 4;

// RTT 环形缓冲区大小
pub const RTT_UP_BUFFER_SIZE: usize = 1024;
pub const RTT_DOWN_BUFFER_SIZE: usize = 16;

// 板级配置
pub const PINMAP_LED: u16 = 20; // P0.20
pub const LED_BLINK_PERIOD_MS: u64 = 500;

/// 编译期日志级别
///
/// 通过编译时环境变量 `MADI_LOG` 配置，缺省为 `INFO`。
pub fn default_level_filter() -> LevelFilter {
    match option_env!("MADI_LOG") {
        Some("OFF") => LevelFilter::Off,
        Some("ERROR") => LevelFilter::Error,
        Some("WARN") => LevelFilter::Warn,
        Some("INFO") => LevelFilter::Info,
        Some("DEBUG") => LevelFilter::Debug,
        Some("TRACE") => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

// 板级信息
pub const BOARD_NAME: &str = "madi_nrf52840";
pub const SIM_BOARD_NAME: &str = "madi_sim";

// 应用版本
pub const APP_VERSION_MAJOR: u8 = 0;
pub const APP_VERSION_MINOR: u8 = 0;
pub const APP_VERSION_PATCH: u8 = 1;
