//! # 传输后端
//!
//! 每个构建只选择一个控制台后端，由 Cargo feature 决定：
//!
//! | Feature | 后端 | 说明 |
//! |---------|------|------|
//! | `backend-rtt` | [`rtt::RttTransport`] | 调试探针环形缓冲区 |
//! | `backend-uart` | [`uart::UartTransport`] | 轮询 UART |
//! | `backend-stdio` | [`stdio::StdioTransport`] | 标准输入输出（需要 `std`） |
//!
//! 三个模块本身总是可用（stdio 需要 `std`），feature 只决定 [`Selected`] 指向哪一个。
//! 切换到非默认后端时需要关闭默认 feature：
//!
//! ```text
//! cargo build --no-default-features --features cortex_m3,backend-rtt
//! ```

pub mod rtt;
pub mod uart;

#[cfg(feature = "std")]
pub mod stdio;

#[cfg(any(
    all(feature = "backend-rtt", feature = "backend-uart"),
    all(feature = "backend-rtt", feature = "backend-stdio"),
    all(feature = "backend-uart", feature = "backend-stdio"),
))]
compile_error!("features `backend-rtt`, `backend-uart` and `backend-stdio` are mutually exclusive");

/// 当前构建选择的后端
#[cfg(feature = "backend-rtt")]
pub type Selected = rtt::RttTransport<
    'static,
    { crate::config::RTT_UP_BUFFER_SIZE },
    { crate::config::RTT_DOWN_BUFFER_SIZE },
>;

/// 当前构建选择的后端（UART 外设类型由板级代码提供）
#[cfg(feature = "backend-uart")]
pub type Selected<U> = uart::UartTransport<U>;

/// 当前构建选择的后端
#[cfg(feature = "backend-stdio")]
pub type Selected = stdio::StdioTransport;

/// 当前构建选择的后端名称
#[cfg(feature = "backend-rtt")]
pub const SELECTED: &str = rtt::NAME;
#[cfg(feature = "backend-uart")]
pub const SELECTED: &str = uart::NAME;
#[cfg(feature = "backend-stdio")]
pub const SELECTED: &str = stdio::NAME;
#[cfg(not(any(
    feature = "backend-rtt",
    feature = "backend-uart",
    feature = "backend-stdio"
)))]
pub const SELECTED: &str = "none";
