//! # 复位原因
//!
//! 硬件复位原因锁存器可能同时置位多个原因，按固定优先级取最重要的一个：
//! 看门狗 > 复位引脚 > 软件 > 上电 > 调试器 > 欠压 > 未知。
//!
//! 锁存器在每次启动时只读取并清除一次，结果缓存到进程结束。

use core::fmt;

use spin::Once;

use crate::bitfield;
use crate::drivers::ResetLatch;

bitfield! {
    /// 复位原因寄存器
    pub struct ResetCause(u32) {
        /// 外部复位引脚
        pin: 0,
        /// 软件复位
        software: 1,
        /// 欠压
        brownout: 2,
        /// 上电复位
        power_on: 3,
        /// 看门狗
        watchdog: 4,
        /// 调试器
        debug: 5,
    }
}

/// 解码后的复位原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebootReason {
    Unknown,
    Watchdog,
    Pin,
    Software,
    PowerOn,
    Debugger,
    Brownout,
}

impl RebootReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            RebootReason::Unknown => "unknown",
            RebootReason::Watchdog => "watchdog",
            RebootReason::Pin => "pin",
            RebootReason::Software => "soft",
            RebootReason::PowerOn => "power",
            RebootReason::Debugger => "debugger",
            RebootReason::Brownout => "brownout",
        }
    }

    /// 按优先级解码
    pub const fn from_cause(cause: ResetCause) -> Self {
        if cause.watchdog() {
            RebootReason::Watchdog
        } else if cause.pin() {
            RebootReason::Pin
        } else if cause.software() {
            RebootReason::Software
        } else if cause.power_on() {
            RebootReason::PowerOn
        } else if cause.debug() {
            RebootReason::Debugger
        } else if cause.brownout() {
            RebootReason::Brownout
        } else {
            RebootReason::Unknown
        }
    }
}

impl From<ResetCause> for RebootReason {
    fn from(cause: ResetCause) -> Self {
        Self::from_cause(cause)
    }
}

impl fmt::Display for RebootReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 每次启动只读取一次的复位原因
pub struct RebootReasonCache {
    reason: Once<RebootReason>,
}

impl RebootReasonCache {
    pub const fn new() -> Self {
        Self {
            reason: Once::new(),
        }
    }

    /// 第一次调用时读取并清除锁存器，之后返回缓存值
    pub fn get_or_read<L: ResetLatch + ?Sized>(&self, latch: &mut L) -> RebootReason {
        *self.reason.call_once(|| {
            let cause = ResetCause::from_raw(latch.read());
            latch.clear();
            RebootReason::from_cause(cause)
        })
    }

    /// 已缓存的复位原因
    pub fn get(&self) -> Option<RebootReason> {
        self.reason.get().copied()
    }
}

impl Default for RebootReasonCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::examples::MockResetLatch;

    #[test]
    fn test_priority() {
        let all = ResetCause::from_raw(0b11_1111);
        assert_eq!(RebootReason::from(all), RebootReason::Watchdog);

        let cause = ResetCause::from_raw(0).with_pin().with_software();
        assert_eq!(RebootReason::from(cause), RebootReason::Pin);

        let cause = ResetCause::from_raw(0).with_power_on().with_brownout();
        assert_eq!(RebootReason::from(cause), RebootReason::PowerOn);

        let cause = ResetCause::from_raw(0).with_debug().with_brownout();
        assert_eq!(RebootReason::from(cause), RebootReason::Debugger);

        assert_eq!(
            RebootReason::from(ResetCause::from_raw(0).with_brownout()),
            RebootReason::Brownout
        );
        assert_eq!(
            RebootReason::from(ResetCause::from_raw(1 << 20)),
            RebootReason::Unknown
        );
    }

    #[test]
    fn test_cache_reads_latch_once() {
        let cache = RebootReasonCache::new();
        assert_eq!(cache.get(), None);

        let mut latch = MockResetLatch::new(1 << 1);
        assert_eq!(cache.get_or_read(&mut latch), RebootReason::Software);

        latch.mock_latch(1 << 4);
        assert_eq!(cache.get_or_read(&mut latch), RebootReason::Software);
        assert_eq!(latch.reads(), 1);
        assert_eq!(latch.clears(), 1);
        assert_eq!(cache.get(), Some(RebootReason::Software));
    }

    #[test]
    fn test_as_str() {
        assert_eq!(RebootReason::Watchdog.to_string(), "watchdog");
        assert_eq!(RebootReason::PowerOn.as_str(), "power");
    }
}
