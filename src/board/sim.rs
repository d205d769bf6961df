//! # 主机模拟板
//!
//! 在主机上运行启动流程用：时钟来自 [`Instant`]，复位原因来自 Mock 锁存器。

use std::time::Instant;

use spin::{Mutex, Once};

use super::reboot::{RebootReason, RebootReasonCache};
use super::serial::SerialNumber;
use super::Board;
use crate::config::SIM_BOARD_NAME;
use crate::drivers::examples::MockResetLatch;
use crate::error::Result;

static BOOT: Once<Instant> = Once::new();

fn boot_instant() -> &'static Instant {
    BOOT.call_once(Instant::now)
}

/// 进程启动以来的毫秒数（约 49 天回绕）
pub fn uptime_ms() -> u32 {
    boot_instant().elapsed().as_millis() as u32
}

/// 进程启动以来的微秒数
pub fn uptime_us() -> u64 {
    boot_instant().elapsed().as_micros() as u64
}

/// 主机模拟板
pub struct SimBoard {
    latch: Mutex<MockResetLatch>,
    reboot: RebootReasonCache,
    device_id: Option<[u8; 8]>,
    serial: Once<SerialNumber>,
}

impl SimBoard {
    /// `reset_cause` 是锁存器中的原始复位原因位
    pub fn new(device_id: Option<[u8; 8]>, reset_cause: u32) -> Self {
        Self {
            latch: Mutex::new(MockResetLatch::new(reset_cause)),
            reboot: RebootReasonCache::new(),
            device_id,
            serial: Once::new(),
        }
    }

    /// 用进程号生成设备 ID，复位原因为上电
    pub fn from_process() -> Self {
        let mut id = [0u8; 8];
        id[4..].copy_from_slice(&std::process::id().to_be_bytes());
        Self::new(Some(id), 1 << 3)
    }
}

impl Board for SimBoard {
    fn init(&mut self) -> Result<()> {
        boot_instant();
        Ok(())
    }

    fn name(&self) -> &'static str {
        SIM_BOARD_NAME
    }

    fn reboot_reason(&self) -> RebootReason {
        let mut latch = self.latch.lock();
        self.reboot.get_or_read(&mut *latch)
    }

    fn serial_number(&self) -> &str {
        self.serial
            .call_once(|| match &self.device_id {
                Some(id) => SerialNumber::from_device_id(id),
                None => SerialNumber::unknown(),
            })
            .as_str()
    }

    fn time_since_boot_ms(&self) -> u32 {
        uptime_ms()
    }

    fn time_since_boot_us(&self) -> u64 {
        uptime_us()
    }
}
