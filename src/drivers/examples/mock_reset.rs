//! # Mock 复位原因锁存器
//!
//! ```rust
//! use madi::drivers::examples::MockResetLatch;
//! use madi::drivers::ResetLatch;
//!
//! let mut latch = MockResetLatch::new(1 << 4);
//! assert_eq!(latch.read(), 1 << 4);
//! latch.clear();
//! assert_eq!(latch.read(), 0);
//! ```

use crate::drivers::ResetLatch;

/// Mock 复位原因锁存器
pub struct MockResetLatch {
    /// 锁存的原始复位原因位
    raw: u32,
    /// 读取次数
    reads: usize,
    /// 清除次数
    clears: usize,
}

impl MockResetLatch {
    /// 以给定的原始复位原因创建
    pub const fn new(raw: u32) -> Self {
        Self {
            raw,
            reads: 0,
            clears: 0,
        }
    }

    /// 模拟硬件再次置位（测试用）
    pub fn mock_latch(&mut self, raw: u32) {
        self.raw |= raw;
    }

    /// 读取次数
    pub fn reads(&self) -> usize {
        self.reads
    }

    /// 清除次数
    pub fn clears(&self) -> usize {
        self.clears
    }
}

impl ResetLatch for MockResetLatch {
    fn read(&mut self) -> u32 {
        self.reads += 1;
        self.raw
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.raw = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latch_accumulates_until_cleared() {
        let mut latch = MockResetLatch::new(0b0001);
        latch.mock_latch(0b1000);
        assert_eq!(latch.read(), 0b1001);
        latch.clear();
        assert_eq!(latch.read(), 0);
        assert_eq!(latch.reads(), 2);
        assert_eq!(latch.clears(), 1);
    }
}
