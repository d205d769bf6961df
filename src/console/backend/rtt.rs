//! # 调试探针环形缓冲区后端
//!
//! 目标端是生产者，调试探针通过 SWD 在后台读取上行缓冲区、写入下行缓冲区。
//! 两个方向都是环形缓冲区，索引用原子变量发布。同一个通道可以被多个
//! [`RttTransport`] 共享，同一侧的读写在临界区内进行，不会互相覆盖。
//!
//! 上行缓冲区满时的行为由 [`RttMode`] 决定。`init` 时如果检测到调试器连接，
//! 使用 [`RttMode::BlockIfFull`]，保证日志不丢；否则使用
//! [`RttMode::NoBlockSkip`]，避免没有探针时卡死在写入上。
//!
//! ```rust
//! use madi::console::backend::rtt::{RttChannel, RttMode, RttTransport};
//! use madi::drivers::Transport;
//!
//! static CHANNEL: RttChannel<64, 16> = RttChannel::new();
//!
//! let mut rtt = RttTransport::with_debugger_check(&CHANNEL, || false);
//! rtt.init().unwrap();
//! assert_eq!(rtt.mode(), RttMode::NoBlockSkip);
//! assert_eq!(rtt.write(b"hi\n"), Ok(3));
//!
//! let mut host = [0u8; 8];
//! let n = CHANNEL.up.host_read(&mut host);
//! assert_eq!(&host[..n], b"hi\n");
//! ```

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicUsize, Ordering};

use crate::drivers::Transport;
use crate::error::Result;

/// 后端名称
pub const NAME: &str = "rtt";

/// 上行缓冲区满时的行为
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RttMode {
    /// 放不下整条数据就全部丢弃
    NoBlockSkip,
    /// 只写入能放下的部分
    NoBlockTrim,
    /// 等待探针取走数据
    BlockIfFull,
}

// ============================================================================
// 环形缓冲区
// ============================================================================

/// 环形缓冲区
///
/// 保留一个空槽区分空和满，可用容量为 `N - 1`。
pub struct RttBuffer<const N: usize> {
    buf: UnsafeCell<[u8; N]>,
    write: AtomicUsize,
    read: AtomicUsize,
}

// 生产者只写 [write, read-1)，消费者只读 [read, write)，两段不重叠；
// 同一侧的多个调用者由临界区串行化
unsafe impl<const N: usize> Sync for RttBuffer<N> {}

impl<const N: usize> RttBuffer<N> {
    pub const fn new() -> Self {
        Self {
            buf: UnsafeCell::new([0; N]),
            write: AtomicUsize::new(0),
            read: AtomicUsize::new(0),
        }
    }

    /// 可用容量
    pub const fn capacity(&self) -> usize {
        N.saturating_sub(1)
    }

    /// 待读取的字节数
    pub fn available(&self) -> usize {
        let write = self.write.load(Ordering::Acquire);
        let read = self.read.load(Ordering::Acquire);
        if write >= read {
            write - read
        } else {
            N - read + write
        }
    }

    /// 剩余空间
    pub fn free(&self) -> usize {
        self.capacity() - self.available()
    }

    /// 生产者：写入尽可能多的数据，返回写入的字节数
    pub fn push(&self, data: &[u8]) -> usize {
        critical_section::with(|_| self.push_locked(data, false))
    }

    /// 生产者：放得下就全部写入，否则一个字节也不写
    pub fn push_all(&self, data: &[u8]) -> usize {
        critical_section::with(|_| self.push_locked(data, true))
    }

    /// 消费者：读出最多 `buf.len()` 字节
    pub fn pop(&self, buf: &mut [u8]) -> usize {
        critical_section::with(|_| {
            let n = buf.len().min(self.available());
            let mut read = self.read.load(Ordering::Relaxed);
            let base = self.buf.get() as *const u8;
            for slot in &mut buf[..n] {
                // SAFETY: read < N，该槽已由生产者发布，其它消费者被临界区挡在外面
                *slot = unsafe { base.add(read).read() };
                read = (read + 1) % N;
            }
            self.read.store(read, Ordering::Release);
            n
        })
    }

    // 调用方必须处于临界区内
    fn push_locked(&self, data: &[u8], all_or_nothing: bool) -> usize {
        let free = self.free();
        if all_or_nothing && free < data.len() {
            return 0;
        }
        let n = data.len().min(free);
        let mut write = self.write.load(Ordering::Relaxed);
        let base = self.buf.get() as *mut u8;
        for &byte in &data[..n] {
            // SAFETY: write < N，该槽不在消费者的可读区间内，其它生产者被临界区挡在外面
            unsafe { base.add(write).write(byte) };
            write = (write + 1) % N;
        }
        self.write.store(write, Ordering::Release);
        n
    }

    /// 探针侧读取（主机测试和模拟器用）
    pub fn host_read(&self, buf: &mut [u8]) -> usize {
        self.pop(buf)
    }

    /// 探针侧写入（主机测试和模拟器用）
    pub fn host_write(&self, data: &[u8]) -> usize {
        self.push(data)
    }
}

impl<const N: usize> Default for RttBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// 一对上行/下行缓冲区（通道 0）
pub struct RttChannel<const UP: usize, const DOWN: usize> {
    /// 目标 → 探针
    pub up: RttBuffer<UP>,
    /// 探针 → 目标
    pub down: RttBuffer<DOWN>,
}

impl<const UP: usize, const DOWN: usize> RttChannel<UP, DOWN> {
    pub const fn new() -> Self {
        Self {
            up: RttBuffer::new(),
            down: RttBuffer::new(),
        }
    }
}

impl<const UP: usize, const DOWN: usize> Default for RttChannel<UP, DOWN> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// 传输后端
// ============================================================================

/// 检测调试器是否连接
///
/// Cortex-M 上读取 DHCSR 的 C_DEBUGEN 位，其它平台总是返回 `false`。
pub fn debugger_attached() -> bool {
    #[cfg(feature = "cortex-m")]
    {
        cortex_m::peripheral::DCB::is_debugger_attached()
    }
    #[cfg(not(feature = "cortex-m"))]
    {
        false
    }
}

/// 调试探针环形缓冲区后端
pub struct RttTransport<'a, const UP: usize, const DOWN: usize> {
    channel: &'a RttChannel<UP, DOWN>,
    mode: RttMode,
    attached: fn() -> bool,
}

impl<'a, const UP: usize, const DOWN: usize> RttTransport<'a, UP, DOWN> {
    /// 使用平台的调试器检测
    pub const fn new(channel: &'a RttChannel<UP, DOWN>) -> Self {
        Self::with_debugger_check(channel, debugger_attached)
    }

    /// 使用自定义的调试器检测
    pub const fn with_debugger_check(channel: &'a RttChannel<UP, DOWN>, attached: fn() -> bool) -> Self {
        Self {
            channel,
            mode: RttMode::NoBlockSkip,
            attached,
        }
    }

    /// 当前模式
    pub fn mode(&self) -> RttMode {
        self.mode
    }

    /// 覆盖 `init` 选择的模式
    pub fn set_mode(&mut self, mode: RttMode) {
        self.mode = mode;
    }

    fn write_blocking(&self, data: &[u8]) -> usize {
        let mut sent = 0;
        while sent < data.len() {
            let n = self.channel.up.push(&data[sent..]);
            if n == 0 {
                core::hint::spin_loop();
            }
            sent += n;
        }
        sent
    }
}

impl<const UP: usize, const DOWN: usize> Transport for RttTransport<'_, UP, DOWN> {
    fn init(&mut self) -> Result<()> {
        self.mode = if (self.attached)() {
            RttMode::BlockIfFull
        } else {
            RttMode::NoBlockSkip
        };
        Ok(())
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn write(&mut self, data: &[u8]) -> Result<usize> {
        let up = &self.channel.up;
        let n = match self.mode {
            RttMode::NoBlockSkip => up.push_all(data),
            RttMode::NoBlockTrim => up.push(data),
            RttMode::BlockIfFull => self.write_blocking(data),
        };
        Ok(n)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        Ok(self.channel.down.pop(buf))
    }
}
