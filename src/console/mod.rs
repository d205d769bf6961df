//! # 同步控制台
//!
//! 把多个并发的生产者串行化到同一条物理字符流上。
//!
//! [`SyncConsole`] 独占持有一个 [`Transport`] 后端，用一把自旋锁包住它：
//! 每次 `write`/`read` 从加锁到解锁都是完整的临界区，读写互斥，
//! 因此任意两次写入的字节在输出流上不会交错。
//!
//! ## 生命周期
//!
//! ```text
//! Uninitialized --init()--> Ready --deinit()--> Uninitialized
//!                           Ready --init()----> Ready (重新初始化，被锁串行化)
//! ```
//!
//! 未初始化时的读写返回 [`MadiError::DeviceUnavailable`]。
//! 重新初始化失败后控制台回到 `Uninitialized`。
//!
//! ## 中断上下文
//!
//! 单核目标上，中断打断了持锁的线程后再去自旋等锁会永远等下去。
//! 因此在中断上下文中 `write`/`read` 只尝试一次加锁，拿不到锁返回
//! [`MadiError::Busy`]，日志后端把这一行记为丢弃。线程上下文照常阻塞等锁。
//! `init`/`deinit` 只能在线程上下文调用。
//!
//! ## 使用示例
//!
//! ```rust
//! use madi::console::SyncConsole;
//! use madi::drivers::examples::MockTransport;
//!
//! static CONSOLE: SyncConsole<MockTransport> = SyncConsole::new(MockTransport::new());
//!
//! CONSOLE.init().unwrap();
//! CONSOLE.write(b"boot ").unwrap();
//! CONSOLE.write(b"ok\n").unwrap();
//! CONSOLE.with_transport(|t| assert_eq!(t.transmitted(), b"boot ok\n"));
//! ```

pub mod backend;

use core::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

use spin::{Mutex, MutexGuard};

use crate::drivers::Transport;
use crate::error::{MadiError, Result};

/// 控制台状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConsoleState {
    /// 未初始化（或已 deinit）
    Uninitialized = 0,
    /// 可以读写
    Ready = 1,
}

impl ConsoleState {
    const fn from_u8(value: u8) -> Self {
        match value {
            1 => ConsoleState::Ready,
            _ => ConsoleState::Uninitialized,
        }
    }
}

/// 控制台累计统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsoleStats {
    /// 后端累计接受的字节数
    pub bytes_written: usize,
    /// 后端累计读出的字节数
    pub bytes_read: usize,
}

/// 当前是否处于中断上下文
///
/// Cortex-M 上读取 ICSR 的 VECTACTIVE，其它平台总是返回 `false`。
pub fn in_interrupt() -> bool {
    #[cfg(feature = "cortex-m")]
    {
        !matches!(
            cortex_m::peripheral::SCB::vect_active(),
            cortex_m::peripheral::scb::VectActive::ThreadMode
        )
    }
    #[cfg(not(feature = "cortex-m"))]
    {
        false
    }
}

/// 带互斥锁的控制台
pub struct SyncConsole<T: Transport> {
    transport: Mutex<T>,
    in_interrupt: fn() -> bool,
    state: AtomicU8,
    bytes_written: AtomicUsize,
    bytes_read: AtomicUsize,
}

impl<T: Transport> SyncConsole<T> {
    /// 创建控制台，后端尚未初始化
    pub const fn new(transport: T) -> Self {
        Self::with_context_check(transport, in_interrupt)
    }

    /// 使用自定义的中断上下文检测
    pub const fn with_context_check(transport: T, in_interrupt: fn() -> bool) -> Self {
        Self {
            transport: Mutex::new(transport),
            in_interrupt,
            state: AtomicU8::new(ConsoleState::Uninitialized as u8),
            bytes_written: AtomicUsize::new(0),
            bytes_read: AtomicUsize::new(0),
        }
    }

    /// 初始化后端并标记为就绪
    ///
    /// 可以重复调用，每次都会重新配置后端；后端初始化失败时控制台回到未初始化状态。
    pub fn init(&self) -> Result<()> {
        let name = {
            let mut transport = self.transport.lock();
            self.state
                .store(ConsoleState::Uninitialized as u8, Ordering::Release);
            transport.init()?;
            self.state.store(ConsoleState::Ready as u8, Ordering::Release);
            transport.name()
        };
        // 锁释放之后才能打日志，控制台本身可能就是日志后端
        log::debug!("console: {} backend ready", name);
        Ok(())
    }

    /// 等待正在进行的读写结束，释放后端
    pub fn deinit(&self) -> Result<()> {
        let mut transport = self.transport.lock();
        self.state
            .store(ConsoleState::Uninitialized as u8, Ordering::Release);
        transport.deinit()
    }

    /// 当前状态
    pub fn state(&self) -> ConsoleState {
        ConsoleState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// 是否可以读写
    pub fn is_ready(&self) -> bool {
        self.state() == ConsoleState::Ready
    }

    fn acquire(&self) -> Result<MutexGuard<'_, T>> {
        if (self.in_interrupt)() {
            self.transport.try_lock().ok_or(MadiError::Busy)
        } else {
            Ok(self.transport.lock())
        }
    }

    /// 写入数据
    ///
    /// 返回后端接受的字节数，可能少于 `data.len()`。
    /// 中断上下文中锁被占用时返回 [`MadiError::Busy`]。
    pub fn write(&self, data: &[u8]) -> Result<usize> {
        let transport = self.acquire()?;
        self.write_locked(transport, data)
    }

    /// 不等锁的写入，锁被占用时返回 [`MadiError::Busy`]
    pub fn try_write(&self, data: &[u8]) -> Result<usize> {
        let transport = self.transport.try_lock().ok_or(MadiError::Busy)?;
        self.write_locked(transport, data)
    }

    /// 读取数据
    ///
    /// 没有数据时立即返回 0（阻塞型后端除外），读出的字节数不超过 `buf.len()`。
    /// 中断上下文中锁被占用时返回 [`MadiError::Busy`]。
    pub fn read(&self, buf: &mut [u8]) -> Result<usize> {
        let transport = self.acquire()?;
        self.read_locked(transport, buf)
    }

    /// 不等锁的读取，锁被占用时返回 [`MadiError::Busy`]
    pub fn try_read(&self, buf: &mut [u8]) -> Result<usize> {
        let transport = self.transport.try_lock().ok_or(MadiError::Busy)?;
        self.read_locked(transport, buf)
    }

    fn write_locked(&self, mut transport: MutexGuard<'_, T>, data: &[u8]) -> Result<usize> {
        if !self.is_ready() {
            return Err(MadiError::DeviceUnavailable);
        }
        let n = transport.write(data)?;
        self.bytes_written.fetch_add(n, Ordering::Relaxed);
        Ok(n)
    }

    fn read_locked(&self, mut transport: MutexGuard<'_, T>, buf: &mut [u8]) -> Result<usize> {
        if !self.is_ready() {
            return Err(MadiError::DeviceUnavailable);
        }
        let n = transport.read(buf)?;
        self.bytes_read.fetch_add(n, Ordering::Relaxed);
        Ok(n)
    }

    /// 累计统计
    pub fn stats(&self) -> ConsoleStats {
        ConsoleStats {
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
            bytes_read: self.bytes_read.load(Ordering::Relaxed),
        }
    }

    /// 在持锁状态下访问后端
    ///
    /// 闭包内只能调用本控制台的 `try_write`/`try_read`，也不能打日志。
    pub fn with_transport<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut transport = self.transport.lock();
        f(&mut *transport)
    }
}

// ============================================================================
// 单元测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::examples::MockTransport;

    #[test]
    fn test_io_before_init() {
        let console = SyncConsole::new(MockTransport::new());
        assert_eq!(console.state(), ConsoleState::Uninitialized);
        assert_eq!(console.write(b"x"), Err(MadiError::DeviceUnavailable));
        let mut buf = [0u8; 4];
        assert_eq!(console.read(&mut buf), Err(MadiError::DeviceUnavailable));
    }

    #[test]
    fn test_init_write_deinit() {
        let console = SyncConsole::new(MockTransport::new());
        console.init().unwrap();
        assert!(console.is_ready());
        assert_eq!(console.write(b"ab"), Ok(2));
        assert_eq!(console.write(b"c"), Ok(1));
        assert_eq!(console.stats().bytes_written, 3);

        console.deinit().unwrap();
        assert!(!console.is_ready());
        assert_eq!(console.write(b"d"), Err(MadiError::DeviceUnavailable));
        console.with_transport(|t| {
            assert_eq!(t.transmitted(), b"abc");
            assert_eq!(t.deinit_count(), 1);
        });
    }

    #[test]
    fn test_reinit() {
        let console = SyncConsole::new(MockTransport::new());
        console.init().unwrap();
        console.init().unwrap();
        assert!(console.is_ready());
        assert_eq!(console.with_transport(|t| t.init_count()), 2);
    }

    #[test]
    fn test_short_write_passthrough() {
        let console = SyncConsole::new(MockTransport::with_chunk_limit(2));
        console.init().unwrap();
        assert_eq!(console.write(b"hello"), Ok(2));
        assert_eq!(console.stats().bytes_written, 2);
    }

    #[test]
    fn test_read_empty_and_bounded() {
        let console = SyncConsole::new(MockTransport::new());
        console.init().unwrap();
        let mut buf = [0u8; 3];
        assert_eq!(console.read(&mut buf), Ok(0));

        console.with_transport(|t| t.mock_receive(b"hello"));
        assert_eq!(console.read(&mut buf), Ok(3));
        assert_eq!(&buf, b"hel");
        assert_eq!(console.stats().bytes_read, 3);
    }

    struct FailingInit {
        fail: bool,
    }

    impl Transport for FailingInit {
        fn init(&mut self) -> Result<()> {
            if self.fail { Err(MadiError::Io) } else { Ok(()) }
        }

        fn name(&self) -> &'static str {
            "failing-init"
        }

        fn write(&mut self, data: &[u8]) -> Result<usize> {
            Ok(data.len())
        }
    }

    #[test]
    fn test_failed_reinit_leaves_console_uninitialized() {
        let console = SyncConsole::new(FailingInit { fail: false });
        console.init().unwrap();
        assert!(console.is_ready());

        console.with_transport(|t| t.fail = true);
        assert_eq!(console.init(), Err(MadiError::Io));
        assert_eq!(console.state(), ConsoleState::Uninitialized);
        assert_eq!(console.write(b"x"), Err(MadiError::DeviceUnavailable));
    }

    #[test]
    fn test_try_write_when_contended() {
        let console = SyncConsole::new(MockTransport::new());
        console.init().unwrap();

        console.with_transport(|_| {
            assert_eq!(console.try_write(b"x"), Err(MadiError::Busy));
            let mut buf = [0u8; 1];
            assert_eq!(console.try_read(&mut buf), Err(MadiError::Busy));
        });
        assert_eq!(console.try_write(b"x"), Ok(1));
    }

    #[test]
    fn test_interrupt_context_does_not_spin() {
        let console = SyncConsole::with_context_check(MockTransport::new(), || true);
        console.init().unwrap();

        // 模拟中断打断了持锁的线程
        console.with_transport(|_| {
            assert_eq!(console.write(b"isr"), Err(MadiError::Busy));
        });
        assert_eq!(console.write(b"isr"), Ok(3));
        console.with_transport(|t| assert_eq!(t.transmitted(), b"isr"));
    }

    #[test]
    fn test_write_error_propagates() {
        let console = SyncConsole::new(MockTransport::new());
        console.init().unwrap();
        console.with_transport(|t| t.set_write_error(Some(MadiError::Io)));
        assert_eq!(console.write(b"x"), Err(MadiError::Io));
        assert_eq!(console.stats().bytes_written, 0);
    }
}
