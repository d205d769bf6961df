//! # 日志后端注册表
//!
//! 按注册顺序保存日志后端，每条记录依次交给所有后端。
//! 后端返回 0 表示丢弃了这条消息，只记在该后端名下，不影响其它后端，
//! 也不会被移出注册表。
//!
//! 注册表只追加不删除。修改在临界区内进行；分发时先在临界区内拷贝一份快照，
//! 然后在临界区外调用各后端，后端写入期间不会屏蔽中断。

use core::cell::RefCell;
use core::sync::atomic::{AtomicU32, Ordering};

use critical_section::Mutex;

use super::record::Stringify;
use crate::config::MAX_BACKENDS;
use crate::error::{MadiError, Result};

/// 日志后端
///
/// `write` 返回该后端接受的字节数，0 表示消息被丢弃。
pub trait LogBackend: Sync {
    fn write(&self, record: &dyn Stringify) -> usize;
}

/// 一次分发的结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// 接受了消息的后端数
    pub delivered: usize,
    /// 丢弃了消息的后端数
    pub dropped: usize,
}

struct Slots<'a, const N: usize> {
    entries: [Option<&'a dyn LogBackend>; N],
    len: usize,
}

/// 日志后端注册表
pub struct BackendRegistry<'a, const N: usize = MAX_BACKENDS> {
    slots: Mutex<RefCell<Slots<'a, N>>>,
    dropped: [AtomicU32; N],
}

impl<'a, const N: usize> BackendRegistry<'a, N> {
    pub const fn new() -> Self {
        Self {
            slots: Mutex::new(RefCell::new(Slots {
                entries: [None; N],
                len: 0,
            })),
            dropped: [const { AtomicU32::new(0) }; N],
        }
    }

    /// 追加一个后端，返回它的序号
    ///
    /// 同一个后端可以重复注册，每次注册都会单独收到消息。
    pub fn add_backend(&self, backend: &'a dyn LogBackend) -> Result<usize> {
        let result = critical_section::with(|cs| {
            let mut slots = self.slots.borrow_ref_mut(cs);
            if slots.len == N {
                return Err(MadiError::BackendSlotsFull);
            }
            let index = slots.len;
            slots.entries[index] = Some(backend);
            slots.len += 1;
            Ok(index)
        });

        match result {
            Ok(index) => log::debug!("logging: backend #{} registered", index),
            Err(e) => log::warn!("logging: cannot register backend: {}", e),
        }
        result
    }

    /// 把记录依次交给所有后端
    pub fn dispatch(&self, record: &dyn Stringify) -> DispatchReport {
        let (entries, len) = critical_section::with(|cs| {
            let slots = self.slots.borrow_ref(cs);
            (slots.entries, slots.len)
        });

        let mut report = DispatchReport::default();
        for (index, entry) in entries[..len].iter().enumerate() {
            let Some(backend) = entry else { continue };
            if backend.write(record) == 0 {
                self.dropped[index].fetch_add(1, Ordering::Relaxed);
                report.dropped += 1;
            } else {
                report.delivered += 1;
            }
        }
        report
    }

    /// 已注册的后端数
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.slots.borrow_ref(cs).len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 最多可注册的后端数
    pub const fn capacity(&self) -> usize {
        N
    }

    /// 第 `index` 个后端累计丢弃的消息数
    pub fn dropped(&self, index: usize) -> u32 {
        self.dropped
            .get(index)
            .map_or(0, |count| count.load(Ordering::Relaxed))
    }
}

impl<const N: usize> Default for BackendRegistry<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::AtomicUsize;

    struct Counting {
        calls: AtomicUsize,
        accept: bool,
    }

    impl Counting {
        const fn new(accept: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                accept,
            }
        }
    }

    impl LogBackend for Counting {
        fn write(&self, record: &dyn Stringify) -> usize {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.accept {
                return 0;
            }
            let mut buf = [0u8; 16];
            record.stringify(&mut buf).max(1)
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry: BackendRegistry<2> = BackendRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.dispatch(&"x"), DispatchReport::default());
    }

    #[test]
    fn test_capacity_exhausted() {
        let a = Counting::new(true);
        let registry: BackendRegistry<2> = BackendRegistry::new();
        assert_eq!(registry.add_backend(&a), Ok(0));
        assert_eq!(registry.add_backend(&a), Ok(1));
        assert_eq!(registry.add_backend(&a), Err(MadiError::BackendSlotsFull));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_duplicate_registration_gets_two_copies() {
        let a = Counting::new(true);
        let registry: BackendRegistry<4> = BackendRegistry::new();
        registry.add_backend(&a).unwrap();
        registry.add_backend(&a).unwrap();
        let report = registry.dispatch(&"hello");
        assert_eq!(report.delivered, 2);
        assert_eq!(a.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failure_is_counted_per_backend() {
        let bad = Counting::new(false);
        let good = Counting::new(true);
        let registry: BackendRegistry<4> = BackendRegistry::new();
        registry.add_backend(&bad).unwrap();
        registry.add_backend(&good).unwrap();

        let report = registry.dispatch(&"msg");
        assert_eq!(report, DispatchReport { delivered: 1, dropped: 1 });
        registry.dispatch(&"msg");

        assert_eq!(registry.dropped(0), 2);
        assert_eq!(registry.dropped(1), 0);
        assert_eq!(registry.dropped(9), 0);
        // 失败的后端仍然留在注册表里
        assert_eq!(bad.calls.load(Ordering::SeqCst), 2);
    }
}
