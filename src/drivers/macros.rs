//! # 设备驱动宏
//!
//! 定义寄存器位域的便捷宏。

/// 定义位域的宏
///
/// 为每个单比特字段生成：
/// - 读取方法 `field()`
/// - 常量构造方法 `with_field()`，便于组合初始值
/// - 设置方法 `set_field(bool)`
///
/// # 示例
///
/// ```rust,ignore
/// bitfield! {
///     /// 复位原因寄存器
///     pub struct ResetCause(u32) {
///         /// 复位引脚
///         pin: 0,
///         /// 看门狗
///         watchdog: 4,
///     }
/// }
///
/// let cause = ResetCause::from_raw(0).with_watchdog();
/// assert!(cause.watchdog());
/// ```
#[macro_export]
macro_rules! bitfield {
    (
        $(#[$meta:meta])*
        pub struct $name:ident($type:ty) {
            $(
                $(#[$field_meta:meta])*
                $field:ident: $bit:tt
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq)]
        pub struct $name($type);

        impl $name {
            /// 从原始值创建
            pub const fn from_raw(value: $type) -> Self {
                Self(value)
            }

            /// 获取原始值
            pub const fn raw(&self) -> $type {
                self.0
            }

            /// 是否没有任何位被置位
            pub const fn is_empty(&self) -> bool {
                self.0 == 0
            }

            $(
                $crate::paste::paste! {
                    $(#[$field_meta])*
                    #[inline]
                    pub const fn $field(&self) -> bool {
                        (self.0 >> $bit) & 1 != 0
                    }

                    /// 返回置位该字段后的新值
                    #[inline]
                    pub const fn [<with_ $field>](self) -> Self {
                        Self(self.0 | (1 << $bit))
                    }

                    /// 设置位域
                    #[inline]
                    pub fn [<set_ $field>](&mut self, value: bool) {
                        if value {
                            self.0 |= 1 << $bit;
                        } else {
                            self.0 &= !(1 << $bit);
                        }
                    }
                }
            )*
        }

        impl From<$type> for $name {
            fn from(value: $type) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $type {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("raw", &self.0)
                    $(
                        .field(stringify!($field), &self.$field())
                    )*
                    .finish()
            }
        }
    };
}
