/// 固件错误类型
///
/// 控制台、传输后端、日志注册表和板级接口共用的错误分类。
/// 在 C 风格边界上通过 [`MadiError::errno`] 映射为负的 errno。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MadiError {
    // 设备相关
    /// 传输设备未就绪或不存在（控制台未初始化也归为此类）
    DeviceUnavailable,
    /// 当前后端未实现该能力
    Unsupported,

    // 传输相关
    /// 后端接受的字节为 0，或少于提交的字节且无法继续
    ShortWrite,
    /// 底层 I/O 失败
    Io,
    /// 中断上下文中传输正被占用
    Busy,

    // 资源相关
    /// 请求的资源不属于该后端（例如错误的引脚）
    OutOfRange,
    /// 日志后端槽位已满
    BackendSlotsFull,
    /// 进程里已经装了别的全局日志器
    LoggerConflict,
}

impl MadiError {
    /// 对应的负 errno 值
    pub const fn errno(self) -> i32 {
        match self {
            MadiError::DeviceUnavailable => -19, // ENODEV
            MadiError::Unsupported => -95,       // ENOTSUP
            MadiError::ShortWrite => -5,         // EIO
            MadiError::Io => -5,                 // EIO
            MadiError::Busy => -16,              // EBUSY
            MadiError::OutOfRange => -34,        // ERANGE
            MadiError::BackendSlotsFull => -28,  // ENOSPC
            MadiError::LoggerConflict => -17,    // EEXIST
        }
    }

    /// 将 `Result<usize>` 折叠为 C 风格的返回值（成功为字节数，失败为负 errno）
    pub fn to_status(result: Result<usize>) -> isize {
        match result {
            Ok(n) => n as isize,
            Err(e) => e.errno() as isize,
        }
    }
}

impl core::fmt::Display for MadiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            // 设备
            MadiError::DeviceUnavailable => write!(f, "No such device"),
            MadiError::Unsupported => write!(f, "Operation not supported"),

            // 传输
            MadiError::ShortWrite => write!(f, "Short or failed write"),
            MadiError::Io => write!(f, "I/O error"),
            MadiError::Busy => write!(f, "Device or resource busy"),

            // 资源
            MadiError::OutOfRange => write!(f, "Out of range"),
            MadiError::BackendSlotsFull => write!(f, "Logging backend slots full"),
            MadiError::LoggerConflict => write!(f, "Another logger is already installed"),
        }
    }
}

impl core::error::Error for MadiError {}

#[cfg(feature = "std")]
impl From<std::io::Error> for MadiError {
    fn from(_: std::io::Error) -> Self {
        MadiError::Io
    }
}

pub type Result<T> = core::result::Result<T, MadiError>;
