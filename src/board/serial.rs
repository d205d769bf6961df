//! 设备序列号字符串

use core::fmt;

/// 设备 ID 的字节数
pub const DEVICE_ID_LEN: usize = 8;
/// 十六进制序列号的长度
pub const SERIAL_NUMBER_LEN: usize = DEVICE_ID_LEN * 2;

const UNKNOWN: &str = "unknown";
const HEX: &[u8; 16] = b"0123456789abcdef";

/// 由设备 ID 生成的序列号，16 个小写十六进制字符，读不到 ID 时为 `"unknown"`
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SerialNumber {
    buf: [u8; SERIAL_NUMBER_LEN],
    len: usize,
}

impl SerialNumber {
    pub const fn unknown() -> Self {
        let mut buf = [0u8; SERIAL_NUMBER_LEN];
        let src = UNKNOWN.as_bytes();
        let mut i = 0;
        while i < src.len() {
            buf[i] = src[i];
            i += 1;
        }
        Self {
            buf,
            len: src.len(),
        }
    }

    /// 取设备 ID 的前 8 个字节，不足的部分按 0 处理；空 ID 视为读取失败
    pub fn from_device_id(id: &[u8]) -> Self {
        if id.is_empty() {
            return Self::unknown();
        }
        let mut buf = [0u8; SERIAL_NUMBER_LEN];
        for i in 0..DEVICE_ID_LEN {
            let byte = id.get(i).copied().unwrap_or(0);
            buf[i * 2] = HEX[(byte >> 4) as usize];
            buf[i * 2 + 1] = HEX[(byte & 0x0f) as usize];
        }
        Self {
            buf,
            len: SERIAL_NUMBER_LEN,
        }
    }

    pub fn is_known(&self) -> bool {
        self.len == SERIAL_NUMBER_LEN
    }

    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or(UNKNOWN)
    }
}

impl Default for SerialNumber {
    fn default() -> Self {
        Self::unknown()
    }
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SerialNumber").field(&self.as_str()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_from_device_id() {
        let sn = SerialNumber::from_device_id(&[0xde, 0xad, 0xbe, 0xef, 0x00, 0x01, 0x02, 0x0a]);
        assert_eq!(sn.as_str(), "deadbeef0001020a");
        assert!(sn.is_known());
    }

    #[test]
    fn test_unknown() {
        let sn = SerialNumber::from_device_id(&[]);
        assert_eq!(sn.as_str(), "unknown");
        assert!(!sn.is_known());
        assert_eq!(SerialNumber::default(), sn);
    }

    #[test]
    fn test_short_and_long_ids() {
        assert_eq!(
            SerialNumber::from_device_id(&[0xab]).as_str(),
            "ab00000000000000"
        );
        assert_eq!(
            SerialNumber::from_device_id(&[0x11; 12]).as_str(),
            "1111111111111111"
        );
    }
}
