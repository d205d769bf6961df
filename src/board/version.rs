//! 应用版本号

use core::fmt;

use crate::config::{APP_VERSION_MAJOR, APP_VERSION_MINOR, APP_VERSION_PATCH};

/// 打包的版本号：`(major << 16) | (minor << 8) | patch`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AppVersion(u32);

/// 当前固件版本
pub const APP_VERSION: AppVersion =
    AppVersion::new(APP_VERSION_MAJOR, APP_VERSION_MINOR, APP_VERSION_PATCH);

impl AppVersion {
    pub const fn new(major: u8, minor: u8, patch: u8) -> Self {
        Self(((major as u32) << 16) | ((minor as u32) << 8) | patch as u32)
    }

    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn major(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn minor(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn patch(self) -> u8 {
        self.0 as u8
    }
}

impl fmt::Display for AppVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major(), self.minor(), self.patch())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_and_unpack() {
        let v = AppVersion::new(1, 2, 3);
        assert_eq!(v.raw(), 0x0001_0203);
        assert_eq!((v.major(), v.minor(), v.patch()), (1, 2, 3));
        assert_eq!(AppVersion::from_raw(0xff01_0203).major(), 0x01);
    }

    #[test]
    fn test_display() {
        assert_eq!(APP_VERSION.to_string(), "0.0.1");
        assert!(AppVersion::new(1, 0, 0) > AppVersion::new(0, 9, 9));
    }
}
