//! OpenFlow datapath id
//!
//! 交换机 dpid 由三个两位十进制字段拼接而成，并以 `0000000000` 为前缀，
//! 共 16 位。仿真器把它当作十六进制数解析，因此内部直接按 BCD 存成 `u64`，
//! 显示时用 `{:016x}` 即可还原出同样的字符串。解析时只接受十进制数字，
//! 保证解析结果与显示结果逐字节一致。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TopoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Dpid(u64);

impl Dpid {
    /// 字符串形式的固定长度
    pub const LEN: usize = 16;

    /// 由三个 0..=99 的字段构造，例如 `(4, 1, 1)` -> `0000000000040101`
    pub fn from_fields(a: usize, b: usize, c: usize) -> Self {
        debug_assert!(a < 100 && b < 100 && c < 100, "dpid field out of range");
        Self((bcd(a) << 16) | (bcd(b) << 8) | bcd(c))
    }

    /// 数值形式（与 OpenFlow FEATURES_REPLY 中的 datapath_id 一致）
    pub fn as_u64(self) -> u64 {
        self.0
    }

    /// 控制器侧的设备 URI，形如 `of:0000000000040101`
    pub fn of_uri(self) -> String {
        format!("of:{self}")
    }
}

fn bcd(v: usize) -> u64 {
    (((v / 10) as u64) << 4) | (v % 10) as u64
}

impl fmt::Display for Dpid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl FromStr for Dpid {
    type Err = TopoError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let digits = raw.strip_prefix("of:").unwrap_or(raw);
        if digits.len() != Self::LEN || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(TopoError::InvalidDpid(raw.to_string()));
        }
        u64::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| TopoError::InvalidDpid(raw.to_string()))
    }
}

impl TryFrom<String> for Dpid {
    type Error = TopoError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<Dpid> for String {
    fn from(dpid: Dpid) -> Self {
        dpid.to_string()
    }
}
