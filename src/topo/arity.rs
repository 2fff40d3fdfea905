//! 校验过的 fat-tree 参数 k

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ArityViolation, TopoError};

/// 缺省 k
pub const DEFAULT_ARITY: i64 = 4;

/// 名字和 dpid 中的每个数字字段都补零到两位，k 本身也要放得下
pub const MAX_ARITY: i64 = 98;

/// An even `k` in `2..=MAX_ARITY`.
///
/// All tier sizes of the fat-tree derive from it; see the count helpers below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Arity(usize);

impl Arity {
    pub fn new(k: i64) -> Result<Self, TopoError> {
        let reason = if k <= 0 {
            ArityViolation::NotPositive
        } else if k % 2 != 0 {
            ArityViolation::Odd
        } else if k > MAX_ARITY {
            ArityViolation::TooLarge
        } else {
            return Ok(Self(k as usize));
        };
        Err(TopoError::InvalidArity { k, reason })
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// k/2：每个 pod 中 aggregation / edge 交换机数，也是每台 edge 下挂的主机数
    pub fn half(self) -> usize {
        self.0 / 2
    }

    pub fn pods(self) -> usize {
        self.0
    }

    pub fn core_count(self) -> usize {
        self.half() * self.half()
    }

    pub fn agg_count(self) -> usize {
        self.pods() * self.half()
    }

    pub fn edge_count(self) -> usize {
        self.pods() * self.half()
    }

    pub fn host_count(self) -> usize {
        self.edge_count() * self.half()
    }

    pub fn switch_count(self) -> usize {
        self.core_count() + self.agg_count() + self.edge_count()
    }

    pub fn node_count(self) -> usize {
        self.switch_count() + self.host_count()
    }

    /// host-edge + edge-agg + agg-core，三段各 k·(k/2)² 条
    pub fn link_count(self) -> usize {
        let per_tier = self.pods() * self.half() * self.half();
        per_tier * 3
    }
}

impl Default for Arity {
    fn default() -> Self {
        Self(DEFAULT_ARITY as usize)
    }
}

impl TryFrom<i64> for Arity {
    type Error = TopoError;

    fn try_from(k: i64) -> Result<Self, Self::Error> {
        Self::new(k)
    }
}

impl FromStr for Arity {
    type Err = TopoError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let k = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| TopoError::ParseArity(raw.to_string()))?;
        Self::new(k)
    }
}

impl From<Arity> for i64 {
    fn from(k: Arity) -> Self {
        k.0 as i64
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
