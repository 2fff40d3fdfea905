//! 命名与编址规则
//!
//! 控制器侧的转发逻辑会解析这些名字和 dpid，所以格式必须逐字节一致：
//!
//! | 节点        | 名字                      | 标识                         |
//! |-------------|---------------------------|------------------------------|
//! | core        | `c{k:02}{row+1:02}{col+1:02}` | `0000000000` + 同样 6 位 |
//! | aggregation | `a{pod:02}{j+k/2:02}01`   | `0000000000{pod:02}{j+k/2:02}01` |
//! | edge        | `e{pod:02}{j:02}01`       | `0000000000{pod:02}{j:02}01` |
//! | host        | `h{pod}{edge}{offset}`    | `10.{pod}.{edge}.{offset}`   |
//!
//! 主机 offset 从 2 开始。主机名各字段不补零，k > 10 时会出现歧义
//! （如 `h1102` 既可以是 pod 1/edge 10，也可以是 pod 11/edge 0），
//! 因此 k > 10 时主机名的每个字段都补零到两位。

use std::net::Ipv4Addr;

use crate::net::Dpid;

/// 主机名各字段保持一位数字的最大 k
pub const UNPADDED_HOST_MAX_K: usize = 10;

/// 主机 offset 的起始值，.0 与 .1 不分配给主机
pub const HOST_OFFSET_BASE: usize = 2;

pub fn core_name(k: usize, row: usize, col: usize) -> String {
    format!("c{k:02}{:02}{:02}", row + 1, col + 1)
}

pub fn core_dpid(k: usize, row: usize, col: usize) -> Dpid {
    Dpid::from_fields(k, row + 1, col + 1)
}

/// `local` 已经加上了 k/2 的偏移
pub fn agg_name(pod: usize, local: usize) -> String {
    format!("a{pod:02}{local:02}01")
}

pub fn agg_dpid(pod: usize, local: usize) -> Dpid {
    Dpid::from_fields(pod, local, 1)
}

pub fn edge_name(pod: usize, local: usize) -> String {
    format!("e{pod:02}{local:02}01")
}

pub fn edge_dpid(pod: usize, local: usize) -> Dpid {
    Dpid::from_fields(pod, local, 1)
}

pub fn host_name(k: usize, pod: usize, edge: usize, offset: usize) -> String {
    if k <= UNPADDED_HOST_MAX_K {
        format!("h{pod}{edge}{offset}")
    } else {
        format!("h{pod:02}{edge:02}{offset:02}")
    }
}

pub fn host_ip(pod: usize, edge: usize, offset: usize) -> Ipv4Addr {
    debug_assert!(pod <= 255 && edge <= 255 && offset <= 255);
    Ipv4Addr::new(10, pod as u8, edge as u8, offset as u8)
}
