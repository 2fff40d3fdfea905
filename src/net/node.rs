//! 节点类型
//!
//! 拓扑中的节点分四层：core / aggregation / edge 三层交换机，以及主机。

use std::fmt;
use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use super::dpid::Dpid;
use super::id::NodeId;

/// 节点所在层级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Core,
    Aggregation,
    Edge,
    Host,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Core, Tier::Aggregation, Tier::Edge, Tier::Host];

    pub fn is_switch(self) -> bool {
        !matches!(self, Tier::Host)
    }

    /// 节点名的首字母
    pub fn prefix(self) -> char {
        match self {
            Tier::Core => 'c',
            Tier::Aggregation => 'a',
            Tier::Edge => 'e',
            Tier::Host => 'h',
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Tier::Core => "core",
            Tier::Aggregation => "aggregation",
            Tier::Edge => "edge",
            Tier::Host => "host",
        };
        f.write_str(s)
    }
}

/// 节点标识：交换机用 dpid，主机用 IP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeAddr {
    Dpid(Dpid),
    Ip(Ipv4Addr),
}

impl fmt::Display for NodeAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeAddr::Dpid(dpid) => write!(f, "{dpid}"),
            NodeAddr::Ip(ip) => write!(f, "{ip}"),
        }
    }
}

/// 拓扑节点
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    name: String,
    tier: Tier,
    pod: Option<usize>,
    addr: NodeAddr,
    next_port: u32,
}

impl Node {
    /// 创建交换机节点，端口从 1 开始编号
    pub(crate) fn switch(
        id: NodeId,
        name: impl Into<String>,
        tier: Tier,
        pod: Option<usize>,
        dpid: Dpid,
    ) -> Self {
        debug_assert!(tier.is_switch());
        Self {
            id,
            name: name.into(),
            tier,
            pod,
            addr: NodeAddr::Dpid(dpid),
            next_port: 1,
        }
    }

    /// 创建主机节点，网卡从 eth0 开始编号
    pub(crate) fn host(id: NodeId, name: impl Into<String>, pod: usize, ip: Ipv4Addr) -> Self {
        Self {
            id,
            name: name.into(),
            tier: Tier::Host,
            pod: Some(pod),
            addr: NodeAddr::Ip(ip),
            next_port: 0,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// core 交换机不属于任何 pod
    pub fn pod(&self) -> Option<usize> {
        self.pod
    }

    pub fn addr(&self) -> NodeAddr {
        self.addr
    }

    pub fn dpid(&self) -> Option<Dpid> {
        match self.addr {
            NodeAddr::Dpid(dpid) => Some(dpid),
            NodeAddr::Ip(_) => None,
        }
    }

    pub fn ip(&self) -> Option<Ipv4Addr> {
        match self.addr {
            NodeAddr::Ip(ip) => Some(ip),
            NodeAddr::Dpid(_) => None,
        }
    }

    pub fn is_switch(&self) -> bool {
        self.tier.is_switch()
    }

    /// 分配下一个端口号
    pub(super) fn alloc_port(&mut self) -> u32 {
        let port = self.next_port;
        self.next_port += 1;
        port
    }
}
