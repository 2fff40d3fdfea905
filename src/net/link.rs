//! 链路类型
//!
//! 无向点对点链路，只记录两端节点及各自使用的端口号。

use super::id::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub a: NodeId,
    pub b: NodeId,
    pub a_port: u32,
    pub b_port: u32,
}

impl Link {
    /// 链路另一端
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if self.a == node {
            Some(self.b)
        } else if self.b == node {
            Some(self.a)
        } else {
            None
        }
    }

    /// `node` 在这条链路上使用的端口
    pub fn port_of(&self, node: NodeId) -> Option<u32> {
        if self.a == node {
            Some(self.a_port)
        } else if self.b == node {
            Some(self.b_port)
        } else {
            None
        }
    }
}
