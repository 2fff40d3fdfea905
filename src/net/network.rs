//! 网络拓扑图
//!
//! 持有节点与无向链路，维护邻接表和按名字的索引。只能追加，不能删除。

use std::collections::HashMap;
use std::net::Ipv4Addr;

use super::dpid::Dpid;
use super::id::{LinkId, NodeId};
use super::link::Link;
use super::node::{Node, Tier};
use tracing::trace;

#[derive(Debug, Default, Clone)]
pub struct Network {
    nodes: Vec<Node>,
    links: Vec<Link>,
    adj: Vec<Vec<LinkId>>,
    by_name: HashMap<String, NodeId>,
}

impl Network {
    pub fn with_capacity(nodes: usize, links: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            links: Vec::with_capacity(links),
            adj: Vec::with_capacity(nodes),
            by_name: HashMap::with_capacity(nodes),
        }
    }

    /// 添加交换机节点
    pub fn add_switch(
        &mut self,
        name: impl Into<String>,
        tier: Tier,
        pod: Option<usize>,
        dpid: Dpid,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.push(Node::switch(id, name, tier, pod, dpid))
    }

    /// 添加主机节点
    pub fn add_host(&mut self, name: impl Into<String>, pod: usize, ip: Ipv4Addr) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.push(Node::host(id, name, pod, ip))
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = node.id();
        let prev = self.by_name.insert(node.name().to_string(), id);
        debug_assert!(prev.is_none(), "duplicate node name {}", node.name());
        trace!(id = id.0, name = node.name(), tier = %node.tier(), "add node");
        self.nodes.push(node);
        self.adj.push(Vec::new());
        id
    }

    /// 连接两个节点（无向链路），两端各分配一个端口
    pub fn connect(&mut self, a: NodeId, b: NodeId) -> LinkId {
        let id = LinkId(self.links.len());
        let a_port = self.nodes[a.0].alloc_port();
        let b_port = self.nodes[b.0].alloc_port();
        self.links.push(Link {
            a,
            b,
            a_port,
            b_port,
        });
        self.adj[a.0].push(id);
        self.adj[b.0].push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn node_by_name(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    /// 与 `id` 相连的链路（按创建顺序）
    pub fn links_of(&self, id: NodeId) -> impl Iterator<Item = &Link> + '_ {
        self.adj[id.0].iter().map(|l| &self.links[l.0])
    }

    /// 邻居节点（按链路创建顺序，也即端口顺序）
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.links_of(id).filter_map(move |l| l.other(id))
    }

    pub fn degree(&self, id: NodeId) -> usize {
        self.adj[id.0].len()
    }
}
