//! Fat-tree 拓扑构建

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::arity::{Arity, DEFAULT_ARITY};
use super::naming::{self, HOST_OFFSET_BASE};
use crate::error::TopoError;
use crate::net::{Link, Network, Node, NodeId, Tier};

/// 交换机使用的 OpenFlow 版本
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpenFlowVersion {
    OpenFlow10,
    #[default]
    OpenFlow13,
}

impl fmt::Display for OpenFlowVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::OpenFlow10 => "OpenFlow10",
            Self::OpenFlow13 => "OpenFlow13",
        };
        f.write_str(s)
    }
}

/// 仿真器里实例化交换机的方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchKind {
    #[default]
    OvsKernel,
    OvsUser,
}

impl fmt::Display for SwitchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::OvsKernel => "ovs_kernel",
            Self::OvsUser => "ovs_user",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SwitchOpts {
    pub protocol: OpenFlowVersion,
    pub kind: SwitchKind,
}

#[derive(Debug, Clone)]
pub struct FatTreeOpts {
    /// 未校验的 k，构建时才检查
    pub k: i64,
    pub switch: SwitchOpts,
}

impl Default for FatTreeOpts {
    fn default() -> Self {
        Self {
            k: DEFAULT_ARITY,
            switch: SwitchOpts::default(),
        }
    }
}

/// 各层节点数和链路数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub k: usize,
    pub core: usize,
    pub aggregation: usize,
    pub edge: usize,
    pub hosts: usize,
    pub links: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fat-tree k={} core={} aggregation={} edge={} hosts={} links={}",
            self.k, self.core, self.aggregation, self.edge, self.hosts, self.links
        )
    }
}

/// 构建完成的 fat-tree，只读。
///
/// 节点按创建顺序编号：先是全部 core 交换机，然后逐个 pod 依次是
/// aggregation 交换机、edge 交换机及其下挂主机。
#[derive(Debug, Clone)]
pub struct FatTreeTopology {
    k: Arity,
    switch: SwitchOpts,
    net: Network,
    hosts: Vec<NodeId>,
    edge_switches: Vec<NodeId>,
    agg_switches: Vec<NodeId>,
    core_switches: Vec<NodeId>,
}

impl FatTreeTopology {
    pub fn k(&self) -> Arity {
        self.k
    }

    fn half(&self) -> usize {
        self.k.half()
    }

    pub fn switch_opts(&self) -> SwitchOpts {
        self.switch
    }

    pub fn network(&self) -> &Network {
        &self.net
    }

    pub fn nodes(&self) -> &[Node] {
        self.net.nodes()
    }

    pub fn links(&self) -> &[Link] {
        self.net.links()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        self.net.node(id)
    }

    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.net.node_by_name(name).map(|id| self.net.node(id))
    }

    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.net.neighbors(id)
    }

    pub fn degree(&self, id: NodeId) -> usize {
        self.net.degree(id)
    }

    pub fn hosts(&self) -> &[NodeId] {
        &self.hosts
    }

    pub fn edge_switches(&self) -> &[NodeId] {
        &self.edge_switches
    }

    pub fn agg_switches(&self) -> &[NodeId] {
        &self.agg_switches
    }

    /// 按 `row * (k/2) + col` 排列
    pub fn core_switches(&self) -> &[NodeId] {
        &self.core_switches
    }

    pub fn nodes_in_tier(&self, tier: Tier) -> &[NodeId] {
        match tier {
            Tier::Core => &self.core_switches,
            Tier::Aggregation => &self.agg_switches,
            Tier::Edge => &self.edge_switches,
            Tier::Host => &self.hosts,
        }
    }

    /// 所有交换机（按创建顺序）
    pub fn switches(&self) -> impl Iterator<Item = &Node> + '_ {
        self.net.nodes().iter().filter(|n| n.is_switch())
    }

    /// # Panics
    ///
    /// 下标越界时 panic。
    pub fn host(&self, pod: usize, edge: usize, host: usize) -> NodeId {
        let half = self.half();
        let idx = (pod * half + edge) * half + host;
        self.hosts[idx]
    }

    pub fn edge(&self, pod: usize, edge: usize) -> NodeId {
        let half = self.half();
        let idx = pod * half + edge;
        self.edge_switches[idx]
    }

    pub fn agg(&self, pod: usize, agg: usize) -> NodeId {
        let half = self.half();
        let idx = pod * half + agg;
        self.agg_switches[idx]
    }

    pub fn core(&self, row: usize, col: usize) -> NodeId {
        let half = self.half();
        let idx = row * half + col;
        self.core_switches[idx]
    }

    /// 每个 pod 中第 `agg` 台 aggregation 交换机连接的 core 交换机
    pub fn core_block(&self, agg: usize) -> &[NodeId] {
        let half = self.half();
        &self.core_switches[agg * half..(agg + 1) * half]
    }

    /// 以名字表示的无向链路集合（每对按字典序排好），与创建顺序无关
    pub fn link_set(&self) -> BTreeSet<(String, String)> {
        self.links()
            .iter()
            .map(|l| {
                let a = self.node(l.a).name().to_string();
                let b = self.node(l.b).name().to_string();
                if a <= b { (a, b) } else { (b, a) }
            })
            .collect()
    }

    pub fn node_names(&self) -> BTreeSet<&str> {
        self.nodes().iter().map(|n| n.name()).collect()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            k: self.k.get(),
            core: self.core_switches.len(),
            aggregation: self.agg_switches.len(),
            edge: self.edge_switches.len(),
            hosts: self.hosts.len(),
            links: self.links().len(),
        }
    }
}

/// 用缺省交换机参数构建 fat-tree
pub fn build_fat_tree(k: i64) -> Result<FatTreeTopology, TopoError> {
    build_fat_tree_with(&FatTreeOpts {
        k,
        ..FatTreeOpts::default()
    })
}

#[tracing::instrument(skip(opts), fields(k = opts.k))]
pub fn build_fat_tree_with(opts: &FatTreeOpts) -> Result<FatTreeTopology, TopoError> {
    let arity = Arity::new(opts.k)?;
    let k = arity.get();
    let half = arity.half();
    debug!(
        core = arity.core_count(),
        pods = arity.pods(),
        hosts = arity.host_count(),
        "开始构建 fat-tree"
    );

    let mut net = Network::with_capacity(arity.node_count(), arity.link_count());

    let mut core_switches = Vec::with_capacity(arity.core_count());
    for i in 0..arity.core_count() {
        let (row, col) = (i / half, i % half);
        let id = net.add_switch(
            naming::core_name(k, row, col),
            Tier::Core,
            None,
            naming::core_dpid(k, row, col),
        );
        core_switches.push(id);
    }

    let mut hosts = Vec::with_capacity(arity.host_count());
    let mut edge_switches = Vec::with_capacity(arity.edge_count());
    let mut agg_switches = Vec::with_capacity(arity.agg_count());

    for pod in 0..k {
        let aggs = (0..half)
            .map(|j| {
                let local = j + half;
                net.add_switch(
                    naming::agg_name(pod, local),
                    Tier::Aggregation,
                    Some(pod),
                    naming::agg_dpid(pod, local),
                )
            })
            .collect::<Vec<_>>();

        for j in 0..half {
            let edge = net.add_switch(
                naming::edge_name(pod, j),
                Tier::Edge,
                Some(pod),
                naming::edge_dpid(pod, j),
            );

            for m in 0..half {
                let offset = m + HOST_OFFSET_BASE;
                let host = net.add_host(
                    naming::host_name(k, pod, j, offset),
                    pod,
                    naming::host_ip(pod, j, offset),
                );
                net.connect(host, edge);
                hosts.push(host);
            }

            // pod 内 edge 与 aggregation 全连接
            for &agg in &aggs {
                net.connect(edge, agg);
            }
            edge_switches.push(edge);
        }

        // 第 j 台 aggregation 连接 core[j*half .. (j+1)*half)
        for (j, &agg) in aggs.iter().enumerate() {
            for &core in &core_switches[j * half..(j + 1) * half] {
                net.connect(agg, core);
            }
        }
        agg_switches.extend(aggs);
        debug!(pod, "pod 构建完成");
    }

    let topo = FatTreeTopology {
        k: arity,
        switch: opts.switch,
        net,
        hosts,
        edge_switches,
        agg_switches,
        core_switches,
    };
    info!(summary = %topo.summary(), "🌲 fat-tree 构建完成");
    Ok(topo)
}
