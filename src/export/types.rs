use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use crate::emu::ControllerConfig;
use crate::net::{Dpid, Tier};
use crate::topo::{FatTreeTopology, Summary, SwitchOpts};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDoc {
    pub id: usize,
    pub name: String,
    pub tier: Tier,
    /// core 交换机为 None
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dpid: Option<Dpid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<Ipv4Addr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDoc {
    pub a: String,
    pub a_port: u32,
    pub b: String,
    pub b_port: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologyDoc {
    pub summary: Summary,
    pub switch: SwitchOpts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<ControllerConfig>,
    pub nodes: Vec<NodeDoc>,
    pub links: Vec<LinkDoc>,
}

impl TopologyDoc {
    pub fn new(topo: &FatTreeTopology, controller: Option<&ControllerConfig>) -> Self {
        let nodes = topo
            .nodes()
            .iter()
            .map(|n| NodeDoc {
                id: n.id().0,
                name: n.name().to_string(),
                tier: n.tier(),
                pod: n.pod(),
                dpid: n.dpid(),
                ip: n.ip(),
            })
            .collect::<Vec<_>>();
        let links = topo
            .links()
            .iter()
            .map(|l| LinkDoc {
                a: topo.node(l.a).name().to_string(),
                a_port: l.a_port,
                b: topo.node(l.b).name().to_string(),
                b_port: l.b_port,
            })
            .collect::<Vec<_>>();
        Self {
            summary: topo.summary(),
            switch: topo.switch_opts(),
            controller: controller.cloned(),
            nodes,
            links,
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
