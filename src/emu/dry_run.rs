//! 只记录操作序列的仿真器，用于 `--dry-run` 和测试。

use std::fmt;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tracing::{debug, info};

use super::controller::{ControllerConfig, IpBase};
use super::Emulator;
use crate::error::EmulationError;
use crate::net::{Dpid, NodeAddr};
use crate::topo::{FatTreeTopology, OpenFlowVersion, SwitchKind};

/// 一条仿真器操作
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PlanStep {
    Init {
        ip_base: IpBase,
    },
    AddController {
        name: String,
        target: String,
    },
    AddSwitch {
        name: String,
        dpid: Dpid,
        protocol: OpenFlowVersion,
        kind: SwitchKind,
    },
    AddHost {
        name: String,
        ip: Ipv4Addr,
    },
    AddLink {
        a: String,
        a_port: u32,
        b: String,
        b_port: u32,
    },
    Build,
    StartController {
        name: String,
    },
    StartSwitch {
        name: String,
        controller: String,
    },
    Stop {
        id: u64,
    },
}

impl fmt::Display for PlanStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init { ip_base } => write!(f, "init ip_base={ip_base}"),
            Self::AddController { name, target } => write!(f, "add_controller {name} {target}"),
            Self::AddSwitch {
                name,
                dpid,
                protocol,
                kind,
            } => write!(
                f,
                "add_switch {name} dpid={dpid} protocols={protocol} kind={kind}"
            ),
            Self::AddHost { name, ip } => write!(f, "add_host {name} ip={ip}"),
            Self::AddLink {
                a,
                a_port,
                b,
                b_port,
            } => write!(f, "add_link {a}:{a_port} {b}:{b_port}"),
            Self::Build => f.write_str("build"),
            Self::StartController { name } => write!(f, "start_controller {name}"),
            Self::StartSwitch { name, controller } => {
                write!(f, "start_switch {name} controller={controller}")
            }
            Self::Stop { id } => write!(f, "stop {id}"),
        }
    }
}

/// `DryRunEmulator::materialize` 返回的句柄
#[derive(Debug, PartialEq, Eq)]
pub struct RunningNetwork {
    id: u64,
    owner: u64,
    controller: SocketAddrV4,
    switches: usize,
    hosts: usize,
    links: usize,
}

impl RunningNetwork {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn controller(&self) -> SocketAddrV4 {
        self.controller
    }

    pub fn switches(&self) -> usize {
        self.switches
    }

    pub fn hosts(&self) -> usize {
        self.hosts
    }

    pub fn links(&self) -> usize {
        self.links
    }
}

/// 每个 emulator 实例的唯一标记，句柄只能交还给签发它的实例
static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(0);

/// 同一时刻最多只有一个运行中的网络
#[derive(Debug)]
pub struct DryRunEmulator {
    instance: u64,
    ip_base: IpBase,
    plan: Vec<PlanStep>,
    next_id: u64,
    running: Option<u64>,
}

impl Default for DryRunEmulator {
    fn default() -> Self {
        Self::new(IpBase::default())
    }
}

impl DryRunEmulator {
    pub fn new(ip_base: IpBase) -> Self {
        Self {
            instance: NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed),
            ip_base,
            plan: Vec::new(),
            next_id: 0,
            running: None,
        }
    }

    /// 迄今为止成功执行的全部操作
    pub fn plan(&self) -> &[PlanStep] {
        &self.plan
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    fn stage(&self, topo: &FatTreeTopology, controller: &ControllerConfig) -> Vec<PlanStep> {
        let switch = topo.switch_opts();
        let mut steps = Vec::with_capacity(topo.nodes().len() * 2 + topo.links().len() + 4);

        steps.push(PlanStep::Init {
            ip_base: self.ip_base,
        });
        steps.push(PlanStep::AddController {
            name: controller.name.clone(),
            target: controller.target(),
        });
        for node in topo.nodes() {
            let name = node.name().to_string();
            match node.addr() {
                NodeAddr::Dpid(dpid) => steps.push(PlanStep::AddSwitch {
                    name,
                    dpid,
                    protocol: switch.protocol,
                    kind: switch.kind,
                }),
                NodeAddr::Ip(ip) => steps.push(PlanStep::AddHost { name, ip }),
            }
        }
        for link in topo.links() {
            steps.push(PlanStep::AddLink {
                a: topo.node(link.a).name().to_string(),
                a_port: link.a_port,
                b: topo.node(link.b).name().to_string(),
                b_port: link.b_port,
            });
        }
        steps.push(PlanStep::Build);
        steps.push(PlanStep::StartController {
            name: controller.name.clone(),
        });
        for node in topo.switches() {
            steps.push(PlanStep::StartSwitch {
                name: node.name().to_string(),
                controller: controller.name.clone(),
            });
        }
        steps
    }
}

impl Emulator for DryRunEmulator {
    type Network = RunningNetwork;

    #[tracing::instrument(skip_all, fields(k = %topo.k(), controller = %controller.socket_addr()))]
    fn materialize(
        &mut self,
        topo: &FatTreeTopology,
        controller: &ControllerConfig,
    ) -> Result<RunningNetwork, EmulationError> {
        if let Some(id) = self.running {
            return Err(EmulationError::AlreadyRunning { id });
        }
        controller.validate()?;

        // 先整体生成再提交，出错时不会留下半截记录
        let steps = self.stage(topo, controller);
        debug!(steps = steps.len(), "plan staged");
        self.plan.extend(steps);

        let id = self.next_id;
        self.next_id += 1;
        self.running = Some(id);

        let summary = topo.summary();
        let net = RunningNetwork {
            id,
            owner: self.instance,
            controller: controller.socket_addr(),
            switches: summary.core + summary.aggregation + summary.edge,
            hosts: summary.hosts,
            links: summary.links,
        };
        info!(id, switches = net.switches, hosts = net.hosts, "▶️  网络已启动");
        Ok(net)
    }

    #[tracing::instrument(skip_all, fields(id = net.id))]
    fn teardown(&mut self, net: RunningNetwork) -> Result<(), EmulationError> {
        if net.owner != self.instance || self.running != Some(net.id) {
            return Err(EmulationError::NotRunning { id: net.id });
        }
        self.plan.push(PlanStep::Stop { id: net.id });
        self.running = None;
        info!("⏹️  网络已停止");
        Ok(())
    }
}
