//! 仿真器适配层
//!
//! 拓扑生成本身是纯计算；把拓扑变成真实运行的网络（进程、namespace、
//! 控制器连接）由外部仿真器完成。这里只定义调用它的两个接口，
//! 以及一个只记录操作序列的 [`DryRunEmulator`]。

mod controller;
mod dry_run;

pub use controller::{
    ControllerConfig, ControllerTransport, DEFAULT_CONTROLLER_IP, DEFAULT_CONTROLLER_PORT, IpBase,
};
pub use dry_run::{DryRunEmulator, PlanStep, RunningNetwork};

use crate::error::EmulationError;
use crate::topo::FatTreeTopology;

/// 仿真器接口
pub trait Emulator {
    /// 运行中网络的句柄
    type Network;

    /// 实例化所有节点和链路，并把所有交换机连到 `controller`。
    ///
    /// 失败时实现方负责清理，不能留下部分接线的网络。
    fn materialize(
        &mut self,
        topo: &FatTreeTopology,
        controller: &ControllerConfig,
    ) -> Result<Self::Network, EmulationError>;

    /// 释放 `materialize` 创建的全部资源
    fn teardown(&mut self, net: Self::Network) -> Result<(), EmulationError>;
}
