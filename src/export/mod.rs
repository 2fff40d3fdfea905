//! 拓扑导出（JSON）
//!
//! 供外部仿真器或测试工具读取，格式稳定：节点按 id 排列，链路按创建顺序排列。

mod types;

pub use types::{LinkDoc, NodeDoc, TopologyDoc};
