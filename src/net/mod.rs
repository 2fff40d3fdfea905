//! 网络拓扑图模块
//!
//! 此模块包含拓扑图的基本组件：标识符、节点、链路和网络。

// 子模块声明
mod dpid;
mod id;
mod link;
mod network;
mod node;

// 重新导出公共接口
pub use dpid::Dpid;
pub use id::{LinkId, NodeId};
pub use link::Link;
pub use network::Network;
pub use node::{Node, NodeAddr, Tier};
