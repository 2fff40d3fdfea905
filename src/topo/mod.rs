//! 拓扑生成
//!
//! k-ary fat-tree 的构建、命名/编址规则以及 k 的校验。

mod arity;
pub mod fat_tree;
pub mod naming;

pub use arity::{Arity, DEFAULT_ARITY, MAX_ARITY};
pub use fat_tree::{
    FatTreeOpts, FatTreeTopology, OpenFlowVersion, Summary, SwitchKind, SwitchOpts,
    build_fat_tree, build_fat_tree_with,
};
