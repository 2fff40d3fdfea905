//! Error types shared by the topology builder, the emulation adapters and the
//! config loader.

use std::fmt;
use std::io;
use std::net::SocketAddrV4;
use std::path::PathBuf;

use thiserror::Error;

use crate::topo::MAX_ARITY;

/// Why a `k` was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArityViolation {
    NotPositive,
    Odd,
    TooLarge,
}

impl fmt::Display for ArityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPositive => f.write_str("k must be positive"),
            Self::Odd => f.write_str("k must be even"),
            Self::TooLarge => write!(f, "k must not exceed {MAX_ARITY}"),
        }
    }
}

/// 拓扑生成错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopoError {
    /// `k` is not an even integer in `2..=MAX_ARITY`. Raised before any node is created.
    #[error("invalid fat-tree arity k={k}: {reason}")]
    InvalidArity { k: i64, reason: ArityViolation },

    #[error("invalid fat-tree arity {0:?}: not an integer")]
    ParseArity(String),

    #[error("invalid datapath id {0:?}: expected 16 decimal digits")]
    InvalidDpid(String),

    #[error("invalid ip base {0:?}: expected <ipv4>/<prefix>")]
    InvalidIpBase(String),
}

/// 仿真器适配层错误
#[derive(Debug, Error)]
pub enum EmulationError {
    #[error("controller {name} at {addr} is not usable: {reason}")]
    InvalidController {
        name: String,
        addr: SocketAddrV4,
        reason: &'static str,
    },

    #[error("a network is already running (id={id}); tear it down first")]
    AlreadyRunning { id: u64 },

    #[error("network id={id} is not running")]
    NotRunning { id: u64 },
}

/// 配置文件加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
