//! JSON 配置文件
//!
//! 所有字段都可省略，省略的字段使用缺省值；命令行参数优先于文件。
//!
//! ```json
//! {
//!     "k": 4,
//!     "controller": { "ip": "192.168.0.10", "port": 6653 },
//!     "switch": { "protocol": "OpenFlow13", "kind": "ovs_kernel" },
//!     "ip_base": "192.168.0.0/24"
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::emu::{ControllerConfig, IpBase};
use crate::error::ConfigError;
use crate::topo::{FatTreeOpts, SwitchOpts};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub k: Option<i64>,
    #[serde(default)]
    pub controller: Option<ControllerConfig>,
    #[serde(default)]
    pub switch: Option<SwitchOpts>,
    #[serde(default)]
    pub ip_base: Option<IpBase>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_json(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), ?cfg, "loaded config");
        Ok(cfg)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    pub fn topo_opts(&self) -> FatTreeOpts {
        let defaults = FatTreeOpts::default();
        FatTreeOpts {
            k: self.k.unwrap_or(defaults.k),
            switch: self.switch.unwrap_or(defaults.switch),
        }
    }

    pub fn controller(&self) -> ControllerConfig {
        self.controller.clone().unwrap_or_default()
    }

    pub fn ip_base(&self) -> IpBase {
        self.ip_base.unwrap_or_default()
    }
}
