//! Remote controller and management-network settings handed to the emulator.

use std::fmt;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EmulationError, TopoError};

/// OpenFlow 1.3 的 IANA 端口
pub const DEFAULT_CONTROLLER_PORT: u16 = 6653;
pub const DEFAULT_CONTROLLER_IP: Ipv4Addr = Ipv4Addr::new(192, 168, 0, 10);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerTransport {
    #[default]
    Tcp,
    Ssl,
}

impl fmt::Display for ControllerTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tcp => f.write_str("tcp"),
            Self::Ssl => f.write_str("ssl"),
        }
    }
}

/// 远端控制器，所有交换机都连到它
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControllerConfig {
    pub name: String,
    pub ip: Ipv4Addr,
    pub port: u16,
    pub transport: ControllerTransport,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            name: "c0".to_string(),
            ip: DEFAULT_CONTROLLER_IP,
            port: DEFAULT_CONTROLLER_PORT,
            transport: ControllerTransport::Tcp,
        }
    }
}

impl ControllerConfig {
    pub fn socket_addr(&self) -> SocketAddrV4 {
        SocketAddrV4::new(self.ip, self.port)
    }

    /// 交换机侧的控制器地址串，如 `tcp:192.168.0.10:6653`
    pub fn target(&self) -> String {
        format!("{}:{}:{}", self.transport, self.ip, self.port)
    }

    pub fn validate(&self) -> Result<(), EmulationError> {
        let reason = if self.port == 0 {
            "port 0"
        } else if self.ip.is_unspecified() {
            "unspecified address"
        } else if self.ip.is_broadcast() || self.ip.is_multicast() {
            "not a unicast address"
        } else {
            return Ok(());
        };
        Err(EmulationError::InvalidController {
            name: self.name.clone(),
            addr: self.socket_addr(),
            reason,
        })
    }
}

/// 仿真器管理网段，形如 `192.168.0.0/24`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IpBase {
    pub addr: Ipv4Addr,
    pub prefix_len: u8,
}

impl Default for IpBase {
    fn default() -> Self {
        Self {
            addr: Ipv4Addr::new(192, 168, 0, 0),
            prefix_len: 24,
        }
    }
}

impl fmt::Display for IpBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix_len)
    }
}

impl FromStr for IpBase {
    type Err = TopoError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || TopoError::InvalidIpBase(raw.to_string());
        let (addr, prefix) = raw.split_once('/').ok_or_else(invalid)?;
        let addr = addr.trim().parse::<Ipv4Addr>().map_err(|_| invalid())?;
        let prefix_len = prefix.trim().parse::<u8>().map_err(|_| invalid())?;
        if prefix_len > 32 {
            return Err(invalid());
        }
        Ok(Self { addr, prefix_len })
    }
}

impl TryFrom<String> for IpBase {
    type Error = TopoError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<IpBase> for String {
    fn from(base: IpBase) -> Self {
        base.to_string()
    }
}
