use serde::{Deserialize, Serialize};

/// Port used when no ssh service is registered for a host in NetBox.
pub const DEFAULT_SSH_PORT: u16 = 22;

/// One manageable endpoint, ready to be rendered into the SSH config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRecord {
    /// First label of the dotted inventory name.
    pub name: String,
    /// Primary address with any CIDR suffix stripped.
    pub ip: String,
    pub ssh_port: u16,
}

impl HostRecord {
    pub fn new(name: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ip: ip.into(),
            ssh_port: DEFAULT_SSH_PORT,
        }
    }
}
