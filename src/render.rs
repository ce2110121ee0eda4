use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::models::HostRecord;

const HEADER: &str = "# This file is managed by nbssh. Do not edit.\n";

/// Write the SSH config for `hosts`, fully replacing whatever is at `path`.
pub fn render(hosts: &[HostRecord], path: &Path, username: &str) -> Result<()> {
    let content = render_to_string(hosts, username);
    fs::write(path, content)
        .with_context(|| format!("Failed to write SSH config to {}", path.display()))?;
    info!("SSH config written to {}", path.display());
    Ok(())
}

fn render_to_string(hosts: &[HostRecord], username: &str) -> String {
    let mut out = String::from(HEADER);
    for host in hosts {
        // The leading newline keeps blocks blank-line separated.
        out.push_str(&format!(
            "\nhost {}\n    hostname {}\n    user {}\n    port {}\n",
            host.name, host.ip, username, host.ssh_port
        ));
    }
    out
}
