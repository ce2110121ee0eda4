use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::models::HostRecord;
use crate::netbox::{DeviceRecord, NetboxClient};

/// Query devices and virtual machines matching `tag` and `statuses` and
/// turn them into host records. Any query failure aborts the run.
pub async fn collect_hosts(
    client: &NetboxClient,
    tag: &str,
    statuses: &[String],
) -> Result<Vec<HostRecord>> {
    let devices = client
        .devices(tag, statuses)
        .await
        .context("Device query failed")?;
    info!("Query for devices returned {} records", devices.len());

    let vms = client
        .virtual_machines(tag, statuses)
        .await
        .context("Virtual machine query failed")?;
    info!("Query for virtual machines returned {} records", vms.len());

    let mut hosts = Vec::new();
    for record in devices.into_iter().chain(vms) {
        if let Some(host) = host_from_record(record, statuses) {
            hosts.push(host);
        }
    }

    info!(
        "Collected {} devices and virtual machines from NetBox",
        hosts.len()
    );
    Ok(hosts)
}

/// Validate one inventory record, logging and dropping anything unusable.
fn host_from_record(record: DeviceRecord, statuses: &[String]) -> Option<HostRecord> {
    let name = match record.name {
        Some(name) if !name.is_empty() => name,
        _ => {
            warn!("Record without a name. Pass");
            return None;
        }
    };

    let primary_ip = match record.primary_ip {
        Some(ip) => ip,
        None => {
            warn!("Host [{}] has no IP address. Pass", name);
            return None;
        }
    };

    // The query already filtered by status; re-check in case the API
    // returned something outside the requested set.
    match record.status {
        Some(status) if statuses.contains(&status.value) => {}
        _ => {
            warn!("Host [{}] doesn't have a desired status. Pass", name);
            return None;
        }
    }

    Some(HostRecord::new(
        short_name(&name),
        strip_prefix_len(&primary_ip.address),
    ))
}

/// First label of a dotted fully-qualified name.
fn short_name(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}

/// Address without its CIDR prefix length.
fn strip_prefix_len(address: &str) -> &str {
    address.split('/').next().unwrap_or(address)
}
