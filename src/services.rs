use anyhow::{Context, Result};
use tracing::info;

use crate::models::{HostRecord, DEFAULT_SSH_PORT};
use crate::netbox::{NetboxClient, ServiceRecord};

/// Resolve the SSH port for each host from the NetBox service catalog.
/// Hosts without a registered ssh/sshd service keep the default port.
pub async fn resolve_ports(
    client: &NetboxClient,
    mut hosts: Vec<HostRecord>,
) -> Result<Vec<HostRecord>> {
    let services = client.services().await.context("Service query failed")?;
    info!("Query for services returned {} records", services.len());

    let ssh_services: Vec<ServiceRecord> = services
        .into_iter()
        .filter(|s| s.name == "ssh" || s.name == "sshd")
        .collect();

    for host in &mut hosts {
        host.ssh_port = ssh_port_for(&host.name, &ssh_services);
    }

    info!("Resolved SSH ports for {} hosts", hosts.len());
    Ok(hosts)
}

/// First port of the first service owned by a device or VM named `host_name`.
/// The default is assigned only after the whole list has been scanned
/// without a match, so a later entry can never clobber an earlier hit.
fn ssh_port_for(host_name: &str, services: &[ServiceRecord]) -> u16 {
    for service in services {
        let owner_matches = service
            .device
            .as_ref()
            .map(|d| d.name == host_name)
            .unwrap_or(false)
            || service
                .virtual_machine
                .as_ref()
                .map(|vm| vm.name == host_name)
                .unwrap_or(false);

        if owner_matches {
            if let Some(port) = service.ports.first() {
                return *port;
            }
        }
    }
    DEFAULT_SSH_PORT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netbox::ServiceOwner;

    fn device_service(owner: &str, ports: &[u16]) -> ServiceRecord {
        ServiceRecord {
            name: "ssh".to_string(),
            ports: ports.to_vec(),
            device: Some(ServiceOwner {
                name: owner.to_string(),
            }),
            virtual_machine: None,
        }
    }

    fn vm_service(owner: &str, ports: &[u16]) -> ServiceRecord {
        ServiceRecord {
            name: "sshd".to_string(),
            ports: ports.to_vec(),
            device: None,
            virtual_machine: Some(ServiceOwner {
                name: owner.to_string(),
            }),
        }
    }

    #[test]
    fn first_port_of_first_match_wins() {
        let services = vec![device_service("x1", &[2222, 22])];
        assert_eq!(ssh_port_for("x1", &services), 2222);
    }

    #[test]
    fn default_when_no_service_matches() {
        let services = vec![device_service("other", &[2222])];
        assert_eq!(ssh_port_for("x1", &services), 22);
    }

    #[test]
    fn default_on_empty_catalog() {
        assert_eq!(ssh_port_for("x1", &[]), 22);
    }

    #[test]
    fn later_entries_never_clobber_an_earlier_match() {
        // The match sits in the middle of the list; scanning must stop
        // there instead of falling through to the default.
        let services = vec![
            device_service("a", &[2020]),
            device_service("x1", &[2222]),
            device_service("z", &[2200]),
            vm_service("zz", &[2201]),
        ];
        assert_eq!(ssh_port_for("x1", &services), 2222);
    }

    #[test]
    fn vm_owned_services_match_too() {
        let services = vec![vm_service("vm1", &[2022])];
        assert_eq!(ssh_port_for("vm1", &services), 2022);
    }

    #[test]
    fn service_with_no_ports_is_skipped() {
        let services = vec![device_service("x1", &[]), device_service("x1", &[2222])];
        assert_eq!(ssh_port_for("x1", &services), 2222);
    }
}
