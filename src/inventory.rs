use crate::linode::{group_by_display_group, Linode};
use indexmap::IndexMap;
use serde::Serialize;

/// Per-host variables exposed to Ansible under `_meta.hostvars`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct HostVars {
    pub ansible_ssh_host: String,
    pub host_label: String,
    pub host_display_group: String,
    pub host_private_ip: String,
    pub host_public_ip: String,
}

impl From<&Linode> for HostVars {
    fn from(linode: &Linode) -> Self {
        HostVars {
            ansible_ssh_host: linode.public_ip().to_string(),
            host_label: linode.label.clone(),
            host_display_group: linode.display_group.clone(),
            host_private_ip: linode.private_ip().to_string(),
            host_public_ip: linode.public_ip().to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct Meta {
    pub hostvars: IndexMap<String, HostVars>,
}

/// Ansible dynamic inventory document.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct Inventory {
    #[serde(rename = "_meta")]
    pub meta: Meta,
    pub hosts: Vec<String>,
}

impl Inventory {
    /// Builds the inventory with hosts ordered by display group, then label.
    pub fn new(linodes: Vec<Linode>) -> Self {
        let mut inventory = Inventory::default();

        for linode in group_by_display_group(linodes).values().flatten() {
            inventory.hosts.push(linode.label.clone());
            inventory
                .meta
                .hostvars
                .insert(linode.label.clone(), HostVars::from(linode));
        }

        inventory
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// The `--host` response: every variable is already in `_meta`.
pub fn host_json() -> &'static str {
    "{}"
}
