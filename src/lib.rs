pub mod api;
pub mod cli;
pub mod config;
pub mod constants;
pub mod inventory;
pub mod linode;

use crate::api::{ApiClient, Transport};
use crate::config::Config;
use crate::inventory::Inventory;
use crate::linode::fetch_linodes_with_ips;
use anyhow::Result;

/// Fetches linodes visible to `config` and renders the `--list` document.
pub async fn list_inventory<T: Transport>(
    client: &ApiClient<T>,
    config: &Config,
) -> Result<String> {
    let linodes = fetch_linodes_with_ips(client, |linode| {
        config.filter_display_group(&linode.display_group)
    })
    .await?;

    let inventory = Inventory::new(linodes);
    Ok(inventory.to_json()?)
}
