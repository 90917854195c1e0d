use crate::api::{ApiClient, ApiError, Transport};
use crate::constants::{LINODE_IP_LIST_ACTION, LINODE_LIST_ACTION};
use indexmap::IndexMap;
use log::{info, warn};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Linode {
    #[serde(rename = "LINODEID")]
    pub id: i64,
    #[serde(rename = "STATUS", default)]
    pub status: i64,
    #[serde(rename = "LABEL")]
    pub label: String,
    #[serde(rename = "LPM_DISPLAYGROUP", default)]
    pub display_group: String,
    #[serde(rename = "TOTALRAM", default)]
    pub ram: i64,
    #[serde(skip)]
    pub ips: Vec<LinodeIp>,
}

impl Linode {
    pub fn is_running(&self) -> bool {
        self.status == 1
    }

    /// First public address, or an empty string when the linode has none.
    pub fn public_ip(&self) -> &str {
        self.ips
            .iter()
            .find(|ip| ip.is_public())
            .map_or("", |ip| ip.ip.as_str())
    }

    /// First private address, or an empty string when the linode has none.
    pub fn private_ip(&self) -> &str {
        self.ips
            .iter()
            .find(|ip| !ip.is_public())
            .map_or("", |ip| ip.ip.as_str())
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct LinodeIp {
    #[serde(rename = "LINODEID")]
    pub linode_id: i64,
    #[serde(rename = "IPADDRESS")]
    pub ip: String,
    #[serde(rename = "ISPUBLIC", default)]
    pub public: i64,
}

impl LinodeIp {
    pub fn is_public(&self) -> bool {
        self.public == 1
    }
}

/// IP records keyed by owning linode id, in order of discovery.
pub type LinodeIps = IndexMap<i64, Vec<LinodeIp>>;

pub fn unmarshal_linode_list(datas: Vec<Value>) -> Result<Vec<Linode>, ApiError> {
    if datas.len() != 1 {
        return Err(ApiError::UnexpectedResults {
            expected: 1,
            actual: datas.len(),
        });
    }

    let data = datas.into_iter().next().unwrap_or(Value::Null);
    serde_json::from_value(data)
        .map_err(|e| ApiError::Decode(format!("invalid {LINODE_LIST_ACTION} payload: {e}")))
}

pub fn unmarshal_linode_ips(datas: Vec<Value>) -> Result<LinodeIps, ApiError> {
    let mut linode_ips = LinodeIps::new();

    for data in datas {
        let ip_list: Vec<LinodeIp> = serde_json::from_value(data).map_err(|e| {
            ApiError::Decode(format!("invalid {LINODE_IP_LIST_ACTION} payload: {e}"))
        })?;
        for ip in ip_list {
            linode_ips.entry(ip.linode_id).or_default().push(ip);
        }
    }

    Ok(linode_ips)
}

/// Joins IP records onto their linodes. Public addresses sort ahead of private
/// ones; records owned by an unknown linode are dropped.
pub fn attach_ips(linodes: Vec<Linode>, mut linode_ips: LinodeIps) -> Vec<Linode> {
    let linodes: Vec<Linode> = linodes
        .into_iter()
        .map(|mut linode| {
            let mut ips = linode_ips.shift_remove(&linode.id).unwrap_or_default();
            ips.sort_by_key(|ip| !ip.is_public());
            linode.ips = ips;
            linode
        })
        .collect();

    for (linode_id, ips) in &linode_ips {
        warn!(
            "dropping {} ip record(s) for unknown linode {}",
            ips.len(),
            linode_id
        );
    }

    linodes
}

/// Groups linodes by display group; each group is sorted by label.
pub fn group_by_display_group(linodes: Vec<Linode>) -> BTreeMap<String, Vec<Linode>> {
    let mut groups: BTreeMap<String, Vec<Linode>> = BTreeMap::new();
    for linode in linodes {
        groups
            .entry(linode.display_group.clone())
            .or_default()
            .push(linode);
    }
    for group in groups.values_mut() {
        group.sort_by(|a, b| a.label.cmp(&b.label));
    }
    groups
}

pub async fn fetch_linode_list<T: Transport>(
    client: &ApiClient<T>,
) -> Result<Vec<Linode>, ApiError> {
    let mut request = client.request();
    request.add_action(LINODE_LIST_ACTION);

    let datas = client.get_json(&request).await?.into_datas()?;
    unmarshal_linode_list(datas)
}

/// Lists IPs for every given linode id, batching one action per linode.
pub async fn fetch_linode_ips<T: Transport>(
    client: &ApiClient<T>,
    linode_ids: &[i64],
) -> Result<LinodeIps, ApiError> {
    let mut request = client.request();
    for linode_id in linode_ids {
        request
            .add_action(LINODE_IP_LIST_ACTION)
            .set("LinodeID", &linode_id.to_string());
    }

    let datas = client.get_json(&request).await?.into_datas()?;
    unmarshal_linode_ips(datas)
}

/// Fetches linodes, keeps those accepted by `filter`, then fetches and joins their IPs.
pub async fn fetch_linodes_with_ips<T, F>(
    client: &ApiClient<T>,
    filter: F,
) -> Result<Vec<Linode>, ApiError>
where
    T: Transport,
    F: Fn(&Linode) -> bool,
{
    let all = fetch_linode_list(client).await?;
    let total = all.len();
    let linodes: Vec<Linode> = all.into_iter().filter(|linode| filter(linode)).collect();
    info!("fetched {} linode(s), {} selected", total, linodes.len());

    if linodes.is_empty() {
        return Ok(linodes);
    }

    let ids: Vec<i64> = linodes.iter().map(|linode| linode.id).collect();
    let linode_ips = fetch_linode_ips(client, &ids).await?;

    Ok(attach_ips(linodes, linode_ips))
}
