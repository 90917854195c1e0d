pub const API_URL: &str = "https://api.linode.com/";

/// Upper bound on actions per batch request, enforced by the provider.
pub const MAX_BATCH_REQUESTS: usize = 25;

pub const BATCH_ACTION: &str = "batch";
pub const ACTION_PARAM: &str = "api_action";
pub const API_KEY_PARAM: &str = "api_key";
pub const REQUEST_ARRAY_PARAM: &str = "api_requestArray";

pub const LINODE_LIST_ACTION: &str = "linode.list";
pub const LINODE_IP_LIST_ACTION: &str = "linode.ip.list";

pub const CONFIG_NAME: &str = "linode-inventory.yml";
/// INI config read by earlier releases; it is no longer parsed.
pub const LEGACY_CONFIG_NAME: &str = "linode-inventory.ini";
