use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Ansible dynamic inventory for Linode", long_about = None)]
pub struct Cli {
    /// print the Ansible formatted inventory
    #[arg(long, action, conflicts_with = "host")]
    pub list: bool,

    /// no-op since all host variables are returned by --list
    #[arg(long, value_name = "HOST", num_args = 0..=1, default_missing_value = "")]
    pub host: Option<String>,

    /// YAML config file, defaults to linode-inventory.yml next to the executable or in the
    /// working directory. The INI linode-inventory.ini is no longer read: move its [linode]
    /// keys under a `linode:` mapping
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Linode API key, overrides the config file
    #[arg(long, env = "LINODE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// only include linodes in this display group, overrides the config file
    #[arg(long, env = "LINODE_DISPLAY_GROUP")]
    pub display_group: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    List,
    Host,
    Usage,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.list {
            Mode::List
        } else if self.host.is_some() {
            Mode::Host
        } else {
            Mode::Usage
        }
    }
}
