use anyhow::Result;
use clap::{CommandFactory, Parser};
use linode_inventory::api::{ApiClient, HttpTransport};
use linode_inventory::cli::{Cli, Mode};
use linode_inventory::config::Config;
use linode_inventory::inventory::host_json;
use linode_inventory::list_inventory;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "warn"),
    );

    run().await
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.mode() {
        Mode::List => {
            let config = Config::load(cli.config.as_deref())?
                .with_overrides(cli.api_key.as_deref(), cli.display_group.as_deref())
                .validate()?;
            let client = ApiClient::new(&config.api_key, HttpTransport::new()?)?;
            println!("{}", list_inventory(&client, &config).await?);
        }
        Mode::Host => {
            // every host variable is already served under _meta by --list
            print!("{}", host_json());
        }
        Mode::Usage => {
            eprintln!("{}", Cli::command().render_help());
        }
    }

    Ok(())
}
