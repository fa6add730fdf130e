use bootstrap::ops::{current_state, initialize, reset, verify};
use clap::{Args, Parser, Subcommand};
use common::config::{AppConfig, LoadFromEnv, TargetConfig};
use common::target::WatchTarget;
use database::client::DbClient;
use eyre::Result;
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "watcher-setup",
    about = "Provision and audit the chain watcher's MongoDB instance"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the bootstrap collections and seed the watch target
    Init(TargetArgs),
    /// Check that the store holds exactly the expected watch target
    Verify(TargetArgs),
    /// Print the current bootstrap state as JSON
    Show,
    /// Drop the bootstrap collections
    Reset {
        /// Confirm dropping the collections
        #[arg(long)]
        yes: bool,
    },
}

/// Overrides applied on top of the configured watch target.
#[derive(Args)]
struct TargetArgs {
    /// Node endpoint to watch (ws, wss, http or https URL)
    #[arg(long)]
    endpoint: Option<String>,

    /// Contract address, 0x-prefixed
    #[arg(long)]
    contract: Option<String>,

    /// Event signature hash, 64 hex digits
    #[arg(long)]
    event: Option<String>,
}

impl TargetArgs {
    fn resolve(self, cfg: &AppConfig) -> Result<WatchTarget> {
        let mut target: TargetConfig = cfg.target.clone();
        if let Some(endpoint) = self.endpoint {
            target.chain_endpoint = endpoint;
        }
        if let Some(contract) = self.contract {
            target.contract_address = contract;
        }
        if let Some(event) = self.event {
            target.event_type = event;
        }
        Ok(target.to_watch_target()?)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    // Refuse a destructive run before touching the deployment.
    if let Command::Reset { yes: false } = cli.command {
        eyre::bail!("Refusing to drop collections without --yes");
    }

    let cfg = AppConfig::load()?;
    let client = database::connect::connect(&cfg.database.url).await?;
    let store = DbClient::new(&client, &cfg.database.name);
    info!("Using database {}", store.database_name());

    match cli.command {
        Command::Init(args) => {
            let target = args.resolve(&cfg)?;
            let outcome = initialize(&store, &target).await?;
            if outcome.already_provisioned() {
                info!("Store was already provisioned; nothing changed");
            }
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Command::Verify(args) => {
            let expected = args.resolve(&cfg)?;
            let report = verify(&store, &expected).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.satisfied() {
                eyre::bail!("Store does not hold exactly the expected watch target");
            }
            info!("Store holds exactly the expected watch target");
        }
        Command::Show => {
            let state = current_state(&store).await?;
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
        Command::Reset { .. } => {
            warn!("Dropping bootstrap collections from {}", store.database_name());
            let dropped = reset(&store).await?;
            if dropped.is_empty() {
                info!("Nothing to drop");
            } else {
                info!("Dropped: {}", dropped.join(", "));
            }
        }
    }

    Ok(())
}
