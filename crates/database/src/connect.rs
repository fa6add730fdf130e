use std::time::Duration;

use eyre::{Result, WrapErr};
use mongodb::{bson::doc, options::ClientOptions, Client};
use tracing::info;

/// Bound on server selection; the driver's default keeps a CLI hanging for
/// half a minute when the deployment is unreachable.
const SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

pub async fn connect(database_url: &str) -> Result<Client> {
    let mut opt = ClientOptions::parse(database_url)
        .await
        .wrap_err("Invalid MongoDB connection string")?;
    opt.app_name = Some("watcher-setup".to_owned());
    opt.server_selection_timeout = Some(SELECTION_TIMEOUT);

    let client = Client::with_options(opt)?;

    // The driver connects lazily; ping here so an unreachable deployment
    // fails at startup instead of inside the first operation.
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .wrap_err_with(|| format!("Failed to reach MongoDB at {database_url}"))?;
    info!("Connected to MongoDB at {database_url}");

    Ok(client)
}
