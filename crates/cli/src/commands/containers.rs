//! Container management commands.

use clap::{Args, Subcommand};
use serde_json::json;

use crate::confirm::require_confirmation;
use crate::output;
use crate::settings;
use crate::Context;

#[derive(Args)]
pub struct ContainersCommand {
    #[command(subcommand)]
    action: ContainersAction,
}

#[derive(Subcommand)]
enum ContainersAction {
    /// List all containers in the database
    List,
    /// Create a new container
    Create {
        /// Container name (alphanumeric and hyphens, max 255 chars)
        name: String,
        /// Partition key path (must start with '/')
        #[arg(long)]
        partition_key: String,
        /// Provisioned throughput in RU/s
        #[arg(long)]
        throughput: Option<i32>,
    },
    /// Delete a container
    Delete {
        /// Container name to delete
        name: String,
    },
    /// Show a container's properties
    Show {
        /// Container name
        name: String,
    },
}

impl ContainersCommand {
    pub async fn run(self, ctx: &Context) -> anyhow::Result<()> {
        match self.action {
            ContainersAction::List => list(ctx).await,
            ContainersAction::Create {
                name,
                partition_key,
                throughput,
            } => create(ctx, &name, &partition_key, throughput).await,
            ContainersAction::Delete { name } => delete(ctx, &name).await,
            ContainersAction::Show { name } => show(ctx, &name).await,
        }
    }
}

async fn list(ctx: &Context) -> anyhow::Result<()> {
    let client = settings::connect()?;
    let containers = client.list_containers().await?;

    if ctx.json {
        let value = serde_json::to_value(&containers)?;
        output::render_json(&json!({"containers": value, "count": containers.len()}));
        return Ok(());
    }

    if containers.is_empty() {
        println!("No containers found in database '{}'", client.database());
        return Ok(());
    }

    let rows: Vec<serde_json::Value> = containers
        .iter()
        .map(|c| {
            json!({
                "name": c.id,
                "partition key": c
                    .partition_key
                    .as_ref()
                    .map(|pk| pk.paths.join(", "))
                    .unwrap_or_default(),
            })
        })
        .collect();
    output::render_items_table(&rows);
    Ok(())
}

async fn create(
    ctx: &Context,
    name: &str,
    partition_key: &str,
    throughput: Option<i32>,
) -> anyhow::Result<()> {
    let client = settings::connect()?;
    let properties = client
        .create_container(name, partition_key, throughput)
        .await?;

    if ctx.json {
        output::render_json(&json!({
            "status": "created",
            "container": serde_json::to_value(&properties)?
        }));
    } else {
        println!(
            "Created container '{name}' with partition key '{partition_key}' \
             and throughput {} RU/s",
            throughput.unwrap_or(orbit_cosmos_data::DEFAULT_THROUGHPUT)
        );
    }
    Ok(())
}

async fn delete(ctx: &Context, name: &str) -> anyhow::Result<()> {
    require_confirmation(
        &format!("Delete container '{name}' and all of its items? This cannot be undone."),
        ctx.yes,
    )?;

    let client = settings::connect()?;
    client.delete_container(name).await?;

    if ctx.json {
        output::render_json(&json!({"status": "deleted", "container": name}));
    } else {
        println!("Deleted container '{name}'");
    }
    Ok(())
}

async fn show(ctx: &Context, name: &str) -> anyhow::Result<()> {
    let client = settings::connect()?;
    let properties = client.container_properties(name).await?;
    let value = serde_json::to_value(&properties)?;

    if ctx.json {
        output::render_json(&json!({"container": value}));
    } else {
        output::render_json_pretty(&value);
    }
    Ok(())
}
