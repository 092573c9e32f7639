//! Item management commands.
//!
//! Item payloads come from a JSON file or stdin (`--data -`), matching the
//! usual piping workflow: `cat item.json | orbit items create orders --data -`.

use std::io::Read;
use std::path::Path;

use clap::{Args, Subcommand};
use serde_json::{json, Value};

use crate::confirm::require_confirmation;
use crate::output;
use crate::settings;
use crate::Context;

#[derive(Args)]
pub struct ItemsCommand {
    #[command(subcommand)]
    action: ItemsAction,
}

#[derive(Subcommand)]
enum ItemsAction {
    /// Create a new item from a JSON file
    Create {
        /// Container name where the item will be created
        container: String,
        /// Path to a JSON file with the item data, or '-' for stdin
        #[arg(long)]
        data: String,
        /// Partition key value
        #[arg(long)]
        partition_key: String,
    },
    /// Retrieve a single item by id and partition key
    Get {
        /// Container name
        container: String,
        /// Item id to retrieve
        item_id: String,
        /// Partition key value
        #[arg(long)]
        partition_key: String,
    },
    /// Update an existing item (upsert) from a JSON file
    Update {
        /// Container name
        container: String,
        /// Item id to update
        item_id: String,
        /// Path to a JSON file with the updated item data, or '-' for stdin
        #[arg(long)]
        data: String,
        /// Partition key value
        #[arg(long)]
        partition_key: String,
    },
    /// Delete an item
    Delete {
        /// Container name
        container: String,
        /// Item id to delete
        item_id: String,
        /// Partition key value
        #[arg(long)]
        partition_key: String,
    },
    /// List items in a container
    List {
        /// Container name
        container: String,
        /// Maximum number of items to retrieve
        #[arg(long, default_value_t = 100)]
        max_count: usize,
    },
}

impl ItemsCommand {
    pub async fn run(self, ctx: &Context) -> anyhow::Result<()> {
        match self.action {
            ItemsAction::Create {
                container,
                data,
                partition_key,
            } => create(ctx, &container, &data, &partition_key).await,
            ItemsAction::Get {
                container,
                item_id,
                partition_key,
            } => get(ctx, &container, &item_id, &partition_key).await,
            ItemsAction::Update {
                container,
                item_id,
                data,
                partition_key,
            } => update(ctx, &container, &item_id, &data, &partition_key).await,
            ItemsAction::Delete {
                container,
                item_id,
                partition_key,
            } => delete(ctx, &container, &item_id, &partition_key).await,
            ItemsAction::List {
                container,
                max_count,
            } => list(ctx, &container, max_count).await,
        }
    }
}

/// Read and parse a JSON object from a file path or stdin (`-`).
fn read_json_input(source: &str) -> anyhow::Result<Value> {
    let content = if source == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(Path::new(source))
            .map_err(|_| anyhow::anyhow!("File not found: {source}"))?
    };

    let value: Value = serde_json::from_str(&content)
        .map_err(|_| anyhow::anyhow!("Invalid JSON in input: {source}"))?;

    if !value.is_object() {
        anyhow::bail!("JSON must be a single object, not an array");
    }
    Ok(value)
}

async fn create(
    ctx: &Context,
    container: &str,
    data: &str,
    partition_key: &str,
) -> anyhow::Result<()> {
    let item = read_json_input(data)?;
    let client = settings::connect()?;
    let created = client.create_item(container, &item, partition_key).await?;

    if ctx.json {
        output::render_json(&json!({"status": "created", "item": created}));
    } else {
        println!(
            "Created item '{}' in container '{container}'",
            created["id"].as_str().unwrap_or("?")
        );
        output::render_json_pretty(&created);
    }
    Ok(())
}

async fn get(
    ctx: &Context,
    container: &str,
    item_id: &str,
    partition_key: &str,
) -> anyhow::Result<()> {
    let client = settings::connect()?;
    let item = client.read_item(container, item_id, partition_key).await?;

    if ctx.json {
        output::render_json(&json!({"item": item}));
    } else {
        output::render_json_pretty(&item);
    }
    Ok(())
}

async fn update(
    ctx: &Context,
    container: &str,
    item_id: &str,
    data: &str,
    partition_key: &str,
) -> anyhow::Result<()> {
    let item = read_json_input(data)?;
    let client = settings::connect()?;
    let updated = client
        .upsert_item(container, item_id, &item, partition_key)
        .await?;

    if ctx.json {
        output::render_json(&json!({"status": "updated", "item": updated}));
    } else {
        println!("Updated item '{item_id}' in container '{container}'");
        output::render_json_pretty(&updated);
    }
    Ok(())
}

async fn delete(
    ctx: &Context,
    container: &str,
    item_id: &str,
    partition_key: &str,
) -> anyhow::Result<()> {
    require_confirmation(
        &format!("Delete item '{item_id}' from container '{container}'? This cannot be undone."),
        ctx.yes,
    )?;

    let client = settings::connect()?;
    client.delete_item(container, item_id, partition_key).await?;

    if ctx.json {
        output::render_json(&json!({
            "status": "deleted",
            "item_id": item_id,
            "container": container
        }));
    } else {
        println!("Deleted item '{item_id}' from container '{container}'");
    }
    Ok(())
}

async fn list(ctx: &Context, container: &str, max_count: usize) -> anyhow::Result<()> {
    let client = settings::connect()?;
    let items = client.list_items(container, max_count).await?;

    if ctx.json {
        output::render_json(&json!({"items": items, "count": items.len()}));
        return Ok(());
    }

    if items.is_empty() {
        println!("No items found in container '{container}'");
        return Ok(());
    }
    output::render_items_table(&items);
    Ok(())
}
