//! Query command: stream results, aggregate request units, render.

use clap::Args;
use serde_json::{json, Value};

use orbit_cosmos_data::QueryRequest;

use crate::output;
use crate::settings;
use crate::Context;

#[derive(Args)]
pub struct QueryCommand {
    /// Container to query
    container: String,

    /// SQL query text, e.g. "SELECT * FROM c WHERE c.category = 'a'"
    query: String,

    /// Allow the query to fan out across partitions
    #[arg(long)]
    cross_partition: bool,

    /// Scope the query to one partition key value
    #[arg(long)]
    partition_key: Option<String>,

    /// Items per page fetched from the store
    #[arg(long, default_value_t = 100)]
    page_size: i32,

    /// Maximum number of items to return
    #[arg(long, default_value_t = 100)]
    max_items: usize,
}

impl QueryCommand {
    pub async fn run(self, ctx: &Context) -> anyhow::Result<()> {
        let client = settings::connect()?;

        let mut request = QueryRequest::new(&self.container, &self.query)
            .with_cross_partition(self.cross_partition)
            .with_page_size(self.page_size)
            .with_max_items(self.max_items);
        if let Some(ref value) = self.partition_key {
            request = request.with_partition_key(value);
        }

        let mut stream = client.query_items::<Value>(request)?;
        let mut items = Vec::new();
        while let Some(item) = stream.next().await {
            items.push(item?);
        }
        let ru_cost = stream.request_charge();

        if ctx.json {
            output::render_json(&json!({
                "items": items,
                "ru_cost": ru_cost,
                "item_count": items.len()
            }));
            return Ok(());
        }

        if items.is_empty() {
            println!("No results.");
        } else {
            output::render_items_table(&items);
        }
        println!(
            "{} item(s), {:.2} RU over {} page(s)",
            items.len(),
            ru_cost,
            stream.pages_fetched()
        );
        Ok(())
    }
}
