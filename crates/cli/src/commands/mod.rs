//! Command groups: containers, items, query.

mod containers;
mod items;
mod query;

pub use containers::ContainersCommand;
pub use items::ItemsCommand;
pub use query::QueryCommand;

use orbit_cosmos_data::Error as DataError;

/// Follow-up hints printed under an error message.
pub fn guidance(err: &anyhow::Error) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(data_err) = err.downcast_ref::<DataError>() {
        match data_err {
            DataError::ResourceNotFound(_) => {
                lines.push(
                    "Use 'orbit containers list' to see existing containers.".to_string(),
                );
            }
            DataError::ItemNotFound { .. } => {
                lines.push("Check the item id and partition key.".to_string());
            }
            DataError::Store(store) if store.is_auth_error() => {
                lines.push(format!(
                    "Check the {} environment variable.",
                    orbit_cosmos_auth::CONNECTION_STRING_ENV
                ));
            }
            _ => {}
        }
    }

    lines
}
