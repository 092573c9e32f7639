//! Environment configuration for the CLI.
//!
//! Credentials come from the cosmos-auth loader; the database name from
//! `ORBIT_DATABASE_NAME`. Failures carry the variable name so the fix is
//! obvious from the message.

use anyhow::Context as _;
use orbit_cosmos_auth::{is_emulator, CosmosCredentials};
use orbit_cosmos_client::ClientConfig;
use orbit_cosmos_data::CosmosDatabaseClient;

/// Environment variable holding the database name.
pub const DATABASE_ENV: &str = "ORBIT_DATABASE_NAME";

/// Resolved CLI configuration.
#[derive(Debug)]
pub struct Settings {
    pub credentials: CosmosCredentials,
    pub database: String,
}

impl Settings {
    /// Load credentials and database name from the environment.
    pub fn load() -> anyhow::Result<Self> {
        let credentials = CosmosCredentials::from_env().with_context(|| {
            format!(
                "set {} with your Cosmos DB connection string",
                orbit_cosmos_auth::CONNECTION_STRING_ENV
            )
        })?;

        let database = std::env::var(DATABASE_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .with_context(|| {
                format!("set the {DATABASE_ENV} environment variable to your database name")
            })?;

        Ok(Self {
            credentials,
            database,
        })
    }

    /// Build the data-plane client.
    ///
    /// Endpoints pointing at the local emulator get relaxed TLS
    /// verification, since the emulator serves a self-signed certificate.
    pub fn data_client(&self) -> anyhow::Result<CosmosDatabaseClient> {
        let emulator = is_emulator(self.credentials.endpoint());
        tracing::debug!(
            endpoint = self.credentials.endpoint(),
            database = %self.database,
            emulator,
            "Connecting"
        );
        let config = ClientConfig::builder()
            .with_accept_invalid_certs(emulator)
            .build();

        let client = CosmosDatabaseClient::with_config(
            self.credentials.endpoint(),
            self.credentials.key(),
            &self.database,
            config,
        )?;
        Ok(client)
    }
}

/// Load settings and build the client in one step.
pub fn connect() -> anyhow::Result<CosmosDatabaseClient> {
    Settings::load()?.data_client()
}
