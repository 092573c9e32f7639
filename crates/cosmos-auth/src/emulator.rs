//! Emulator detection helpers.
//!
//! The local emulator serves a self-signed certificate; callers use
//! [`is_emulator`] to decide whether to relax TLS verification.

/// Default endpoint of the local Cosmos DB emulator.
pub const EMULATOR_ENDPOINT: &str = "https://localhost:8081/";

/// The emulator's fixed, publicly documented master key.
pub const EMULATOR_KEY: &str =
    "C2y6yDjf5/R+ob0N8A7Cgv30VRDJIWEHLM+4QDU5DE2nQ9nDuVTqobD4b8mGGyPMbIZnqyMsEcaGQy67XIw/Jw==";

const EMULATOR_HOST_MARKERS: &[&str] = &["localhost", "127.0.0.1"];

/// Returns true if the endpoint points at a local emulator.
pub fn is_emulator(endpoint: &str) -> bool {
    let lowered = endpoint.to_lowercase();
    EMULATOR_HOST_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}
