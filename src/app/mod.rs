// src/app/mod.rs
//
// Startup wiring: catalog sources, demo accounts and the bootstrap that
// assembles the state container.

pub mod bootstrap;
pub mod catalog_source;
pub mod seed;

pub use bootstrap::initialize_app_state;
pub use catalog_source::{catalog_id, CatalogSource, JsonCatalogSource, SeedCatalog};
pub use seed::{account_id, seed_directory, SeedAccount, SEED_ACCOUNTS};
