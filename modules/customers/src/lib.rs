// === PUBLIC CONTRACT ===
pub mod contract;
pub use contract::model::Customer;

// === MODULE WIRING ===
pub mod config;
pub mod domain;
pub mod infra;

pub use config::{CustomersConfig, StorageBackend};
pub use domain::repo::CustomersRepository;
pub use domain::seed::{SeedReport, SeedRunner};
