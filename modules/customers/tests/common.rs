#![allow(dead_code)]

use std::sync::Arc;

use customers::infra::storage::{
    migrations::Migrator, InMemoryCustomersRepository, SeaOrmCustomersRepository,
};
use customers::{Customer, CustomersRepository};
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

/// Fresh migrated SQLite database per call.
pub async fn create_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Both repository implementations, labelled for assertion messages.
pub async fn repositories() -> Vec<(&'static str, Arc<dyn CustomersRepository>)> {
    vec![
        (
            "sea_orm",
            Arc::new(SeaOrmCustomersRepository::new(create_test_db().await)),
        ),
        ("memory", Arc::new(InMemoryCustomersRepository::new())),
    ]
}

pub fn names(customers: &[Customer]) -> Vec<String> {
    let mut out: Vec<String> = customers
        .iter()
        .map(|c| format!("{} {}", c.first_name, c.last_name))
        .collect();
    out.sort();
    out
}
