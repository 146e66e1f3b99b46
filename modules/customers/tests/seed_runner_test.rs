//! Tests for the startup seed sequence and the lines it logs

mod common;

use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use tracing_test::traced_test;

use customers::domain::error::DomainError;
use customers::infra::storage::InMemoryCustomersRepository;
use customers::{Customer, CustomersRepository, SeedRunner};

use common::{names, repositories};

// Repository whose every call fails, to exercise error propagation
struct FailingRepository;

#[async_trait::async_trait]
impl CustomersRepository for FailingRepository {
    async fn save(&self, _customer: Customer) -> Result<Customer> {
        Err(anyhow::anyhow!("disk full"))
    }

    async fn find_all(&self) -> Result<Vec<Customer>> {
        Err(anyhow::anyhow!("disk full"))
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<Customer>> {
        Err(anyhow::anyhow!("disk full"))
    }

    async fn find_by_last_name(&self, _last_name: &str) -> Result<Vec<Customer>> {
        Err(anyhow::anyhow!("disk full"))
    }

    async fn find_by_first_name_and_last_name(
        &self,
        _first_name: &str,
        _last_name: &str,
    ) -> Result<Vec<Customer>> {
        Err(anyhow::anyhow!("disk full"))
    }

    async fn find_by_last_name_containing(&self, _fragment: &str) -> Result<Vec<Customer>> {
        Err(anyhow::anyhow!("disk full"))
    }

    async fn find_by_age_greater_than(&self, _age: i32) -> Result<Vec<Customer>> {
        Err(anyhow::anyhow!("disk full"))
    }

    async fn find_by_age_less_than(&self, _age: i32) -> Result<Vec<Customer>> {
        Err(anyhow::anyhow!("disk full"))
    }

    async fn find_by_inserted_date(&self, _date: NaiveDate) -> Result<Vec<Customer>> {
        Err(anyhow::anyhow!("disk full"))
    }

    async fn find_by_inserted_date_greater_than(&self, _date: NaiveDate) -> Result<Vec<Customer>> {
        Err(anyhow::anyhow!("disk full"))
    }

    async fn count(&self) -> Result<u64> {
        Err(anyhow::anyhow!("disk full"))
    }

    async fn delete_by_id(&self, _id: i64) -> Result<bool> {
        Err(anyhow::anyhow!("disk full"))
    }
}

#[tokio::test]
async fn run_reports_every_query_in_order() -> Result<()> {
    for (label, repo) in repositories().await {
        let report = SeedRunner::new(repo.clone()).run().await?;

        assert_eq!(report.saved.len(), 5, "{label}");
        assert_eq!(repo.count().await?, 5, "{label}");

        let titles: Vec<&str> = report.queries.iter().map(|q| q.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Customers found with find_all()",
                "Customer found with find_by_id(1)",
                "Customers found with find_by_last_name('Bauer')",
                "Customers found with find_by_first_name_and_last_name('Jack', 'Bauer')",
                "Customers found with find_by_last_name_containing('Bauer')",
                "Customers found with find_by_age_greater_than(30)",
                "Customers found with find_by_age_less_than(30)",
                "Customers found with find_by_inserted_date(01/01/2001)",
                "Customers found with find_by_inserted_date_greater_than(01/01/2001)",
            ],
            "{label}"
        );
    }
    Ok(())
}

#[tokio::test]
async fn run_query_results_match_sample_data() -> Result<()> {
    for (label, repo) in repositories().await {
        let report = SeedRunner::new(repo).run().await?;

        let all = &report.query("Customers found with find_all").unwrap().customers;
        assert_eq!(all, &report.saved, "{label}");

        let by_id = &report.query("Customer found with find_by_id").unwrap().customers;
        assert_eq!(names(by_id), vec!["Jack Bauer"], "{label}");

        let bauers = &report
            .query("Customers found with find_by_last_name(")
            .unwrap()
            .customers;
        assert_eq!(names(bauers), vec!["Jack Bauer", "Kim Bauer"], "{label}");

        let jack = &report
            .query("Customers found with find_by_first_name_and_last_name")
            .unwrap()
            .customers;
        assert_eq!(names(jack), vec!["Jack Bauer"], "{label}");

        let older = &report
            .query("Customers found with find_by_age_greater_than")
            .unwrap()
            .customers;
        assert_eq!(names(older), vec!["Chloe O'Brian", "David Palmer"], "{label}");

        let younger = &report
            .query("Customers found with find_by_age_less_than")
            .unwrap()
            .customers;
        assert_eq!(
            names(younger),
            vec!["Jack Bauer", "Kim Bauer", "Michelle Dessler"],
            "{label}"
        );

        let after = &report
            .query("Customers found with find_by_inserted_date_greater_than")
            .unwrap()
            .customers;
        assert_eq!(after.len(), 4, "{label}");
    }
    Ok(())
}

#[tokio::test]
async fn second_run_appends_new_rows() -> Result<()> {
    let repo = Arc::new(InMemoryCustomersRepository::new());

    SeedRunner::new(repo.clone()).run().await?;
    let report = SeedRunner::new(repo.clone()).run().await?;

    assert_eq!(report.saved.first().and_then(|c| c.id), Some(6));
    assert_eq!(report.query("Customers found with find_all").unwrap().customers.len(), 10);
    assert_eq!(report.queries[1].title, "Customer found with find_by_id(6)");
    assert_eq!(repo.count().await?, 10);
    Ok(())
}

#[traced_test]
#[tokio::test]
async fn run_logs_headers_and_customer_lines() {
    let repo = Arc::new(InMemoryCustomersRepository::new());

    let result = SeedRunner::new(repo).run().await;
    assert!(result.is_ok());

    assert!(logs_contain("Customers found with find_all():"));
    assert!(logs_contain("--------------------------------"));
    assert!(logs_contain(
        "Customer[id=1, firstName='Jack', lastName='Bauer', age='25', insertedDate='01/01/2001']"
    ));
    assert!(logs_contain(
        "Customer[id=2, firstName='Chloe', lastName='O'Brian', age='31', insertedDate='02/02/2002']"
    ));
    assert!(logs_contain("Customer found with find_by_id(1):"));
    assert!(!logs_contain("no customer found"));
}

#[traced_test]
#[tokio::test]
async fn run_on_failing_store_returns_database_error() {
    let result = SeedRunner::new(Arc::new(FailingRepository)).run().await;

    match result {
        Err(DomainError::Database { message }) => assert!(message.contains("disk full")),
        other => panic!("expected database error, got {other:?}"),
    }
    assert!(!logs_contain("Sample customers saved"));
}
