use std::sync::Arc;

use tracing::{info, instrument};

use crate::contract::model::Customer;
use crate::domain::date;
use crate::domain::error::DomainError;
use crate::domain::repo::CustomersRepository;

const REFERENCE_DATE: &str = "01/01/2001";

/// One executed query and what it returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryReport {
    pub title: String,
    pub customers: Vec<Customer>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub saved: Vec<Customer>,
    pub queries: Vec<QueryReport>,
}

impl SeedReport {
    /// Results of the query whose title starts with `prefix`.
    pub fn query(&self, prefix: &str) -> Option<&QueryReport> {
        self.queries.iter().find(|q| q.title.starts_with(prefix))
    }
}

/// The five sample customers written on startup.
pub fn sample_customers() -> Vec<Customer> {
    vec![
        Customer::with_details("Jack", "Bauer", 25, "01/01/2001"),
        Customer::with_details("Chloe", "O'Brian", 31, "02/02/2002"),
        Customer::with_details("Kim", "Bauer", 21, "03/03/2003"),
        Customer::with_details("David", "Palmer", 45, "04/04/2004"),
        Customer::with_details("Michelle", "Dessler", 18, "05/05/2005"),
    ]
}

/// Populates a store with the sample customers and logs the result of every
/// query the repository offers.
pub struct SeedRunner {
    repo: Arc<dyn CustomersRepository>,
}

impl SeedRunner {
    pub fn new(repo: Arc<dyn CustomersRepository>) -> Self {
        Self { repo }
    }

    #[instrument(name = "customers.seed.run", skip(self))]
    pub async fn run(&self) -> Result<SeedReport, DomainError> {
        let mut report = SeedReport::default();

        for customer in sample_customers() {
            let saved = self.repo.save(customer).await.map_err(db_error)?;
            report.saved.push(saved);
        }
        info!(count = report.saved.len(), "Sample customers saved");

        let repo = &self.repo;
        let reference = date::parse(REFERENCE_DATE);
        let first_id = report.saved.first().and_then(|c| c.id).unwrap_or(1);

        let all = repo.find_all().await.map_err(db_error)?;
        emit(&mut report, "Customers found with find_all()", all);

        let by_id = repo.find_by_id(first_id).await.map_err(db_error)?;
        emit(
            &mut report,
            &format!("Customer found with find_by_id({first_id})"),
            by_id.into_iter().collect(),
        );

        let bauers = repo.find_by_last_name("Bauer").await.map_err(db_error)?;
        emit(&mut report, "Customers found with find_by_last_name('Bauer')", bauers);

        let jack = repo
            .find_by_first_name_and_last_name("Jack", "Bauer")
            .await
            .map_err(db_error)?;
        emit(
            &mut report,
            "Customers found with find_by_first_name_and_last_name('Jack', 'Bauer')",
            jack,
        );

        let containing = repo
            .find_by_last_name_containing("Bauer")
            .await
            .map_err(db_error)?;
        emit(
            &mut report,
            "Customers found with find_by_last_name_containing('Bauer')",
            containing,
        );

        let older = repo.find_by_age_greater_than(30).await.map_err(db_error)?;
        emit(&mut report, "Customers found with find_by_age_greater_than(30)", older);

        let younger = repo.find_by_age_less_than(30).await.map_err(db_error)?;
        emit(&mut report, "Customers found with find_by_age_less_than(30)", younger);

        let on_date = repo.find_by_inserted_date(reference).await.map_err(db_error)?;
        emit(
            &mut report,
            &format!("Customers found with find_by_inserted_date({REFERENCE_DATE})"),
            on_date,
        );

        let after = repo
            .find_by_inserted_date_greater_than(reference)
            .await
            .map_err(db_error)?;
        emit(
            &mut report,
            &format!("Customers found with find_by_inserted_date_greater_than({REFERENCE_DATE})"),
            after,
        );

        Ok(report)
    }
}

fn db_error(e: anyhow::Error) -> DomainError {
    DomainError::database(format!("{e:#}"))
}

fn emit(report: &mut SeedReport, title: &str, customers: Vec<Customer>) {
    info!("{title}:");
    info!("{}", "-".repeat(title.len() + 1));
    if customers.is_empty() {
        info!("no customer found");
    }
    for customer in &customers {
        info!("{customer}");
    }
    info!("");

    report.queries.push(QueryReport {
        title: title.to_string(),
        customers,
    });
}
