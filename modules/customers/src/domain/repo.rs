use crate::contract::model::Customer;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Port for the domain layer: persistence operations over customers.
/// Object-safe and async-friendly via `async_trait`.
///
/// Every query returns its matches ordered by ascending id.
#[async_trait]
pub trait CustomersRepository: Send + Sync {
    /// Insert when `customer.id` is `None` (assigning a fresh id), otherwise
    /// replace the row stored under that id. Returns the stored record.
    async fn save(&self, customer: Customer) -> anyhow::Result<Customer>;

    async fn find_all(&self) -> anyhow::Result<Vec<Customer>>;

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Customer>>;

    /// Exact, case-sensitive match on the last name.
    async fn find_by_last_name(&self, last_name: &str) -> anyhow::Result<Vec<Customer>>;

    async fn find_by_first_name_and_last_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> anyhow::Result<Vec<Customer>>;

    /// Case-sensitive substring match on the last name.
    async fn find_by_last_name_containing(&self, fragment: &str) -> anyhow::Result<Vec<Customer>>;

    /// Strictly older than `age`; customers without an age never match.
    async fn find_by_age_greater_than(&self, age: i32) -> anyhow::Result<Vec<Customer>>;

    /// Strictly younger than `age`; customers without an age never match.
    async fn find_by_age_less_than(&self, age: i32) -> anyhow::Result<Vec<Customer>>;

    async fn find_by_inserted_date(&self, date: NaiveDate) -> anyhow::Result<Vec<Customer>>;

    /// Inserted strictly after `date`; customers without a date never match.
    async fn find_by_inserted_date_greater_than(
        &self,
        date: NaiveDate,
    ) -> anyhow::Result<Vec<Customer>>;

    async fn count(&self) -> anyhow::Result<u64>;

    async fn exists_by_id(&self, id: i64) -> anyhow::Result<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    /// Delete by id. Returns true if a row was deleted.
    async fn delete_by_id(&self, id: i64) -> anyhow::Result<bool>;
}
