//! Process-local repository: a sorted map guarded by a lock, with a
//! store-side id counter.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;

use crate::contract::model::Customer;
use crate::domain::repo::CustomersRepository;

#[derive(Default)]
struct State {
    rows: BTreeMap<i64, Customer>,
    last_id: i64,
}

#[derive(Default)]
pub struct InMemoryCustomersRepository {
    state: RwLock<State>,
}

impl InMemoryCustomersRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn select(&self, pred: impl Fn(&Customer) -> bool) -> Vec<Customer> {
        self.state
            .read()
            .rows
            .values()
            .filter(|c| pred(c))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CustomersRepository for InMemoryCustomersRepository {
    async fn save(&self, mut customer: Customer) -> anyhow::Result<Customer> {
        let mut state = self.state.write();
        let id = match customer.id {
            Some(id) => {
                // Keep generated ids clear of ids chosen by callers.
                state.last_id = state.last_id.max(id);
                id
            }
            None => {
                state.last_id = state
                    .last_id
                    .checked_add(1)
                    .ok_or_else(|| anyhow::anyhow!("customer id space exhausted"))?;
                state.last_id
            }
        };
        customer.id = Some(id);
        state.rows.insert(id, customer.clone());
        Ok(customer)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Customer>> {
        Ok(self.select(|_| true))
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Customer>> {
        Ok(self.state.read().rows.get(&id).cloned())
    }

    async fn find_by_last_name(&self, last_name: &str) -> anyhow::Result<Vec<Customer>> {
        Ok(self.select(|c| c.last_name == last_name))
    }

    async fn find_by_first_name_and_last_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> anyhow::Result<Vec<Customer>> {
        Ok(self.select(|c| c.first_name == first_name && c.last_name == last_name))
    }

    async fn find_by_last_name_containing(&self, fragment: &str) -> anyhow::Result<Vec<Customer>> {
        Ok(self.select(|c| c.last_name.contains(fragment)))
    }

    async fn find_by_age_greater_than(&self, age: i32) -> anyhow::Result<Vec<Customer>> {
        Ok(self.select(|c| matches!(c.age, Some(a) if a > age)))
    }

    async fn find_by_age_less_than(&self, age: i32) -> anyhow::Result<Vec<Customer>> {
        Ok(self.select(|c| matches!(c.age, Some(a) if a < age)))
    }

    async fn find_by_inserted_date(&self, date: NaiveDate) -> anyhow::Result<Vec<Customer>> {
        Ok(self.select(|c| c.inserted_date == Some(date)))
    }

    async fn find_by_inserted_date_greater_than(
        &self,
        date: NaiveDate,
    ) -> anyhow::Result<Vec<Customer>> {
        Ok(self.select(|c| matches!(c.inserted_date, Some(d) if d > date)))
    }

    async fn count(&self) -> anyhow::Result<u64> {
        Ok(self.state.read().rows.len() as u64)
    }

    async fn delete_by_id(&self, id: i64) -> anyhow::Result<bool> {
        Ok(self.state.write().rows.remove(&id).is_some())
    }
}
