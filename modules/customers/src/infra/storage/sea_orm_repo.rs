//! SeaORM-backed repository implementation for the domain port.
//!
//! This struct is generic over `C: ConnectionTrait`, so you can construct it
//! with a `DatabaseConnection` **or** a transactional connection.

use anyhow::Context;
use chrono::NaiveDate;
use sea_orm::sea_query::SimpleExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use tracing::{debug, instrument};

use crate::contract::model::Customer;
use crate::domain::repo::CustomersRepository;
use crate::infra::storage::entity::{Column, Entity as CustomerEntity};
use crate::infra::storage::mapper::{contract_to_active, entity_to_contract};

/// SeaORM repository impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmCustomersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmCustomersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }

    async fn select(&self, condition: SimpleExpr, what: &'static str) -> anyhow::Result<Vec<Customer>> {
        let rows = CustomerEntity::find()
            .filter(condition)
            .order_by_asc(Column::Id)
            .all(&self.conn)
            .await
            .with_context(|| format!("{what} failed"))?;
        debug!(rows = rows.len(), "{what}");
        Ok(rows.into_iter().map(entity_to_contract).collect())
    }
}

#[async_trait::async_trait]
impl<C> CustomersRepository for SeaOrmCustomersRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    #[instrument(name = "customers.repo.save", skip_all, fields(id = ?customer.id))]
    async fn save(&self, customer: Customer) -> anyhow::Result<Customer> {
        let existing = match customer.id {
            Some(id) => CustomerEntity::find_by_id(id)
                .one(&self.conn)
                .await
                .context("save lookup failed")?,
            None => None,
        };

        let active = contract_to_active(customer);
        let stored = if existing.is_some() {
            active.update(&self.conn).await.context("update failed")?
        } else {
            active.insert(&self.conn).await.context("insert failed")?
        };
        debug!(stored_id = stored.id, "save");
        Ok(entity_to_contract(stored))
    }

    #[instrument(name = "customers.repo.find_all", skip(self))]
    async fn find_all(&self) -> anyhow::Result<Vec<Customer>> {
        let rows = CustomerEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.conn)
            .await
            .context("find_all failed")?;
        debug!(rows = rows.len(), "find_all");
        Ok(rows.into_iter().map(entity_to_contract).collect())
    }

    #[instrument(name = "customers.repo.find_by_id", skip(self))]
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Customer>> {
        let found = CustomerEntity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_by_id failed")?;
        debug!(found = found.is_some(), "find_by_id");
        Ok(found.map(entity_to_contract))
    }

    #[instrument(name = "customers.repo.find_by_last_name", skip(self))]
    async fn find_by_last_name(&self, last_name: &str) -> anyhow::Result<Vec<Customer>> {
        self.select(Column::LastName.eq(last_name), "find_by_last_name")
            .await
    }

    #[instrument(name = "customers.repo.find_by_first_name_and_last_name", skip(self))]
    async fn find_by_first_name_and_last_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> anyhow::Result<Vec<Customer>> {
        self.select(
            Column::FirstName
                .eq(first_name)
                .and(Column::LastName.eq(last_name)),
            "find_by_first_name_and_last_name",
        )
        .await
    }

    #[instrument(name = "customers.repo.find_by_last_name_containing", skip(self))]
    async fn find_by_last_name_containing(&self, fragment: &str) -> anyhow::Result<Vec<Customer>> {
        // SQLite LIKE folds ASCII case and treats % and _ as wildcards; narrow
        // the candidates to exact substring matches.
        let mut rows = self
            .select(Column::LastName.contains(fragment), "find_by_last_name_containing")
            .await?;
        rows.retain(|c| c.last_name.contains(fragment));
        Ok(rows)
    }

    #[instrument(name = "customers.repo.find_by_age_greater_than", skip(self))]
    async fn find_by_age_greater_than(&self, age: i32) -> anyhow::Result<Vec<Customer>> {
        self.select(Column::Age.gt(age), "find_by_age_greater_than")
            .await
    }

    #[instrument(name = "customers.repo.find_by_age_less_than", skip(self))]
    async fn find_by_age_less_than(&self, age: i32) -> anyhow::Result<Vec<Customer>> {
        self.select(Column::Age.lt(age), "find_by_age_less_than")
            .await
    }

    #[instrument(name = "customers.repo.find_by_inserted_date", skip(self))]
    async fn find_by_inserted_date(&self, date: NaiveDate) -> anyhow::Result<Vec<Customer>> {
        self.select(Column::InsertedDate.eq(date), "find_by_inserted_date")
            .await
    }

    #[instrument(name = "customers.repo.find_by_inserted_date_greater_than", skip(self))]
    async fn find_by_inserted_date_greater_than(
        &self,
        date: NaiveDate,
    ) -> anyhow::Result<Vec<Customer>> {
        self.select(
            Column::InsertedDate.gt(date),
            "find_by_inserted_date_greater_than",
        )
        .await
    }

    #[instrument(name = "customers.repo.count", skip(self))]
    async fn count(&self) -> anyhow::Result<u64> {
        let total = CustomerEntity::find()
            .count(&self.conn)
            .await
            .context("count failed")?;
        debug!(total, "count");
        Ok(total)
    }

    #[instrument(name = "customers.repo.delete_by_id", skip(self))]
    async fn delete_by_id(&self, id: i64) -> anyhow::Result<bool> {
        let res = CustomerEntity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("delete failed")?;
        debug!(rows = res.rows_affected, "delete_by_id");
        Ok(res.rows_affected > 0)
    }
}
