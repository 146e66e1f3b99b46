use sea_orm::ActiveValue::{NotSet, Set};

use crate::contract::model::Customer;
use crate::infra::storage::entity::{ActiveModel as CustomerAM, Model as CustomerEntity};

/// Convert a database row to a contract model
pub fn entity_to_contract(entity: CustomerEntity) -> Customer {
    Customer {
        id: Some(entity.id),
        first_name: entity.first_name,
        last_name: entity.last_name,
        age: entity.age,
        inserted_date: entity.inserted_date,
    }
}

/// Build an active model; the primary key stays unset for unsaved customers
/// so the database assigns it.
pub fn contract_to_active(customer: Customer) -> CustomerAM {
    CustomerAM {
        id: customer.id.map_or(NotSet, Set),
        first_name: Set(customer.first_name),
        last_name: Set(customer.last_name),
        age: Set(customer.age),
        inserted_date: Set(customer.inserted_date),
    }
}
