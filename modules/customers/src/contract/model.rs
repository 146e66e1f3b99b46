use chrono::NaiveDate;
use std::fmt;

use crate::domain::date;
use crate::domain::error::DomainError;

/// Customer record exchanged with the repository.
///
/// `id` is `None` until the record is saved for the first time; the store
/// assigns it once and never changes it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub age: Option<i32>,
    pub inserted_date: Option<NaiveDate>,
}

impl Customer {
    /// Unsaved customer with only a name.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            age: None,
            inserted_date: None,
        }
    }

    /// Unsaved customer with age and a `dd/mm/yyyy` inserted date.
    ///
    /// An unparseable date is replaced by today's date (see [`date::parse`]).
    pub fn with_details(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        age: i32,
        inserted_date: &str,
    ) -> Self {
        Self {
            age: Some(age),
            inserted_date: Some(date::parse(inserted_date)),
            ..Self::new(first_name, last_name)
        }
    }

    /// Like [`Customer::with_details`] but rejects an unparseable date.
    pub fn try_with_details(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        age: i32,
        inserted_date: &str,
    ) -> Result<Self, DomainError> {
        let parsed = date::try_parse(inserted_date)?;
        Ok(Self {
            age: Some(age),
            inserted_date: Some(parsed),
            ..Self::new(first_name, last_name)
        })
    }
}

struct OrNull<T>(Option<T>);

impl<T: fmt::Display> fmt::Display for OrNull<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(v) => fmt::Display::fmt(v, f),
            None => f.write_str("null"),
        }
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Customer[id={}, firstName='{}', lastName='{}', age='{}', insertedDate='{}']",
            OrNull(self.id),
            self.first_name,
            self.last_name,
            OrNull(self.age),
            OrNull(self.inserted_date.map(date::format)),
        )
    }
}
