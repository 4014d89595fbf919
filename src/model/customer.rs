use super::Entity;
use crate::core::{RecordId, Value};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Option<RecordId>,
    pub name: String,
    pub tax_id: String,
    pub registration_date: Option<NaiveDate>,
}

impl Customer {
    /// New customer registered today.
    pub fn new(name: impl Into<String>, tax_id: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            tax_id: tax_id.into(),
            registration_date: Some(Local::now().date_naive()),
        }
    }

    /// Filter probe carrying only the given fields.
    pub fn probe(name: impl Into<String>, tax_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tax_id: tax_id.into(),
            ..Self::default()
        }
    }
}

impl Entity for Customer {
    const KIND: &'static str = "customer";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", self.id.into()),
            ("name", self.name.as_str().into()),
            ("tax_id", self.tax_id.as_str().into()),
            ("registration_date", self.registration_date.into()),
        ]
    }
}
