use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Patient details before the store has assigned an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPatient {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub date_of_birth: NaiveDate,
    pub address: Option<String>,
}

impl NewPatient {
    pub fn new(name: impl Into<String>, phone: impl Into<String>, date_of_birth: NaiveDate) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: None,
            date_of_birth,
            address: None,
        }
    }

    pub fn with_email(self, email: Option<String>) -> Self {
        Self { email, ..self }
    }

    pub fn with_address(self, address: Option<String>) -> Self {
        Self { address, ..self }
    }
}

/// A stored patient row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub date_of_birth: NaiveDate,
    pub address: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Patient {
    /// Same patient (id and creation time kept) with every mutable field replaced.
    pub fn revised(&self, details: NewPatient) -> Patient {
        Patient {
            id: self.id,
            name: details.name,
            phone: details.phone,
            email: details.email,
            date_of_birth: details.date_of_birth,
            address: details.address,
            created_at: self.created_at,
        }
    }

    /// The mutable fields, detached from identity.
    pub fn details(&self) -> NewPatient {
        NewPatient {
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            date_of_birth: self.date_of_birth,
            address: self.address.clone(),
        }
    }
}
