use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{format_date, parse_date, parse_date_time, require_text, Repository};
use crate::db::DatabaseError;
use crate::models::*;

const PATIENT_COLUMNS: &str = "id, name, phone, email, date_of_birth, address, created_at";

/// Raw `patients` row as SQLite hands it back, before date parsing.
type PatientRow = (i64, String, String, Option<String>, String, Option<String>, String);

fn read_row(row: &Row<'_>) -> rusqlite::Result<PatientRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
    ))
}

fn into_patient(raw: PatientRow) -> Result<Patient, DatabaseError> {
    let (id, name, phone, email, date_of_birth, address, created_at) = raw;
    Ok(Patient {
        id,
        name,
        phone,
        email,
        date_of_birth: parse_date("date_of_birth", &date_of_birth)?,
        address,
        created_at: parse_date_time("created_at", &created_at)?,
    })
}

fn validate(details: &NewPatient) -> Result<(), DatabaseError> {
    require_text("name", &details.name)?;
    require_text("phone", &details.phone)
}

/// CRUD over the `patients` table.
pub struct PatientRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> PatientRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// All patients, oldest id first. Empty table gives an empty vec.
    pub fn get_all(&self) -> Result<Vec<Patient>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {PATIENT_COLUMNS} FROM patients ORDER BY id ASC"))?;

        let rows = stmt
            .query_map([], read_row)?
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(count = rows.len(), "Loaded patients");
        rows.into_iter().map(into_patient).collect()
    }

    /// Delete a patient; their appointments go with them (ON DELETE CASCADE).
    pub fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let deleted = self
            .conn
            .execute("DELETE FROM patients WHERE id = ?1", params![id])?;
        if deleted > 0 {
            tracing::info!(patient_id = id, "Deleted patient");
        }
        Ok(deleted > 0)
    }
}

impl Repository<Patient, NewPatient> for PatientRepository<'_> {
    fn create(&self, new: &NewPatient) -> Result<i64, DatabaseError> {
        validate(new)?;
        self.conn.execute(
            "INSERT INTO patients (name, phone, email, date_of_birth, address)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                new.name,
                new.phone,
                new.email,
                format_date(&new.date_of_birth),
                new.address,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(patient_id = id, "Created patient");
        Ok(id)
    }

    fn get_by_id(&self, id: i64) -> Result<Option<Patient>, DatabaseError> {
        let raw = self
            .conn
            .query_row(
                &format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE id = ?1"),
                params![id],
                read_row,
            )
            .optional()?;

        raw.map(into_patient).transpose()
    }

    fn update(&self, patient: &Patient) -> Result<bool, DatabaseError> {
        validate(&patient.details())?;
        let updated = self.conn.execute(
            "UPDATE patients SET name = ?1, phone = ?2, email = ?3, date_of_birth = ?4, address = ?5
             WHERE id = ?6",
            params![
                patient.name,
                patient.phone,
                patient.email,
                format_date(&patient.date_of_birth),
                patient.address,
                patient.id,
            ],
        )?;
        Ok(updated > 0)
    }
}
