use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Params, Row};

use super::{format_date, format_date_time, parse_date_time, require_text, Repository};
use crate::db::DatabaseError;
use crate::models::*;

const APPOINTMENT_COLUMNS: &str =
    "id, patient_id, doctor_name, appointment_time, purpose, status, created_at";

type AppointmentRow = (i64, i64, String, String, Option<String>, String, String);

fn read_row(row: &Row<'_>) -> rusqlite::Result<AppointmentRow> {
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

fn into_appointment(raw: AppointmentRow) -> Result<Appointment, DatabaseError> {
    let (id, patient_id, doctor_name, appointment_time, purpose, status, created_at) = raw;
    Ok(Appointment {
        id,
        patient_id,
        doctor_name,
        appointment_time: parse_date_time("appointment_time", &appointment_time)?,
        purpose,
        status: AppointmentStatus::from_str(&status)?,
        created_at: parse_date_time("created_at", &created_at)?,
    })
}

/// CRUD and lookups over the `appointments` table.
///
/// Doctor and date lookups only surface `Scheduled` rows; the patient
/// lookup returns every status.
pub struct AppointmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> AppointmentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_list<P: Params>(&self, filter: &str, args: P) -> Result<Vec<Appointment>, DatabaseError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments
             WHERE {filter}
             ORDER BY appointment_time ASC, id ASC"
        ))?;

        let rows = stmt
            .query_map(args, read_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(into_appointment).collect()
    }

    /// Every appointment of a patient regardless of status, earliest first.
    pub fn get_by_patient(&self, patient_id: i64) -> Result<Vec<Appointment>, DatabaseError> {
        let appointments = self.query_list("patient_id = ?1", params![patient_id])?;
        tracing::debug!(patient_id, count = appointments.len(), "Appointments by patient");
        Ok(appointments)
    }

    /// Scheduled appointments for a doctor, earliest first.
    pub fn get_by_doctor(&self, doctor_name: &str) -> Result<Vec<Appointment>, DatabaseError> {
        let appointments = self.query_list(
            "doctor_name = ?1 AND status = ?2",
            params![doctor_name, AppointmentStatus::Scheduled.as_str()],
        )?;
        tracing::debug!(doctor_name, count = appointments.len(), "Appointments by doctor");
        Ok(appointments)
    }

    /// Scheduled appointments falling on a calendar day, earliest first.
    pub fn get_by_date(&self, date: NaiveDate) -> Result<Vec<Appointment>, DatabaseError> {
        let appointments = self.query_list(
            "date(appointment_time) = ?1 AND status = ?2",
            params![format_date(&date), AppointmentStatus::Scheduled.as_str()],
        )?;
        tracing::debug!(%date, count = appointments.len(), "Appointments by date");
        Ok(appointments)
    }

    /// Mark an appointment cancelled whatever its current status.
    ///
    /// Returns `false` only when no appointment has this id.
    pub fn cancel(&self, id: i64) -> Result<bool, DatabaseError> {
        let updated = self.conn.execute(
            "UPDATE appointments SET status = ?1 WHERE id = ?2",
            params![AppointmentStatus::Cancelled.as_str(), id],
        )?;
        if updated > 0 {
            tracing::info!(appointment_id = id, "Cancelled appointment");
        }
        Ok(updated > 0)
    }
}

impl Repository<Appointment, NewAppointment> for AppointmentRepository<'_> {
    /// Insert as `Scheduled`. An unknown `patient_id` fails on the foreign key.
    fn create(&self, new: &NewAppointment) -> Result<i64, DatabaseError> {
        require_text("doctor_name", &new.doctor_name)?;
        self.conn.execute(
            "INSERT INTO appointments (patient_id, doctor_name, appointment_time, purpose, status)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                new.patient_id,
                new.doctor_name,
                format_date_time(&new.appointment_time),
                new.purpose,
                AppointmentStatus::Scheduled.as_str(),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(
            appointment_id = id,
            patient_id = new.patient_id,
            doctor = %new.doctor_name,
            "Scheduled appointment"
        );
        Ok(id)
    }

    fn get_by_id(&self, id: i64) -> Result<Option<Appointment>, DatabaseError> {
        let raw = self
            .conn
            .query_row(
                &format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = ?1"),
                params![id],
                read_row,
            )
            .optional()?;

        raw.map(into_appointment).transpose()
    }

    fn update(&self, appointment: &Appointment) -> Result<bool, DatabaseError> {
        require_text("doctor_name", &appointment.doctor_name)?;
        let updated = self.conn.execute(
            "UPDATE appointments
             SET patient_id = ?1, doctor_name = ?2, appointment_time = ?3, purpose = ?4, status = ?5
             WHERE id = ?6",
            params![
                appointment.patient_id,
                appointment.doctor_name,
                format_date_time(&appointment.appointment_time),
                appointment.purpose,
                appointment.status.as_str(),
                appointment.id,
            ],
        )?;
        Ok(updated > 0)
    }
}
