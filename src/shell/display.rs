//! Text rendering of entities for the console.

use crate::models::{Appointment, Patient};

pub const DISPLAY_DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

pub fn patient_line(patient: &Patient) -> String {
    format!(
        "ID: {}, Name: {}, Phone: {}, Email: {}",
        patient.id,
        patient.name,
        patient.phone,
        or_dash(patient.email.as_deref()),
    )
}

pub fn appointment_line(appointment: &Appointment) -> String {
    format!(
        "ID: {}, Patient ID: {}, Doctor: {}, Time: {}, Purpose: {}, Status: {}",
        appointment.id,
        appointment.patient_id,
        appointment.doctor_name,
        appointment.appointment_time.format(DISPLAY_DATE_TIME_FORMAT),
        or_dash(appointment.purpose.as_deref()),
        appointment.status,
    )
}
