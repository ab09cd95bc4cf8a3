use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::enums::AppointmentStatus;

/// Booking request. The store assigns the id and starts it as `Scheduled`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub patient_id: i64,
    pub doctor_name: String,
    pub appointment_time: NaiveDateTime,
    pub purpose: Option<String>,
}

impl NewAppointment {
    pub fn new(
        patient_id: i64,
        doctor_name: impl Into<String>,
        appointment_time: NaiveDateTime,
        purpose: Option<String>,
    ) -> Self {
        Self {
            patient_id,
            doctor_name: doctor_name.into(),
            appointment_time,
            purpose,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_name: String,
    pub appointment_time: NaiveDateTime,
    pub purpose: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: NaiveDateTime,
}

impl Appointment {
    /// Scheduled → Cancelled. Cancelling a cancelled appointment is a no-op.
    pub fn cancel(self) -> Appointment {
        Appointment {
            status: AppointmentStatus::Cancelled,
            ..self
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.status == AppointmentStatus::Scheduled
    }
}
