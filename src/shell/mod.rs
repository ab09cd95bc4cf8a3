//! Interactive menu over the patient and appointment repositories.
//!
//! The shell owns all terminal formatting. It hands the repositories
//! typed, validated values and reports their failures back to the
//! operator without stopping the session.

pub mod display;
pub mod input;

use std::io::{self, BufRead, Write};

use rusqlite::Connection;
use thiserror::Error;

use crate::db::{AppointmentRepository, DatabaseError, PatientRepository, Repository};
use crate::models::{Appointment, NewAppointment, NewPatient};
use crate::roster;
use crate::scheduling::WorkingHours;

use display::{appointment_line, patient_line, DISPLAY_DATE_TIME_FORMAT};
use input::Prompter;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Input closed")]
    InputClosed,
}

/// Top-level menu entries, numbered as shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddPatient,
    ListPatients,
    ScheduleAppointment,
    AppointmentsByPatient,
    AppointmentsByDoctor,
    AppointmentsByDate,
    CancelAppointment,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 8] = [
        MenuChoice::AddPatient,
        MenuChoice::ListPatients,
        MenuChoice::ScheduleAppointment,
        MenuChoice::AppointmentsByPatient,
        MenuChoice::AppointmentsByDoctor,
        MenuChoice::AppointmentsByDate,
        MenuChoice::CancelAppointment,
        MenuChoice::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::AddPatient => "Add New Patient",
            Self::ListPatients => "View All Patients",
            Self::ScheduleAppointment => "Schedule Appointment",
            Self::AppointmentsByPatient => "View Appointments by Patient",
            Self::AppointmentsByDoctor => "View Appointments by Doctor",
            Self::AppointmentsByDate => "View Appointments by Date",
            Self::CancelAppointment => "Cancel Appointment",
            Self::Exit => "Exit",
        }
    }

    /// Entry at a 1-based menu number.
    pub fn from_number(number: i64) -> Option<MenuChoice> {
        usize::try_from(number)
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }
}

pub struct Shell<'conn, R, W> {
    prompter: Prompter<R, W>,
    patients: PatientRepository<'conn>,
    appointments: AppointmentRepository<'conn>,
    hours: WorkingHours,
}

impl<'conn, R: BufRead, W: Write> Shell<'conn, R, W> {
    pub fn new(conn: &'conn Connection, input: R, output: W) -> Self {
        Self {
            prompter: Prompter::new(input, output),
            patients: PatientRepository::new(conn),
            appointments: AppointmentRepository::new(conn),
            hours: WorkingHours::default(),
        }
    }

    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    /// Loop until the operator picks Exit or input ends.
    pub fn run(&mut self) -> Result<(), ShellError> {
        loop {
            match self.step() {
                Ok(true) => continue,
                Ok(false) => {
                    self.message("Thank you for using the clinic desk!")?;
                    return Ok(());
                }
                Err(ShellError::InputClosed) => {
                    tracing::debug!("Input closed, leaving menu");
                    return Ok(());
                }
                Err(ShellError::Database(e)) => {
                    tracing::warn!(error = %e, "Operation failed");
                    self.error(&e.to_string())?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// One menu round. `Ok(false)` means exit.
    fn step(&mut self) -> Result<bool, ShellError> {
        self.show_menu()?;
        let number = self.prompter.ask_number("Enter your choice")?;
        let Some(choice) = MenuChoice::from_number(number) else {
            self.error("Invalid choice. Please try again.")?;
            return Ok(true);
        };

        match choice {
            MenuChoice::AddPatient => self.add_patient()?,
            MenuChoice::ListPatients => self.list_patients()?,
            MenuChoice::ScheduleAppointment => self.schedule_appointment()?,
            MenuChoice::AppointmentsByPatient => self.appointments_by_patient()?,
            MenuChoice::AppointmentsByDoctor => self.appointments_by_doctor()?,
            MenuChoice::AppointmentsByDate => self.appointments_by_date()?,
            MenuChoice::CancelAppointment => self.cancel_appointment()?,
            MenuChoice::Exit => return Ok(false),
        }
        Ok(true)
    }

    fn show_menu(&mut self) -> Result<(), ShellError> {
        let out = self.prompter.output();
        writeln!(out, "\n=== Clinic Desk ===")?;
        for (i, choice) in MenuChoice::ALL.iter().enumerate() {
            writeln!(out, "{}. {}", i + 1, choice.label())?;
        }
        writeln!(out)?;
        Ok(())
    }

    fn header(&mut self, title: &str) -> Result<(), ShellError> {
        writeln!(self.prompter.output(), "\n=== {title} ===")?;
        Ok(())
    }

    fn message(&mut self, text: &str) -> Result<(), ShellError> {
        writeln!(self.prompter.output(), "\n{text}")?;
        Ok(())
    }

    fn error(&mut self, text: &str) -> Result<(), ShellError> {
        writeln!(self.prompter.output(), "\nError: {text}")?;
        Ok(())
    }

    fn add_patient(&mut self) -> Result<(), ShellError> {
        self.header("Add New Patient")?;
        let name = self.prompter.ask_required("Enter patient's full name")?;
        let phone = self.prompter.ask_required("Enter phone number")?;
        let email = self.prompter.ask_optional("Enter email address (optional)")?;
        let date_of_birth = self.prompter.ask_date("Enter date of birth")?;
        let address = self.prompter.ask_optional("Enter address (optional)")?;

        let patient = NewPatient::new(name, phone, date_of_birth)
            .with_email(email)
            .with_address(address);
        let id = self.patients.create(&patient)?;
        self.message(&format!("Patient added successfully with ID: {id}"))
    }

    fn list_patients(&mut self) -> Result<(), ShellError> {
        self.header("All Patients")?;
        let patients = self.patients.get_all()?;
        if patients.is_empty() {
            return self.message("No patients found.");
        }
        let out = self.prompter.output();
        for patient in &patients {
            writeln!(out, "{}", patient_line(patient))?;
        }
        Ok(())
    }

    /// Ask for a roster position; `None` after reporting an out-of-range pick.
    fn choose_doctor(&mut self) -> Result<Option<&'static str>, ShellError> {
        let out = self.prompter.output();
        writeln!(out, "\nAvailable Doctors:")?;
        for (i, doctor) in roster::DOCTORS.iter().enumerate() {
            writeln!(out, "{}. {doctor}", i + 1)?;
        }

        let pick = self
            .prompter
            .ask_number(&format!("Select doctor (1-{})", roster::len()))?;
        let doctor = usize::try_from(pick).ok().and_then(roster::doctor_at);
        if doctor.is_none() {
            self.error("Invalid doctor selection.")?;
        }
        Ok(doctor)
    }

    fn schedule_appointment(&mut self) -> Result<(), ShellError> {
        self.header("Schedule New Appointment")?;
        self.list_patients()?;
        let patient_id = self.prompter.ask_number("\nEnter patient ID")?;

        let Some(doctor) = self.choose_doctor()? else {
            return Ok(());
        };

        let when = self
            .prompter
            .ask_date_time("Enter appointment date and time")?;
        if !self.hours.is_available(doctor, when) {
            return self.error(
                "The selected time slot is not available. Please choose another time.",
            );
        }

        let purpose = self.prompter.ask_optional("Enter purpose of visit")?;
        let request = NewAppointment::new(patient_id, doctor, when, purpose);

        let id = match self.appointments.create(&request) {
            Ok(id) => id,
            Err(e) if e.is_foreign_key_violation() => {
                tracing::warn!(patient_id, "Booking refused for unknown patient");
                return self.error(&format!("No patient with ID {patient_id}."));
            }
            Err(e) => return Err(e.into()),
        };

        self.message(&format!(
            "Appointment scheduled successfully!\nAppointment ID: {id}\nDoctor: {doctor}\nDate/Time: {}",
            when.format(DISPLAY_DATE_TIME_FORMAT)
        ))
    }

    fn show_appointments(&mut self, appointments: &[Appointment]) -> Result<(), ShellError> {
        if appointments.is_empty() {
            return self.message("No appointments found.");
        }
        let out = self.prompter.output();
        for appointment in appointments {
            writeln!(out, "{}", appointment_line(appointment))?;
        }
        Ok(())
    }

    fn appointments_by_patient(&mut self) -> Result<(), ShellError> {
        self.header("View Appointments by Patient")?;
        let patient_id = self.prompter.ask_number("Enter patient ID")?;
        let appointments = self.appointments.get_by_patient(patient_id)?;
        self.show_appointments(&appointments)
    }

    fn appointments_by_doctor(&mut self) -> Result<(), ShellError> {
        self.header("View Appointments by Doctor")?;
        let Some(doctor) = self.choose_doctor()? else {
            return Ok(());
        };
        let appointments = self.appointments.get_by_doctor(doctor)?;
        self.show_appointments(&appointments)
    }

    fn appointments_by_date(&mut self) -> Result<(), ShellError> {
        self.header("View Appointments by Date")?;
        let date = self.prompter.ask_date("Enter date")?;
        let appointments = self.appointments.get_by_date(date)?;
        self.show_appointments(&appointments)
    }

    fn cancel_appointment(&mut self) -> Result<(), ShellError> {
        self.header("Cancel Appointment")?;
        let id = self.prompter.ask_number("Enter appointment ID to cancel")?;
        if self.appointments.cancel(id)? {
            self.message("Appointment cancelled successfully!")
        } else {
            self.error("Failed to cancel appointment. Please check the appointment ID and try again.")
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use chrono::NaiveDate;

    use super::*;
    use crate::db::sqlite::open_memory_database;
    use crate::models::AppointmentStatus;

    /// Run the shell over `script` and return everything it printed.
    fn run_script(conn: &Connection, script: &str) -> String {
        let mut shell = Shell::new(conn, Cursor::new(script.as_bytes().to_vec()), Vec::new());
        shell.run().unwrap();
        String::from_utf8(shell.into_output()).unwrap()
    }

    fn seed_patient(conn: &Connection) -> i64 {
        PatientRepository::new(conn)
            .create(&NewPatient::new(
                "Ada Lovelace",
                "555-0100",
                NaiveDate::from_ymd_opt(1990, 4, 1).unwrap(),
            ))
            .unwrap()
    }

    #[test]
    fn menu_numbers_map_to_choices() {
        assert_eq!(MenuChoice::from_number(1), Some(MenuChoice::AddPatient));
        assert_eq!(MenuChoice::from_number(8), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::from_number(0), None);
        assert_eq!(MenuChoice::from_number(9), None);
        assert_eq!(MenuChoice::from_number(-1), None);
    }

    #[test]
    fn exit_ends_the_session() {
        let conn = open_memory_database().unwrap();
        let out = run_script(&conn, "8\n");
        assert!(out.contains("=== Clinic Desk ==="));
        assert!(out.contains("Thank you for using the clinic desk!"));
    }

    #[test]
    fn end_of_input_ends_the_session_quietly() {
        let conn = open_memory_database().unwrap();
        let out = run_script(&conn, "");
        assert!(!out.contains("Thank you"));
    }

    #[test]
    fn unknown_and_non_numeric_choices_are_reported() {
        let conn = open_memory_database().unwrap();
        let out = run_script(&conn, "42\nhello\n8\n");
        assert!(out.contains("Invalid choice. Please try again."));
        assert!(out.contains("Please enter a valid number."));
    }

    #[test]
    fn add_patient_then_list() {
        let conn = open_memory_database().unwrap();
        let out = run_script(
            &conn,
            "1\nAda Lovelace\n555-0100\n\n1990-13-01\n1990-04-01\n12 Analytical Row\n2\n8\n",
        );

        assert!(out.contains("Invalid date format."));
        assert!(out.contains("Patient added successfully with ID: 1"));
        assert!(out.contains("ID: 1, Name: Ada Lovelace, Phone: 555-0100, Email: -"));

        let stored = PatientRepository::new(&conn).get_by_id(1).unwrap().unwrap();
        assert!(stored.email.is_none());
        assert_eq!(stored.address.as_deref(), Some("12 Analytical Row"));
    }

    #[test]
    fn list_patients_on_empty_store() {
        let conn = open_memory_database().unwrap();
        let out = run_script(&conn, "2\n8\n");
        assert!(out.contains("No patients found."));
    }

    #[test]
    fn schedule_appointment_within_hours() {
        let conn = open_memory_database().unwrap();
        let patient = seed_patient(&conn);
        let out = run_script(&conn, &format!("3\n{patient}\n2\n2026-03-02 17:00\nFollow-up\n8\n"));

        assert!(out.contains("Appointment scheduled successfully!"));
        assert!(out.contains("Doctor: Dr. Johnson"));
        assert!(out.contains("Date/Time: 2026-03-02 17:00"));

        let booked = AppointmentRepository::new(&conn).get_by_patient(patient).unwrap();
        assert_eq!(booked.len(), 1);
        assert_eq!(booked[0].purpose.as_deref(), Some("Follow-up"));
        assert_eq!(booked[0].status, AppointmentStatus::Scheduled);
    }

    #[test]
    fn schedule_outside_hours_is_refused() {
        let conn = open_memory_database().unwrap();
        let patient = seed_patient(&conn);
        let out = run_script(&conn, &format!("3\n{patient}\n1\n2026-03-02 08:59\n8\n"));

        assert!(out.contains("The selected time slot is not available."));
        assert!(AppointmentRepository::new(&conn).get_by_patient(patient).unwrap().is_empty());
    }

    #[test]
    fn schedule_with_bad_doctor_returns_to_menu() {
        let conn = open_memory_database().unwrap();
        let patient = seed_patient(&conn);
        let out = run_script(&conn, &format!("3\n{patient}\n5\n8\n"));
        assert!(out.contains("Invalid doctor selection."));
    }

    #[test]
    fn schedule_for_unknown_patient_is_reported() {
        let conn = open_memory_database().unwrap();
        let out = run_script(&conn, "3\n99\n1\n2026-03-02 10:00\n\n8\n");
        assert!(out.contains("No patient with ID 99."));
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM appointments", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn lookups_and_cancel_flow() {
        let conn = open_memory_database().unwrap();
        let patient = seed_patient(&conn);
        let repo = AppointmentRepository::new(&conn);
        let when = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap().and_hms_opt(11, 0, 0).unwrap();
        let id = repo
            .create(&NewAppointment::new(patient, "Dr. Williams", when, Some("Scan".into())))
            .unwrap();

        let out = run_script(
            &conn,
            &format!("5\n3\n6\n2026-03-02\n7\n{id}\n7\n{id}\n7\n999\n6\n2026-03-02\n4\n{patient}\n8\n"),
        );

        assert_eq!(out.matches("Doctor: Dr. Williams, Time: 2026-03-02 11:00").count(), 3);
        assert_eq!(out.matches("Appointment cancelled successfully!").count(), 2);
        assert!(out.contains("Failed to cancel appointment."));
        // by-date hides the cancelled booking, by-patient still lists it
        assert!(out.contains("No appointments found."));
        assert!(out.contains("Status: Cancelled"));
    }
}
