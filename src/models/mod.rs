//! Domain entities: patients, appointments and the appointment lifecycle.

pub mod appointment;
pub mod enums;
pub mod patient;

pub use appointment::*;
pub use enums::*;
pub use patient::*;
