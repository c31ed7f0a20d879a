//! Appointment aggregate
//!
//! Booking records with a closed status lifecycle.

pub mod model;
pub mod repository;

pub use model::{
    Appointment, AppointmentChanges, AppointmentStatus, AppointmentView, NewAppointment,
};
pub use repository::AppointmentRepository;
