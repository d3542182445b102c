//! Repository implementations

pub mod appointment_sql;


pub use appointment_sql::SqlAppointmentRepository;
