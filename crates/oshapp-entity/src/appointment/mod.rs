//! Appointment domain entities.

pub mod kind;
pub mod model;
pub mod status;
pub mod visit_mode;

pub use kind::AppointmentType;
pub use model::{Appointment, AppointmentComment};
pub use status::AppointmentStatus;
pub use visit_mode::VisitMode;
