//! Appointment workflow: state machine, service, projection and dispatch hand-off.

pub mod dispatch;
pub mod machine;
pub mod requests;
pub mod service;
pub mod view;

pub use dispatch::{DispatchRequest, DispatchSink};
pub use machine::Transition;
pub use requests::{
    CancelRequest, CreateAppointmentRequest, CreateObligatoryRequest, PlanVisitRequest,
    ProposeSlotRequest,
};
pub use service::AppointmentService;
pub use view::AppointmentView;
