//! Repository contracts.

pub mod appointment;
pub mod directory;
pub mod notification;

pub use appointment::AppointmentRepository;
pub use directory::DirectoryRepository;
pub use notification::NotificationRepository;
