//! In-memory repository implementations.

pub mod appointment;
pub mod directory;
pub mod notification;

pub use appointment::MemoryAppointmentRepository;
pub use directory::MemoryDirectory;
pub use notification::MemoryNotificationRepository;
