//! Email delivery: message type, transports, and the gateway that applies
//! recipient and privacy rules before handing a message to a transport.

pub mod gateway;
pub mod log;
pub mod memory;
pub mod message;
pub mod transport;

pub use gateway::{EmailGateway, SendOutcome};
pub use log::LogTransport;
pub use memory::MemoryTransport;
pub use message::{EmailMessage, ResolvedCta};
pub use transport::EmailTransport;
