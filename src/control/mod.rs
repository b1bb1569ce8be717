pub mod error;
pub mod handler;
pub mod port;

pub use error::ControlError;
pub use handler::{ControlHandler, Opcode};
pub use port::{MemPort, PortFault, TransferPort};
