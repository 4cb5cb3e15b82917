//! # Ports Module
//!
//! - **Inbound** (`BinaryValueApi`): what the service layer can ask of the object.
//! - **Outbound** (`PresentValueNotifier`): where protocol writes of the present
//!   value are delivered.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
