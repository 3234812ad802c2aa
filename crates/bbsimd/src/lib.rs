//! Broadband access network simulator
//!
//! Emulates an OLT and its attached ONUs so an SDN controller can be
//! tested without real hardware. Speaks the OpenOLT control protocol for
//! bring-up, indications, and administration, and carries OMCI frames to
//! each simulated ONU.
//!
//! One sequential mailbox actor per OLT and per ONU owns that entity's
//! state machines; all indication frames leave through a single-writer
//! egress task so concurrent actors never interleave frames on the
//! controller stream.

pub mod config;
pub mod device;
pub mod egress;
pub mod error;
pub mod fsm;
pub mod message;
pub mod olt_actor;
pub mod onu_actor;
pub mod service;

pub use config::{Config, LISTEN_ADDRESS};
pub use device::{serial_number, NniPort, OltDevice, Onu, PonPort};
pub use egress::EgressHandle;
pub use error::{BbsimError, Result};
pub use message::Message;
pub use service::OltService;
