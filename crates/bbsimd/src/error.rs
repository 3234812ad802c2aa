//! Error types for bbsimd

use thiserror::Error;

/// Simulator errors
#[derive(Error, Debug)]
pub enum BbsimError {
    /// A state machine received an event its current state does not accept
    #[error("Invalid transition on {machine}: no event {event} from state {state}")]
    InvalidTransition {
        machine: String,
        event: &'static str,
        state: &'static str,
    },

    /// PON port lookup miss
    #[error("Cannot find PonPort with id {0}")]
    PonNotFound(u32),

    /// NNI port lookup miss
    #[error("Cannot find NniPort with id {0}")]
    NniNotFound(u32),

    /// ONU lookup miss by serial number
    #[error("Cannot find Onu with serial number {0}")]
    OnuSerialNotFound(String),

    /// ONU lookup miss by id
    #[error("Cannot find Onu with id {0} on PonPort {1}")]
    OnuNotFound(u32, u32),

    /// The target entity's mailbox loop is gone
    #[error("Mailbox closed: {0}")]
    MailboxClosed(&'static str),
}

/// Result type for simulator operations
pub type Result<T> = std::result::Result<T, BbsimError>;
