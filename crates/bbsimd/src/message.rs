//! Mailbox messages.
//!
//! Each message is delivered to exactly one mailbox: OLT/NNI/PON
//! indications to the OLT's, the rest to the owning ONU's.

use crate::fsm::OperState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Drive the OLT lifecycle/operational machines and emit an OLT
    /// indication.
    OltIndication { oper_state: OperState },

    /// Bring an NNI port up and emit its operational-state frame.
    NniIndication { id: u32, oper_state: OperState },

    /// Bring a PON port up and emit its discovery and operational-state
    /// frames.
    PonIndication { id: u32, oper_state: OperState },

    /// Announce the ONU on its PON port.
    OnuDiscover,

    /// Activate the ONU, skipping the discovery round-trip.
    OnuActivate,

    /// Raw OMCI frame forwarded from the controller.
    Omci { pkt: Vec<u8> },
}
