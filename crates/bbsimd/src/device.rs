//! Device model: the OLT, its NNI/PON ports, and the attached ONUs.
//!
//! Shape is immutable after construction. The records here carry identity
//! and mailbox senders only; the state machines live inside the actor
//! tasks, so RPC handlers can run lookups from any task without touching
//! entity state.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use openolt::SerialNumber;

use crate::config::Config;
use crate::egress::EgressHandle;
use crate::error::{BbsimError, Result};
use crate::message::Message;
use crate::olt_actor::OltActor;
use crate::onu_actor::OnuActor;

const MAILBOX_DEPTH: usize = 32;

/// Vendor prefix of every simulated ONU serial number.
pub const SERIAL_VENDOR_ID: &[u8; 4] = b"BBSM";

/// Builds the globally unique serial number for one ONU.
pub fn serial_number(olt_id: u32, pon_id: u32, onu_id: u32) -> SerialNumber {
    SerialNumber {
        vendor_id: SERIAL_VENDOR_ID.to_vec(),
        vendor_specific: vec![0, olt_id as u8, pon_id as u8, onu_id as u8],
    }
}

/// The simulated OLT and its containment tree.
pub struct OltDevice {
    pub id: u32,
    pub nnis: Vec<NniPort>,
    pub pons: Vec<PonPort>,
    mailbox: mpsc::Sender<Message>,
}

/// An upstream network-facing port.
pub struct NniPort {
    pub id: u32,
}

impl NniPort {
    pub const TYPE: &'static str = "nni";
}

/// A downstream port with its attached ONUs.
pub struct PonPort {
    pub id: u32,
    pub capacity: usize,
    pub onus: Vec<Onu>,
}

impl PonPort {
    pub const TYPE: &'static str = "pon";

    pub fn onu_by_id(&self, onu_id: u32) -> Result<&Onu> {
        self.onus
            .iter()
            .find(|onu| onu.id == onu_id)
            .ok_or(BbsimError::OnuNotFound(onu_id, self.id))
    }

    pub fn onu_by_serial(&self, serial: &SerialNumber) -> Result<&Onu> {
        self.onus
            .iter()
            .find(|onu| onu.serial == *serial)
            .ok_or_else(|| BbsimError::OnuSerialNotFound(serial.to_string()))
    }
}

/// A subscriber-side unit attached to a PON port.
///
/// `olt_id` and `pon_id` are lookup back-references; ownership stays with
/// the containment tree.
pub struct Onu {
    pub id: u32,
    pub pon_id: u32,
    pub olt_id: u32,
    pub serial: SerialNumber,
    mailbox: mpsc::Sender<Message>,
}

impl Onu {
    /// Queues a message on this ONU's mailbox.
    pub async fn enqueue(&self, msg: Message) -> Result<()> {
        self.mailbox
            .send(msg)
            .await
            .map_err(|_| BbsimError::MailboxClosed("onu"))
    }
}

impl OltDevice {
    /// Builds the topology and spawns one mailbox actor per OLT and ONU.
    pub fn start(cfg: &Config, egress: EgressHandle) -> Arc<Self> {
        debug!(
            olt_id = cfg.olt_id,
            nni = cfg.nni_ports,
            pon = cfg.pon_ports,
            onus_per_pon = cfg.onus_per_pon,
            "creating OLT"
        );

        let nnis: Vec<NniPort> = (0..cfg.nni_ports).map(|id| NniPort { id }).collect();

        let mut pons = Vec::with_capacity(cfg.pon_ports as usize);
        for pon_id in 0..cfg.pon_ports {
            let mut onus = Vec::with_capacity(cfg.onus_per_pon as usize);
            for slot in 0..cfg.onus_per_pon {
                let onu_id = slot + 1;
                let serial = serial_number(cfg.olt_id, pon_id, onu_id);
                let (tx, rx) = mpsc::channel(MAILBOX_DEPTH);
                tokio::spawn(
                    OnuActor::new(pon_id, onu_id, serial.clone(), rx, egress.clone()).run(),
                );
                onus.push(Onu {
                    id: onu_id,
                    pon_id,
                    olt_id: cfg.olt_id,
                    serial,
                    mailbox: tx,
                });
            }
            pons.push(PonPort {
                id: pon_id,
                capacity: cfg.onus_per_pon as usize,
                onus,
            });
        }

        let (olt_tx, olt_rx) = mpsc::channel(MAILBOX_DEPTH);
        let nni_ids: Vec<u32> = nnis.iter().map(|n| n.id).collect();
        let pon_ids: Vec<u32> = pons.iter().map(|p| p.id).collect();
        tokio::spawn(OltActor::new(cfg.olt_id, &nni_ids, &pon_ids, olt_rx, egress).run());

        Arc::new(Self {
            id: cfg.olt_id,
            nnis,
            pons,
            mailbox: olt_tx,
        })
    }

    /// Queues a message on the OLT's mailbox.
    pub async fn enqueue(&self, msg: Message) -> Result<()> {
        self.mailbox
            .send(msg)
            .await
            .map_err(|_| BbsimError::MailboxClosed("olt"))
    }

    pub fn pon_by_id(&self, id: u32) -> Result<&PonPort> {
        self.pons
            .iter()
            .find(|pon| pon.id == id)
            .ok_or(BbsimError::PonNotFound(id))
    }

    pub fn nni_by_id(&self, id: u32) -> Result<&NniPort> {
        self.nnis
            .iter()
            .find(|nni| nni.id == id)
            .ok_or(BbsimError::NniNotFound(id))
    }

    /// Finds an ONU by serial number, scanning every PON port.
    pub fn onu_by_serial(&self, serial: &SerialNumber) -> Result<&Onu> {
        self.pons
            .iter()
            .flat_map(|pon| pon.onus.iter())
            .find(|onu| onu.serial == *serial)
            .ok_or_else(|| BbsimError::OnuSerialNotFound(serial.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn config(nni: u32, pon: u32, onus: u32) -> Config {
        Config {
            olt_id: 1,
            nni_ports: nni,
            pon_ports: pon,
            onus_per_pon: onus,
        }
    }

    #[tokio::test]
    async fn topology_matches_configuration() {
        let olt = OltDevice::start(&config(2, 3, 4), EgressHandle::spawn());
        assert_eq!(olt.nnis.len(), 2);
        assert_eq!(olt.pons.len(), 3);
        for pon in &olt.pons {
            assert_eq!(pon.onus.len(), 4);
            assert_eq!(pon.capacity, 4);
        }
    }

    #[tokio::test]
    async fn serial_numbers_are_globally_unique() {
        let olt = OltDevice::start(&config(1, 4, 8), EgressHandle::spawn());
        let serials: HashSet<String> = olt
            .pons
            .iter()
            .flat_map(|pon| pon.onus.iter())
            .map(|onu| onu.serial.to_string())
            .collect();
        assert_eq!(serials.len(), 4 * 8);
        assert!(serials.iter().all(|s| s.starts_with("BBSM")));
    }

    #[tokio::test]
    async fn lookups_hit_and_miss() {
        let olt = OltDevice::start(&config(1, 2, 2), EgressHandle::spawn());

        assert_eq!(olt.pon_by_id(1).unwrap().id, 1);
        assert!(matches!(olt.pon_by_id(9), Err(BbsimError::PonNotFound(9))));
        assert!(matches!(olt.nni_by_id(5), Err(BbsimError::NniNotFound(5))));

        let pon = olt.pon_by_id(0).unwrap();
        assert_eq!(pon.onu_by_id(2).unwrap().id, 2);
        assert!(matches!(
            pon.onu_by_id(3),
            Err(BbsimError::OnuNotFound(3, 0))
        ));

        let known = serial_number(1, 1, 2);
        assert_eq!(olt.onu_by_serial(&known).unwrap().pon_id, 1);
        let unknown = serial_number(7, 7, 7);
        assert!(olt.onu_by_serial(&unknown).is_err());
    }

    #[test]
    fn serial_number_encodes_topology_position() {
        let sn = serial_number(1, 2, 3);
        assert_eq!(sn.vendor_id, b"BBSM");
        assert_eq!(sn.vendor_specific, vec![0, 1, 2, 3]);
        assert_eq!(sn.to_string(), "BBSM00010203");
    }
}
