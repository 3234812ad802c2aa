//! OLT mailbox actor.
//!
//! Owns every state machine of the OLT scope: the lifecycle and
//! operational machines of the device itself plus the operational machine
//! of each NNI and PON port. Messages are handled strictly in arrival
//! order; each handled message drives the machines and emits the matching
//! indication frames through the shared egress.

use std::collections::HashMap;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use openolt::{
    indication::Data, Indication, IntfIndication, IntfOperIndication, OltIndication,
};

use crate::egress::EgressHandle;
use crate::fsm::{
    olt_lifecycle_machine, oper_state_machine, OltLifecycleFsm, OperEvent, OperFsm, OperState,
};
use crate::device::{NniPort, PonPort};
use crate::message::Message;

pub struct OltActor {
    olt_id: u32,
    lifecycle: OltLifecycleFsm,
    oper: OperFsm,
    nnis: HashMap<u32, OperFsm>,
    pons: HashMap<u32, OperFsm>,
    mailbox: mpsc::Receiver<Message>,
    egress: EgressHandle,
}

fn event_for(oper_state: OperState) -> OperEvent {
    match oper_state {
        OperState::Up => OperEvent::Enable,
        OperState::Down => OperEvent::Disable,
    }
}

impl OltActor {
    pub fn new(
        olt_id: u32,
        nni_ids: &[u32],
        pon_ids: &[u32],
        mailbox: mpsc::Receiver<Message>,
        egress: EgressHandle,
    ) -> Self {
        let nnis = nni_ids
            .iter()
            .map(|id| (*id, oper_state_machine(format!("nni-{id}"))))
            .collect();
        let pons = pon_ids
            .iter()
            .map(|id| (*id, oper_state_machine(format!("pon-{id}"))))
            .collect();
        Self {
            olt_id,
            lifecycle: olt_lifecycle_machine(format!("olt-{olt_id}")),
            oper: oper_state_machine(format!("olt-{olt_id}-oper")),
            nnis,
            pons,
            mailbox,
            egress,
        }
    }

    pub async fn run(mut self) {
        info!(olt_id = self.olt_id, "OLT mailbox loop started");
        while let Some(message) = self.mailbox.recv().await {
            debug!(olt_id = self.olt_id, ?message, "OLT received message");
            match message {
                Message::OltIndication { oper_state } => {
                    self.handle_olt_indication(oper_state).await
                }
                Message::NniIndication { id, oper_state } => {
                    self.handle_nni_indication(id, oper_state).await
                }
                Message::PonIndication { id, oper_state } => {
                    self.handle_pon_indication(id, oper_state).await
                }
                other => {
                    warn!(olt_id = self.olt_id, ?other, "unexpected message in OLT mailbox")
                }
            }
        }
        debug!(olt_id = self.olt_id, "OLT mailbox loop stopped");
    }

    async fn handle_olt_indication(&mut self, oper_state: OperState) {
        let event = event_for(oper_state);
        if let Err(e) = self.lifecycle.fire(event) {
            warn!(error = %e, "OLT lifecycle transition rejected");
        }
        if let Err(e) = self.oper.fire(event) {
            warn!(error = %e, "OLT operational transition rejected");
        }

        self.egress
            .emit(Indication {
                data: Some(Data::OltInd(OltIndication {
                    oper_state: self.oper.label().to_string(),
                })),
            })
            .await;
        debug!(oper_state = self.oper.label(), "sent OLT indication");
    }

    async fn handle_nni_indication(&mut self, id: u32, oper_state: OperState) {
        let Some(fsm) = self.nnis.get_mut(&id) else {
            warn!(id, "NNI indication for unknown port");
            return;
        };
        if let Err(e) = fsm.fire(event_for(oper_state)) {
            warn!(error = %e, "NNI transition rejected");
        }

        self.egress
            .emit(Indication {
                data: Some(Data::IntfOperInd(IntfOperIndication {
                    r#type: NniPort::TYPE.to_string(),
                    intf_id: id,
                    oper_state: fsm.label().to_string(),
                })),
            })
            .await;
        debug!(intf_id = id, oper_state = fsm.label(), "sent NNI indication");
    }

    async fn handle_pon_indication(&mut self, id: u32, oper_state: OperState) {
        let Some(fsm) = self.pons.get_mut(&id) else {
            warn!(id, "PON indication for unknown port");
            return;
        };
        if let Err(e) = fsm.fire(event_for(oper_state)) {
            warn!(error = %e, "PON transition rejected");
        }

        // Discovery frame first, operational-state frame second.
        self.egress
            .emit(Indication {
                data: Some(Data::IntfInd(IntfIndication {
                    intf_id: id,
                    oper_state: fsm.label().to_string(),
                })),
            })
            .await;
        self.egress
            .emit(Indication {
                data: Some(Data::IntfOperInd(IntfOperIndication {
                    r#type: PonPort::TYPE.to_string(),
                    intf_id: id,
                    oper_state: fsm.label().to_string(),
                })),
            })
            .await;
        debug!(intf_id = id, oper_state = fsm.label(), "sent PON indication pair");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::egress::EgressHandle;
    use tokio::sync::mpsc;

    async fn actor_harness(
        nni_ids: &[u32],
        pon_ids: &[u32],
    ) -> (
        mpsc::Sender<Message>,
        mpsc::Receiver<std::result::Result<Indication, tonic::Status>>,
    ) {
        let egress = EgressHandle::spawn();
        let (sink, stream) = mpsc::channel(32);
        egress.attach(sink).await;
        let (tx, rx) = mpsc::channel(32);
        tokio::spawn(OltActor::new(0, nni_ids, pon_ids, rx, egress).run());
        (tx, stream)
    }

    #[tokio::test]
    async fn olt_indication_drives_machines_and_emits_one_frame() {
        let (tx, mut stream) = actor_harness(&[], &[]).await;
        tx.send(Message::OltIndication { oper_state: OperState::Up })
            .await
            .unwrap();

        let frame = stream.recv().await.unwrap().unwrap();
        match frame.data.unwrap() {
            Data::OltInd(ind) => assert_eq!(ind.oper_state, "up"),
            other => panic!("unexpected frame: {other:?}"),
        }
    }

    #[tokio::test]
    async fn pon_indication_emits_discovery_then_oper() {
        let (tx, mut stream) = actor_harness(&[], &[4]).await;
        tx.send(Message::PonIndication { id: 4, oper_state: OperState::Up })
            .await
            .unwrap();

        match stream.recv().await.unwrap().unwrap().data.unwrap() {
            Data::IntfInd(ind) => {
                assert_eq!(ind.intf_id, 4);
                assert_eq!(ind.oper_state, "up");
            }
            other => panic!("unexpected frame: {other:?}"),
        }
        match stream.recv().await.unwrap().unwrap().data.unwrap() {
            Data::IntfOperInd(ind) => {
                assert_eq!(ind.r#type, "pon");
                assert_eq!(ind.intf_id, 4);
                assert_eq!(ind.oper_state, "up");
            }
            other => panic!("unexpected frame: {other:?}"),
        }
    }

    #[tokio::test]
    async fn nni_indication_emits_oper_frame() {
        let (tx, mut stream) = actor_harness(&[0], &[]).await;
        tx.send(Message::NniIndication { id: 0, oper_state: OperState::Up })
            .await
            .unwrap();

        match stream.recv().await.unwrap().unwrap().data.unwrap() {
            Data::IntfOperInd(ind) => {
                assert_eq!(ind.r#type, "nni");
                assert_eq!(ind.intf_id, 0);
                assert_eq!(ind.oper_state, "up");
            }
            other => panic!("unexpected frame: {other:?}"),
        }
    }

    #[tokio::test]
    async fn nni_down_indication_reports_down() {
        let (tx, mut stream) = actor_harness(&[0], &[]).await;
        tx.send(Message::NniIndication { id: 0, oper_state: OperState::Up })
            .await
            .unwrap();
        tx.send(Message::NniIndication { id: 0, oper_state: OperState::Down })
            .await
            .unwrap();

        stream.recv().await.unwrap().unwrap();
        match stream.recv().await.unwrap().unwrap().data.unwrap() {
            Data::IntfOperInd(ind) => {
                assert_eq!(ind.r#type, "nni");
                assert_eq!(ind.oper_state, "down");
            }
            other => panic!("unexpected frame: {other:?}"),
        }
    }

    #[tokio::test]
    async fn pon_down_indication_reports_down_in_both_frames() {
        let (tx, mut stream) = actor_harness(&[], &[2]).await;
        tx.send(Message::PonIndication { id: 2, oper_state: OperState::Up })
            .await
            .unwrap();
        tx.send(Message::PonIndication { id: 2, oper_state: OperState::Down })
            .await
            .unwrap();

        stream.recv().await.unwrap().unwrap();
        stream.recv().await.unwrap().unwrap();
        match stream.recv().await.unwrap().unwrap().data.unwrap() {
            Data::IntfInd(ind) => assert_eq!(ind.oper_state, "down"),
            other => panic!("unexpected frame: {other:?}"),
        }
        match stream.recv().await.unwrap().unwrap().data.unwrap() {
            Data::IntfOperInd(ind) => {
                assert_eq!(ind.r#type, "pon");
                assert_eq!(ind.intf_id, 2);
                assert_eq!(ind.oper_state, "down");
            }
            other => panic!("unexpected frame: {other:?}"),
        }
    }

    #[tokio::test]
    async fn down_indication_disables_the_olt() {
        let (tx, mut stream) = actor_harness(&[], &[]).await;
        tx.send(Message::OltIndication { oper_state: OperState::Up })
            .await
            .unwrap();
        tx.send(Message::OltIndication { oper_state: OperState::Down })
            .await
            .unwrap();

        stream.recv().await.unwrap().unwrap();
        match stream.recv().await.unwrap().unwrap().data.unwrap() {
            Data::OltInd(ind) => assert_eq!(ind.oper_state, "down"),
            other => panic!("unexpected frame: {other:?}"),
        }
    }
}
