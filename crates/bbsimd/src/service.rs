//! OpenOLT service adapter.
//!
//! Translates each control RPC into mailbox messages against the device
//! model. Handlers never touch entity state themselves: they resolve the
//! target by id or serial number and enqueue, so all state mutation stays
//! confined to the owning actor. The bring-up call is the one streaming
//! method; its stream is backed by the egress sink and lives until the
//! controller tears the call down.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Request, Response, Status};
use tracing::{debug, info, instrument, warn};

use openolt::*;

use crate::device::OltDevice;
use crate::egress::EgressHandle;
use crate::error::BbsimError;
use crate::fsm::OperState;
use crate::message::Message;

/// Depth of one controller indication stream.
const STREAM_DEPTH: usize = 128;

pub struct OltService {
    olt: Arc<OltDevice>,
    egress: EgressHandle,
}

impl OltService {
    pub fn new(olt: Arc<OltDevice>, egress: EgressHandle) -> Self {
        Self { olt, egress }
    }
}

fn not_found(err: BbsimError) -> Status {
    Status::not_found(err.to_string())
}

fn internal(err: BbsimError) -> Status {
    Status::internal(err.to_string())
}

fn unimplemented(method: &str) -> Status {
    warn!(method, "not implemented");
    Status::unimplemented(format!("{method} not implemented"))
}

#[async_trait]
impl Openolt for OltService {
    type EnableIndicationStream = ReceiverStream<std::result::Result<Indication, Status>>;

    #[instrument(skip(self, _request), fields(olt_id = self.olt.id))]
    async fn enable_indication(
        &self,
        _request: Request<Empty>,
    ) -> Result<Response<Self::EnableIndicationStream>, Status> {
        info!("OLT received EnableIndication call");

        let (sink, stream) = mpsc::channel(STREAM_DEPTH);
        self.egress.attach(sink).await;

        // Bring-up sequencing: OLT first, then every NNI, then every PON
        // with its ONUs announcing themselves on their own mailboxes.
        self.olt
            .enqueue(Message::OltIndication { oper_state: OperState::Up })
            .await
            .map_err(internal)?;

        for nni in &self.olt.nnis {
            self.olt
                .enqueue(Message::NniIndication { id: nni.id, oper_state: OperState::Up })
                .await
                .map_err(internal)?;
        }

        for pon in &self.olt.pons {
            self.olt
                .enqueue(Message::PonIndication { id: pon.id, oper_state: OperState::Up })
                .await
                .map_err(internal)?;

            for onu in &pon.onus {
                onu.enqueue(Message::OnuDiscover).await.map_err(internal)?;
            }
        }

        Ok(Response::new(ReceiverStream::new(stream)))
    }

    #[instrument(skip(self, request))]
    async fn activate_onu(&self, request: Request<Onu>) -> Result<Response<Empty>, Status> {
        let target = request.into_inner();
        let serial = target
            .serial_number
            .ok_or_else(|| Status::invalid_argument("serial number is required"))?;
        info!(serial = %serial, intf_id = target.intf_id, "received ActivateOnu call");

        let pon = self.olt.pon_by_id(target.intf_id).map_err(not_found)?;
        let onu = pon.onu_by_serial(&serial).map_err(not_found)?;

        // The ONU's management-protocol machine must start right away, so
        // activation skips the discovery round-trip.
        onu.enqueue(Message::OnuActivate).await.map_err(internal)?;
        Ok(Response::new(Empty {}))
    }

    async fn deactivate_onu(&self, _request: Request<Onu>) -> Result<Response<Empty>, Status> {
        Err(unimplemented("DeactivateOnu"))
    }

    async fn delete_onu(&self, _request: Request<Onu>) -> Result<Response<Empty>, Status> {
        Err(unimplemented("DeleteOnu"))
    }

    #[instrument(skip(self, _request), fields(olt_id = self.olt.id))]
    async fn disable_olt(&self, _request: Request<Empty>) -> Result<Response<Empty>, Status> {
        info!("received DisableOlt call");
        self.olt
            .enqueue(Message::OltIndication { oper_state: OperState::Down })
            .await
            .map_err(internal)?;
        Ok(Response::new(Empty {}))
    }

    async fn reenable_olt(&self, _request: Request<Empty>) -> Result<Response<Empty>, Status> {
        Err(unimplemented("ReenableOlt"))
    }

    async fn disable_pon_if(
        &self,
        _request: Request<Interface>,
    ) -> Result<Response<Empty>, Status> {
        Err(unimplemented("DisablePonIf"))
    }

    async fn enable_pon_if(&self, _request: Request<Interface>) -> Result<Response<Empty>, Status> {
        Err(unimplemented("EnablePonIf"))
    }

    #[instrument(skip(self, _request), fields(olt_id = self.olt.id))]
    async fn get_device_info(
        &self,
        _request: Request<Empty>,
    ) -> Result<Response<DeviceInfo>, Status> {
        info!("received GetDeviceInfo call");
        Ok(Response::new(DeviceInfo {
            vendor: "BBSim".to_string(),
            model: "asfvolt16".to_string(),
            hardware_version: "emulated".to_string(),
            firmware_version: String::new(),
            technology: "xgspon".to_string(),
            pon_ports: self.olt.pons.len() as u32,
            onu_id_start: 1,
            onu_id_end: 255,
            alloc_id_start: 1024,
            alloc_id_end: 16383,
            gemport_id_start: 1024,
            gemport_id_end: 65535,
            flow_id_start: 1,
            flow_id_end: 16383,
            device_serial_number: format!("BBSIM_OLT_{}", self.olt.id),
        }))
    }

    #[instrument(skip(self, request))]
    async fn omci_msg_out(&self, request: Request<OmciMsg>) -> Result<Response<Empty>, Status> {
        let msg = request.into_inner();
        debug!(intf_id = msg.intf_id, onu_id = msg.onu_id, "received OmciMsgOut call");

        let pon = self.olt.pon_by_id(msg.intf_id).map_err(not_found)?;
        let onu = pon.onu_by_id(msg.onu_id).map_err(not_found)?;

        onu.enqueue(Message::Omci { pkt: msg.pkt })
            .await
            .map_err(internal)?;
        Ok(Response::new(Empty {}))
    }

    async fn flow_add(&self, _request: Request<Flow>) -> Result<Response<Empty>, Status> {
        Err(unimplemented("FlowAdd"))
    }

    async fn flow_remove(&self, _request: Request<Flow>) -> Result<Response<Empty>, Status> {
        Err(unimplemented("FlowRemove"))
    }

    async fn heartbeat_check(
        &self,
        _request: Request<Empty>,
    ) -> Result<Response<Heartbeat>, Status> {
        Err(unimplemented("HeartbeatCheck"))
    }

    async fn onu_packet_out(
        &self,
        _request: Request<OnuPacket>,
    ) -> Result<Response<Empty>, Status> {
        Err(unimplemented("OnuPacketOut"))
    }

    async fn uplink_packet_out(
        &self,
        _request: Request<UplinkPacket>,
    ) -> Result<Response<Empty>, Status> {
        Err(unimplemented("UplinkPacketOut"))
    }

    async fn collect_statistics(
        &self,
        _request: Request<Empty>,
    ) -> Result<Response<Empty>, Status> {
        Err(unimplemented("CollectStatistics"))
    }

    async fn create_tconts(&self, _request: Request<Tconts>) -> Result<Response<Empty>, Status> {
        Err(unimplemented("CreateTconts"))
    }

    async fn remove_tconts(&self, _request: Request<Tconts>) -> Result<Response<Empty>, Status> {
        Err(unimplemented("RemoveTconts"))
    }

    async fn get_onu_info(&self, _request: Request<Onu>) -> Result<Response<OnuIndication>, Status> {
        Err(unimplemented("GetOnuInfo"))
    }

    async fn get_pon_if(
        &self,
        _request: Request<Interface>,
    ) -> Result<Response<IntfIndication>, Status> {
        Err(unimplemented("GetPonIf"))
    }

    async fn reboot(&self, _request: Request<Empty>) -> Result<Response<Empty>, Status> {
        // No teardown: the process exits before any further indication.
        info!("received Reboot call, shutting down");
        std::process::exit(0);
    }
}
