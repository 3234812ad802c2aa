//! OpenOLT service trait.
//!
//! The full method table of the OpenOLT control protocol, shaped the way
//! tonic emits service traits: one async method per RPC, `tonic::Status`
//! for failures, and an associated stream type for the server-streaming
//! `EnableIndication` call.

use async_trait::async_trait;
use tokio_stream::Stream;
use tonic::{Request, Response, Status};

use crate::messages::*;

#[async_trait]
pub trait Openolt: Send + Sync + 'static {
    /// Stream returned by `enable_indication`; lives for as long as the
    /// controller keeps the bring-up call open.
    type EnableIndicationStream: Stream<Item = Result<Indication, Status>> + Send + 'static;

    /// Starts device bring-up and returns the long-lived indication stream.
    async fn enable_indication(
        &self,
        request: Request<Empty>,
    ) -> Result<Response<Self::EnableIndicationStream>, Status>;

    async fn activate_onu(&self, request: Request<Onu>) -> Result<Response<Empty>, Status>;

    async fn deactivate_onu(&self, request: Request<Onu>) -> Result<Response<Empty>, Status>;

    async fn delete_onu(&self, request: Request<Onu>) -> Result<Response<Empty>, Status>;

    async fn disable_olt(&self, request: Request<Empty>) -> Result<Response<Empty>, Status>;

    async fn reenable_olt(&self, request: Request<Empty>) -> Result<Response<Empty>, Status>;

    async fn disable_pon_if(&self, request: Request<Interface>)
        -> Result<Response<Empty>, Status>;

    async fn enable_pon_if(&self, request: Request<Interface>) -> Result<Response<Empty>, Status>;

    async fn get_device_info(
        &self,
        request: Request<Empty>,
    ) -> Result<Response<DeviceInfo>, Status>;

    async fn omci_msg_out(&self, request: Request<OmciMsg>) -> Result<Response<Empty>, Status>;

    async fn flow_add(&self, request: Request<Flow>) -> Result<Response<Empty>, Status>;

    async fn flow_remove(&self, request: Request<Flow>) -> Result<Response<Empty>, Status>;

    async fn heartbeat_check(
        &self,
        request: Request<Empty>,
    ) -> Result<Response<Heartbeat>, Status>;

    async fn onu_packet_out(&self, request: Request<OnuPacket>)
        -> Result<Response<Empty>, Status>;

    async fn uplink_packet_out(
        &self,
        request: Request<UplinkPacket>,
    ) -> Result<Response<Empty>, Status>;

    async fn collect_statistics(&self, request: Request<Empty>)
        -> Result<Response<Empty>, Status>;

    async fn create_tconts(&self, request: Request<Tconts>) -> Result<Response<Empty>, Status>;

    async fn remove_tconts(&self, request: Request<Tconts>) -> Result<Response<Empty>, Status>;

    async fn get_onu_info(&self, request: Request<Onu>) -> Result<Response<OnuIndication>, Status>;

    async fn get_pon_if(
        &self,
        request: Request<Interface>,
    ) -> Result<Response<IntfIndication>, Status>;

    async fn reboot(&self, request: Request<Empty>) -> Result<Response<Empty>, Status>;
}
