//! Transport shim for the `Openolt` trait.
//!
//! A hand-maintained tower service in the shape tonic emits for generated
//! servers: it routes on the gRPC request path and dispatches each call
//! onto the trait, so the bootstrap can mount any `Openolt` implementation
//! on a listener via `tonic::transport::Server`.

use std::convert::Infallible;

use tonic::codegen::{empty_body, http, Arc, Body, BoxFuture, Context, Poll, Service, StdError};
use tonic::server::NamedService;

use crate::messages::*;
use crate::service::Openolt;

pub struct OpenoltServer<T: Openolt> {
    inner: Arc<T>,
}

impl<T: Openolt> OpenoltServer<T> {
    pub fn new(inner: T) -> Self {
        Self::from_arc(Arc::new(inner))
    }

    pub fn from_arc(inner: Arc<T>) -> Self {
        Self { inner }
    }
}

impl<T: Openolt> Clone for OpenoltServer<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Openolt> NamedService for OpenoltServer<T> {
    const NAME: &'static str = "openolt.Openolt";
}

struct UnaryHandler<T, F>(Arc<T>, F);

impl<T, Req, Res, F> tonic::server::UnaryService<Req> for UnaryHandler<T, F>
where
    T: Openolt,
    Req: prost::Message + Default + Send + 'static,
    Res: prost::Message + Send + 'static,
    F: FnMut(Arc<T>, tonic::Request<Req>) -> BoxFuture<tonic::Response<Res>, tonic::Status>,
{
    type Response = Res;
    type Future = BoxFuture<tonic::Response<Res>, tonic::Status>;

    fn call(&mut self, request: tonic::Request<Req>) -> Self::Future {
        (self.1)(Arc::clone(&self.0), request)
    }
}

struct EnableIndicationSvc<T: Openolt>(Arc<T>);

impl<T: Openolt> tonic::server::ServerStreamingService<Empty> for EnableIndicationSvc<T> {
    type Response = Indication;
    type ResponseStream = T::EnableIndicationStream;
    type Future = BoxFuture<tonic::Response<Self::ResponseStream>, tonic::Status>;

    fn call(&mut self, request: tonic::Request<Empty>) -> Self::Future {
        let inner = Arc::clone(&self.0);
        Box::pin(async move { inner.enable_indication(request).await })
    }
}

impl<T: Openolt> OpenoltServer<T> {
    fn unary<B, Req, Res, F>(
        &self,
        req: http::Request<B>,
        handler: F,
    ) -> BoxFuture<http::Response<tonic::body::BoxBody>, Infallible>
    where
        B: Body + Send + 'static,
        B::Error: Into<StdError> + Send + 'static,
        Req: prost::Message + Default + Send + 'static,
        Res: prost::Message + Send + 'static,
        F: FnMut(Arc<T>, tonic::Request<Req>) -> BoxFuture<tonic::Response<Res>, tonic::Status>
            + Send
            + 'static,
    {
        let inner = Arc::clone(&self.inner);
        Box::pin(async move {
            let method = UnaryHandler(inner, handler);
            let codec = tonic::codec::ProstCodec::default();
            let mut grpc = tonic::server::Grpc::new(codec);
            Ok(grpc.unary(method, req).await)
        })
    }
}

impl<T, B> Service<http::Request<B>> for OpenoltServer<T>
where
    T: Openolt,
    B: Body + Send + 'static,
    B::Error: Into<StdError> + Send + 'static,
{
    type Response = http::Response<tonic::body::BoxBody>;
    type Error = Infallible;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<B>) -> Self::Future {
        macro_rules! unary {
            ($method:ident) => {{
                self.unary(req, |svc: Arc<T>, r| {
                    let fut: BoxFuture<_, tonic::Status> =
                        Box::pin(async move { svc.$method(r).await });
                    fut
                })
            }};
        }

        match req.uri().path() {
            "/openolt.Openolt/EnableIndication" => {
                let inner = Arc::clone(&self.inner);
                Box::pin(async move {
                    let method = EnableIndicationSvc(inner);
                    let codec = tonic::codec::ProstCodec::default();
                    let mut grpc = tonic::server::Grpc::new(codec);
                    Ok(grpc.server_streaming(method, req).await)
                })
            }
            "/openolt.Openolt/ActivateOnu" => unary!(activate_onu),
            "/openolt.Openolt/DeactivateOnu" => unary!(deactivate_onu),
            "/openolt.Openolt/DeleteOnu" => unary!(delete_onu),
            "/openolt.Openolt/DisableOlt" => unary!(disable_olt),
            "/openolt.Openolt/ReenableOlt" => unary!(reenable_olt),
            "/openolt.Openolt/DisablePonIf" => unary!(disable_pon_if),
            "/openolt.Openolt/EnablePonIf" => unary!(enable_pon_if),
            "/openolt.Openolt/GetDeviceInfo" => unary!(get_device_info),
            "/openolt.Openolt/OmciMsgOut" => unary!(omci_msg_out),
            "/openolt.Openolt/FlowAdd" => unary!(flow_add),
            "/openolt.Openolt/FlowRemove" => unary!(flow_remove),
            "/openolt.Openolt/HeartbeatCheck" => unary!(heartbeat_check),
            "/openolt.Openolt/OnuPacketOut" => unary!(onu_packet_out),
            "/openolt.Openolt/UplinkPacketOut" => unary!(uplink_packet_out),
            "/openolt.Openolt/CollectStatistics" => unary!(collect_statistics),
            "/openolt.Openolt/CreateTconts" => unary!(create_tconts),
            "/openolt.Openolt/RemoveTconts" => unary!(remove_tconts),
            "/openolt.Openolt/GetOnuInfo" => unary!(get_onu_info),
            "/openolt.Openolt/GetPonIf" => unary!(get_pon_if),
            "/openolt.Openolt/Reboot" => unary!(reboot),
            _ => Box::pin(async move {
                let mut response = http::Response::new(empty_body());
                response.headers_mut().insert(
                    http::header::CONTENT_TYPE,
                    http::HeaderValue::from_static("application/grpc"),
                );
                response.headers_mut().insert(
                    http::HeaderName::from_static("grpc-status"),
                    http::HeaderValue::from_static("12"),
                );
                Ok(response)
            }),
        }
    }
}
