//! Transport-level checks: the control endpoint dispatches RPCs onto the
//! service method table over a real gRPC connection.

use std::time::Duration;

use tokio::net::TcpListener;
use tokio::time::timeout;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, Endpoint, Server};
use tonic::Request;

use bbsimd::{Config, EgressHandle, OltDevice, OltService};
use openolt::{indication::Data, DeviceInfo, Empty, Indication, OpenoltServer};

async fn spawn_endpoint() -> String {
    let cfg = Config {
        olt_id: 1,
        nni_ports: 1,
        pon_ports: 1,
        onus_per_pon: 1,
    };
    let egress = EgressHandle::spawn();
    let olt = OltDevice::start(&cfg, egress.clone());
    let service = OltService::new(olt, egress);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(
        Server::builder()
            .add_service(OpenoltServer::new(service))
            .serve_with_incoming(TcpListenerStream::new(listener)),
    );
    format!("http://{addr}")
}

async fn connect(uri: String) -> tonic::client::Grpc<Channel> {
    let channel = Endpoint::from_shared(uri)
        .unwrap()
        .connect()
        .await
        .unwrap();
    let mut grpc = tonic::client::Grpc::new(channel);
    grpc.ready().await.unwrap();
    grpc
}

#[tokio::test]
async fn device_info_is_served_over_the_wire() {
    let mut grpc = connect(spawn_endpoint().await).await;

    let response: tonic::Response<DeviceInfo> = grpc
        .unary(
            Request::new(Empty {}),
            PathAndQuery::from_static("/openolt.Openolt/GetDeviceInfo"),
            tonic::codec::ProstCodec::default(),
        )
        .await
        .unwrap();

    let info = response.into_inner();
    assert_eq!(info.vendor, "BBSim");
    assert_eq!(info.device_serial_number, "BBSIM_OLT_1");
}

#[tokio::test]
async fn bringup_stream_is_served_over_the_wire() {
    let mut grpc = connect(spawn_endpoint().await).await;

    let response: tonic::Response<tonic::Streaming<Indication>> = grpc
        .server_streaming(
            Request::new(Empty {}),
            PathAndQuery::from_static("/openolt.Openolt/EnableIndication"),
            tonic::codec::ProstCodec::default(),
        )
        .await
        .unwrap();
    let mut stream = response.into_inner();

    let first = timeout(Duration::from_secs(5), stream.message())
        .await
        .expect("timed out waiting for indication")
        .expect("indication error")
        .expect("stream ended early");
    match first.data.expect("empty indication") {
        Data::OltInd(ind) => assert_eq!(ind.oper_state, "up"),
        other => panic!("expected OLT indication first, got {other:?}"),
    }
}

#[tokio::test]
async fn stub_method_reports_unimplemented_over_the_wire() {
    let mut grpc = connect(spawn_endpoint().await).await;

    let status = grpc
        .unary::<Empty, Empty, _>(
            Request::new(Empty {}),
            PathAndQuery::from_static("/openolt.Openolt/CollectStatistics"),
            tonic::codec::ProstCodec::default(),
        )
        .await
        .unwrap_err();
    assert_eq!(status.code(), tonic::Code::Unimplemented);
}

#[tokio::test]
async fn unknown_method_reports_unimplemented_over_the_wire() {
    let mut grpc = connect(spawn_endpoint().await).await;

    let status = grpc
        .unary::<Empty, Empty, _>(
            Request::new(Empty {}),
            PathAndQuery::from_static("/openolt.Openolt/NoSuchMethod"),
            tonic::codec::ProstCodec::default(),
        )
        .await
        .unwrap_err();
    assert_eq!(status.code(), tonic::Code::Unimplemented);
}
