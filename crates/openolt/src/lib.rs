//! OpenOLT vendor control protocol surface
//!
//! Wire messages for the OpenOLT management protocol (hand-maintained prost
//! definitions, byte-compatible with the upstream `openolt.proto` subset the
//! simulator speaks), the `Openolt` service trait the simulator implements,
//! and the `OpenoltServer` shim that mounts a trait implementation on a
//! `tonic::transport::Server`.

pub mod messages;
pub mod server;
pub mod service;

pub use messages::*;
pub use server::OpenoltServer;
pub use service::Openolt;
