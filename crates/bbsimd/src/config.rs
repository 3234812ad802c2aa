//! Simulator configuration.

use clap::Parser;

/// Address the vendor control service listens on.
pub const LISTEN_ADDRESS: &str = "0.0.0.0:50060";

/// Topology parameters for the simulated OLT.
///
/// The topology is fixed at startup: ports and ONUs are never attached or
/// detached afterwards.
#[derive(Parser, Debug, Clone)]
#[command(name = "bbsimd", about = "Broadband access network simulator")]
pub struct Config {
    /// Identifier of the simulated OLT
    #[arg(long, default_value_t = 0)]
    pub olt_id: u32,

    /// Number of NNI (upstream) ports
    #[arg(long, default_value_t = 1)]
    pub nni_ports: u32,

    /// Number of PON (downstream) ports
    #[arg(long, default_value_t = 1)]
    pub pon_ports: u32,

    /// Number of ONUs attached to each PON port
    #[arg(long, default_value_t = 1)]
    pub onus_per_pon: u32,
}
