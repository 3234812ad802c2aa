//! Request frame builders.
//!
//! Each builder assembles a managed-entity-specific payload, wraps it in the
//! common header with the caller's transaction id, and returns the frame
//! hex-encoded for the management channel.

use byteorder::{BigEndian, WriteBytesExt};
use tracing::debug;

use crate::error::Result;
use crate::frame::{self, me_class, msg_type};

/// Entity instance used for the GAL Ethernet profile.
const GAL_ETHERNET_EID: u16 = 1;
/// Entity instance used for the GEM port network CTP.
const GEM_EID: u16 = 1;
/// Maximum GEM payload size configured on the GAL Ethernet profile.
const MAX_GEM_PAYLOAD_SIZE: u16 = 48;

/// Attribute mask selecting the first attribute of a Set message.
const FIRST_ATTRIBUTE_MASK: u16 = 0x8000;

fn hex_frame(tid: u16, mt: u8, class: u16, instance: u16, contents: &[u8]) -> Result<String> {
    let pkt = frame::encode(tid, mt, class, instance, contents)?;
    Ok(hex::encode(pkt))
}

/// MIB reset request against the ONU data entity.
pub fn mib_reset_request(tid: u16) -> Result<String> {
    debug!(tid, "building MibResetRequest");
    hex_frame(tid, msg_type::MIB_RESET, me_class::ONU_DATA, 0, &[])
}

/// MIB upload request against the ONU data entity.
pub fn mib_upload_request(tid: u16) -> Result<String> {
    debug!(tid, "building MibUploadRequest");
    hex_frame(tid, msg_type::MIB_UPLOAD, me_class::ONU_DATA, 0, &[])
}

/// MIB upload-next request carrying the command sequence number.
pub fn mib_upload_next_request(tid: u16, seq: u16) -> Result<String> {
    debug!(tid, seq, "building MibUploadNextRequest");
    let mut contents = Vec::with_capacity(2);
    contents.write_u16::<BigEndian>(seq)?;
    hex_frame(tid, msg_type::MIB_UPLOAD_NEXT, me_class::ONU_DATA, 0, &contents)
}

/// Create for the GAL Ethernet profile with the fixed maximum GEM payload.
pub fn gal_ethernet_profile_create(tid: u16) -> Result<String> {
    debug!(tid, "building GalEthernetProfile create");
    let mut contents = Vec::with_capacity(2);
    contents.write_u16::<BigEndian>(MAX_GEM_PAYLOAD_SIZE)?;
    hex_frame(
        tid,
        msg_type::CREATE,
        me_class::GAL_ETHERNET_PROFILE,
        GAL_ETHERNET_EID,
        &contents,
    )
}

/// Set of the administrative state on a UNI.
///
/// Selects the physical PPTP Ethernet UNI or the virtual Ethernet interface
/// point depending on `is_ptp`.
pub fn uni_set_admin_state(tid: u16, uni_id: u16, enabled: bool, is_ptp: bool) -> Result<String> {
    debug!(tid, uni_id, enabled, is_ptp, "building UNI admin-state set");
    let class = if is_ptp {
        me_class::PPTP_ETHERNET_UNI
    } else {
        me_class::VIRTUAL_ETHERNET_INTERFACE_POINT
    };

    let mut contents = Vec::with_capacity(3);
    contents.write_u16::<BigEndian>(FIRST_ATTRIBUTE_MASK)?;
    contents.push(u8::from(enabled));
    hex_frame(tid, msg_type::SET, class, uni_id, &contents)
}

/// Create for a GEM port network CTP with the fixed attribute set.
pub fn gem_port_create(tid: u16) -> Result<String> {
    debug!(tid, "building GemPortNetworkCtp create");
    let mut contents = Vec::with_capacity(16);
    contents.write_u16::<BigEndian>(1)?; // port id
    contents.write_u16::<BigEndian>(1)?; // T-CONT pointer
    contents.push(0); // direction
    contents.write_u16::<BigEndian>(0)?; // traffic management pointer, upstream
    contents.write_u16::<BigEndian>(0)?; // traffic descriptor pointer, upstream
    contents.push(0); // UNI counter
    contents.write_u16::<BigEndian>(0)?; // priority queue pointer, downstream
    contents.push(0); // encryption state
    contents.write_u16::<BigEndian>(0)?; // traffic descriptor pointer, downstream
    contents.push(0); // encryption key ring
    hex_frame(
        tid,
        msg_type::CREATE,
        me_class::GEM_PORT_NETWORK_CTP,
        GEM_EID,
        &contents,
    )
}
