//! OMCI baseline frame layout.
//!
//! ```text
//! 0                   1                   2                   3
//! +---------------+---------------+---------------+---------------+
//! |        transaction id         | message type  |   device id   |
//! +---------------+---------------+---------------+---------------+
//! |      managed-entity class     |    managed-entity instance    |
//! +---------------+---------------+---------------+---------------+
//! |              message contents (32 bytes, zero padded)         |
//! +---------------------------------------------------------------+
//! ```
//!
//! The message-type octet carries the acknowledge flag in its high bit; the
//! low seven bits are the type code.

use byteorder::{BigEndian, WriteBytesExt};

use crate::error::{OmciError, Result};

/// Common header length: tid + type + device id + ME class + ME instance.
pub const HEADER_LEN: usize = 8;
/// Fixed contents field length in the baseline message set.
pub const CONTENTS_LEN: usize = 32;
/// Total baseline frame length.
pub const FRAME_LEN: usize = HEADER_LEN + CONTENTS_LEN;

/// Acknowledge flag in the message-type octet.
pub const AK: u8 = 0x80;
/// Mask selecting the type code from the message-type octet.
pub const TYPE_MASK: u8 = 0x7f;

/// Device identifier for the baseline message set.
pub const DEVICE_ID_BASELINE: u8 = 0x0a;

/// Message type codes.
pub mod msg_type {
    pub const CREATE: u8 = 4;
    pub const SET: u8 = 8;
    pub const GET: u8 = 9;
    pub const MIB_UPLOAD: u8 = 13;
    pub const MIB_UPLOAD_NEXT: u8 = 14;
    pub const MIB_RESET: u8 = 15;
}

/// Managed-entity class identifiers.
pub mod me_class {
    pub const ONU_DATA: u16 = 2;
    pub const PPTP_ETHERNET_UNI: u16 = 11;
    pub const GEM_PORT_NETWORK_CTP: u16 = 268;
    pub const GAL_ETHERNET_PROFILE: u16 = 272;
    pub const VIRTUAL_ETHERNET_INTERFACE_POINT: u16 = 329;
}

/// Serializes one baseline frame: common header plus zero-padded contents.
pub fn encode(
    tid: u16,
    msg_type: u8,
    class: u16,
    instance: u16,
    contents: &[u8],
) -> Result<Vec<u8>> {
    if contents.len() > CONTENTS_LEN {
        return Err(OmciError::ContentsTooLong(contents.len(), CONTENTS_LEN));
    }

    let mut buf = Vec::with_capacity(FRAME_LEN);
    buf.write_u16::<BigEndian>(tid)?;
    buf.push(msg_type);
    buf.push(DEVICE_ID_BASELINE);
    buf.write_u16::<BigEndian>(class)?;
    buf.write_u16::<BigEndian>(instance)?;
    buf.extend_from_slice(contents);
    buf.resize(FRAME_LEN, 0);
    Ok(buf)
}
