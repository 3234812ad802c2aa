//! OMCI management frame codec
//!
//! Builds the request frames an OLT sends to configure managed entities on
//! an ONU, and decodes the response frames coming back. Frames travel over
//! the management channel hex-encoded; builders return the ASCII-hex string,
//! the decoder takes raw bytes.
//!
//! Decoding is deliberately lossy: a frame that is not a recognizable
//! response (acknowledge bit clear, unknown type code, unparsable header)
//! yields `None` so pass-through callers can wait for the next frame.
//! Encode failures, by contrast, are real errors surfaced to the caller.

pub mod builders;
pub mod decode;
pub mod error;
pub mod frame;

pub use builders::{
    gal_ethernet_profile_create, gem_port_create, mib_reset_request, mib_upload_next_request,
    mib_upload_request, uni_set_admin_state,
};
pub use decode::{decode, OmciResponse, ResponseKind};
pub use error::{OmciError, Result};
