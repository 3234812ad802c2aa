//! OpenOLT wire messages.
//!
//! Prost message definitions for the indication stream and the control
//! calls. Field numbers follow the upstream `openolt.proto` so encoded
//! frames interoperate with a real OpenOLT adapter.

use std::fmt;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Empty {}

/// An asynchronous event frame pushed to the controller over the
/// bring-up stream.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Indication {
    #[prost(oneof = "indication::Data", tags = "1, 2, 3, 4, 5, 6")]
    pub data: ::core::option::Option<indication::Data>,
}

pub mod indication {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Data {
        #[prost(message, tag = "1")]
        OltInd(super::OltIndication),
        #[prost(message, tag = "2")]
        IntfInd(super::IntfIndication),
        #[prost(message, tag = "3")]
        IntfOperInd(super::IntfOperIndication),
        #[prost(message, tag = "4")]
        OnuDiscInd(super::OnuDiscIndication),
        #[prost(message, tag = "5")]
        OnuInd(super::OnuIndication),
        #[prost(message, tag = "6")]
        OmciInd(super::OmciIndication),
    }
}

/// OLT-level operational state change.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OltIndication {
    #[prost(string, tag = "1")]
    pub oper_state: ::prost::alloc::string::String,
}

/// PON interface discovery frame, sent before the operational-state frame.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct IntfIndication {
    #[prost(uint32, tag = "1")]
    pub intf_id: u32,
    #[prost(string, tag = "2")]
    pub oper_state: ::prost::alloc::string::String,
}

/// Interface operational state, for both NNI and PON ports.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct IntfOperIndication {
    #[prost(string, tag = "1")]
    pub r#type: ::prost::alloc::string::String,
    #[prost(uint32, tag = "2")]
    pub intf_id: u32,
    #[prost(string, tag = "3")]
    pub oper_state: ::prost::alloc::string::String,
}

/// An ONU announcing itself on a PON port.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OnuDiscIndication {
    #[prost(uint32, tag = "1")]
    pub intf_id: u32,
    #[prost(message, optional, tag = "2")]
    pub serial_number: ::core::option::Option<SerialNumber>,
}

/// ONU activation/state report.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OnuIndication {
    #[prost(uint32, tag = "1")]
    pub intf_id: u32,
    #[prost(uint32, tag = "2")]
    pub onu_id: u32,
    #[prost(string, tag = "3")]
    pub oper_state: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub admin_state: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "5")]
    pub serial_number: ::core::option::Option<SerialNumber>,
}

/// OMCI frame travelling from an ONU back to the controller.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OmciIndication {
    #[prost(uint32, tag = "1")]
    pub intf_id: u32,
    #[prost(uint32, tag = "2")]
    pub onu_id: u32,
    #[prost(bytes = "vec", tag = "3")]
    pub pkt: ::prost::alloc::vec::Vec<u8>,
}

/// ONU serial number: a four-byte vendor id plus a vendor-specific suffix.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SerialNumber {
    #[prost(bytes = "vec", tag = "1")]
    pub vendor_id: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub vendor_specific: ::prost::alloc::vec::Vec<u8>,
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            String::from_utf8_lossy(&self.vendor_id),
            hex::encode(&self.vendor_specific)
        )
    }
}

/// Target of the per-ONU control calls.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Onu {
    #[prost(uint32, tag = "1")]
    pub intf_id: u32,
    #[prost(uint32, tag = "2")]
    pub onu_id: u32,
    #[prost(message, optional, tag = "3")]
    pub serial_number: ::core::option::Option<SerialNumber>,
    #[prost(uint32, tag = "4")]
    pub pir: u32,
}

/// OMCI frame travelling from the controller to an ONU.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OmciMsg {
    #[prost(uint32, tag = "1")]
    pub intf_id: u32,
    #[prost(uint32, tag = "2")]
    pub onu_id: u32,
    #[prost(bytes = "vec", tag = "3")]
    pub pkt: ::prost::alloc::vec::Vec<u8>,
}

/// Static capability descriptor returned by GetDeviceInfo.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeviceInfo {
    #[prost(string, tag = "1")]
    pub vendor: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub model: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub hardware_version: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub firmware_version: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub technology: ::prost::alloc::string::String,
    #[prost(uint32, tag = "6")]
    pub pon_ports: u32,
    #[prost(uint32, tag = "7")]
    pub onu_id_start: u32,
    #[prost(uint32, tag = "8")]
    pub onu_id_end: u32,
    #[prost(uint32, tag = "9")]
    pub alloc_id_start: u32,
    #[prost(uint32, tag = "10")]
    pub alloc_id_end: u32,
    #[prost(uint32, tag = "11")]
    pub gemport_id_start: u32,
    #[prost(uint32, tag = "12")]
    pub gemport_id_end: u32,
    #[prost(uint32, tag = "13")]
    pub flow_id_start: u32,
    #[prost(uint32, tag = "14")]
    pub flow_id_end: u32,
    #[prost(string, tag = "15")]
    pub device_serial_number: ::prost::alloc::string::String,
}

/// PON interface reference for the per-port administrative calls.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Interface {
    #[prost(uint32, tag = "1")]
    pub intf_id: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Heartbeat {
    #[prost(uint32, tag = "1")]
    pub heartbeat_signature: u32,
}

/// Flow table entry (administration calls only; not processed by the core).
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Flow {
    #[prost(int32, tag = "1")]
    pub access_intf_id: i32,
    #[prost(int32, tag = "2")]
    pub onu_id: i32,
    #[prost(uint32, tag = "3")]
    pub flow_id: u32,
    #[prost(string, tag = "4")]
    pub flow_type: ::prost::alloc::string::String,
    #[prost(int32, tag = "5")]
    pub alloc_id: i32,
    #[prost(int32, tag = "6")]
    pub network_intf_id: i32,
    #[prost(int32, tag = "7")]
    pub gemport_id: i32,
    #[prost(int32, tag = "8")]
    pub priority: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OnuPacket {
    #[prost(uint32, tag = "1")]
    pub intf_id: u32,
    #[prost(uint32, tag = "2")]
    pub onu_id: u32,
    #[prost(bytes = "vec", tag = "3")]
    pub pkt: ::prost::alloc::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UplinkPacket {
    #[prost(uint32, tag = "1")]
    pub intf_id: u32,
    #[prost(bytes = "vec", tag = "2")]
    pub pkt: ::prost::alloc::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Tconts {
    #[prost(uint32, tag = "1")]
    pub intf_id: u32,
    #[prost(uint32, tag = "2")]
    pub onu_id: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn indication_roundtrip() {
        let ind = Indication {
            data: Some(indication::Data::OltInd(OltIndication {
                oper_state: "up".to_string(),
            })),
        };

        let bytes = ind.encode_to_vec();
        let decoded = Indication::decode(bytes.as_slice()).unwrap();
        assert_eq!(ind, decoded);
    }

    #[test]
    fn serial_number_display() {
        let sn = SerialNumber {
            vendor_id: b"BBSM".to_vec(),
            vendor_specific: vec![0x00, 0x00, 0x01, 0x02],
        };
        assert_eq!(sn.to_string(), "BBSM00000102");
    }

    #[test]
    fn intf_oper_indication_fields() {
        let ind = IntfOperIndication {
            r#type: "pon".to_string(),
            intf_id: 3,
            oper_state: "up".to_string(),
        };
        let decoded = IntfOperIndication::decode(ind.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded.r#type, "pon");
        assert_eq!(decoded.intf_id, 3);
    }
}
