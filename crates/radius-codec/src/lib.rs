//! RADIUS Packet Codec
//!
//! This crate turns RADIUS datagrams (RFC 2865, 2866) into packets whose
//! attributes are decoded by name through an attribute dictionary, and turns
//! such packets back into wire bytes.
//!
//! # Features
//!
//! - Dictionary-driven attribute decoding (string, integer, ipaddr, binary)
//! - Vendor-Specific attribute unwrapping
//! - MD5-based User-Password hiding
//! - Response and Accounting-Request authenticators
//! - Per-attribute diagnostics: one bad attribute never discards the packet
//! - 3GPP-User-Location-Info MCC/MNC extraction
//!
//! # Example
//!
//! ```rust
//! use radius_codec::{Code, Packet, RadiusDictionary};
//!
//! let dictionary = RadiusDictionary::standard();
//!
//! // Build an Access-Request
//! let mut request = Packet::new_request(Code::AccessRequest, 1, b"secret");
//! request.add("User-Name", "alice");
//! request.add("User-Password", b"password".to_vec());
//! let bytes = request.encode(&dictionary).unwrap();
//!
//! // Decode it on the other side
//! let decoded = Packet::decode(&bytes, &dictionary, b"secret").unwrap();
//! assert!(decoded.diagnostics.is_empty());
//! let packet = decoded.packet;
//! assert_eq!(packet.get::<String>("User-Name").unwrap().as_deref(), Some("alice"));
//!
//! // Answer it
//! let mut response = packet.create_response(Code::AccessAccept);
//! response.add("Reply-Message", "welcome");
//! let reply = response.encode_response(&dictionary).unwrap();
//! assert!(radius_codec::auth::verify_response_authenticator(
//!     &reply,
//!     &packet.authenticator,
//!     b"secret",
//! ));
//! ```

pub mod attributes;
pub mod auth;
pub mod dictionary;
pub mod location;
pub mod packet;
pub mod password;

pub use attributes::{AccessError, AttributeError, AttributeMap, AttributeValue, FromAttributeValue};
pub use dictionary::{
    AttributeDefinition, Definition, Dictionary, DictionaryError, RadiusDictionary, SemanticType,
    VendorAttributeDefinition,
};
pub use location::{LocationError, LocationType, UserLocationInfo};
pub use packet::{Code, DecodedPacket, Packet, PacketError};
pub use password::CipherError;
