//! Attribute records, values and per-attribute diagnostics

mod attribute;
mod map;
mod value;
mod vsa;

pub use attribute::{Attribute, RecordError};
pub use map::{AccessError, AttributeMap};
pub use value::{AttributeValue, ContentError, FromAttributeValue, decode_content, encode_content};
pub use vsa::{VendorSpecific, VsaError};

use thiserror::Error;

/// Problem with a single attribute found while decoding a packet.
///
/// None of these abort the packet: the attribute is left out of the result and
/// the error is reported in [`crate::DecodedPacket::diagnostics`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttributeError {
    /// The record framing is broken; no further attributes can be read
    #[error("Malformed attribute at offset {offset}: {source}")]
    Malformed {
        offset: usize,
        #[source]
        source: RecordError,
    },
    /// A Vendor-Specific record whose payload cannot be unwrapped
    #[error("Malformed Vendor-Specific attribute at offset {offset}: {source}")]
    MalformedVendorSpecific {
        offset: usize,
        #[source]
        source: VsaError,
    },
    #[error("Attribute {code} not found in dictionary")]
    UnknownAttribute { code: u8 },
    #[error("Unknown vendor attribute {vendor_id}:{vendor_code}")]
    UnknownVendorAttribute { vendor_id: u32, vendor_code: u8 },
    /// The attribute is known but its content could not be decoded
    #[error("Failed to decode attribute {name}: {source}")]
    DecodeFailure {
        name: String,
        #[source]
        source: ContentError,
    },
    #[error("Attribute {name} has type {tag}, which the codec does not decode")]
    UnsupportedType { name: String, tag: String },
}
