//! Vendor-Specific attribute payload (RFC 2865 Section 5.26)
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                           Vendor-Id                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |  Vendor type  | Vendor length |    Attribute-Specific...
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Only the first sub-attribute of a Vendor-Specific record is read.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VsaError {
    #[error("Vendor-Specific payload too short: {0} bytes (min 6)")]
    TooShort(usize),
    #[error("Invalid vendor attribute length: {0}")]
    InvalidLength(u8),
    #[error("Vendor attribute value truncated: expected {expected}, got {available}")]
    Truncated { expected: usize, available: usize },
    #[error("Vendor attribute value too long: {0} bytes (max 247)")]
    ValueTooLong(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorSpecific {
    pub vendor_id: u32,
    pub vendor_code: u8,
    pub value: Vec<u8>,
}

impl VendorSpecific {
    /// Vendor id (4) + vendor type (1) + vendor length (1)
    pub const HEADER_LENGTH: usize = 6;
    /// Largest inner value that still fits in a 255-byte attribute
    pub const MAX_VALUE_LENGTH: usize = 253 - Self::HEADER_LENGTH;

    pub fn new(vendor_id: u32, vendor_code: u8, value: Vec<u8>) -> Result<Self, VsaError> {
        if value.len() > Self::MAX_VALUE_LENGTH {
            return Err(VsaError::ValueTooLong(value.len()));
        }
        Ok(VendorSpecific {
            vendor_id,
            vendor_code,
            value,
        })
    }

    /// Parse the content of a type-26 attribute
    pub fn parse(content: &[u8]) -> Result<Self, VsaError> {
        if content.len() < Self::HEADER_LENGTH {
            return Err(VsaError::TooShort(content.len()));
        }

        let vendor_id = u32::from_be_bytes([content[0], content[1], content[2], content[3]]);
        let vendor_code = content[4];
        let inner_length = content[5];
        if inner_length < 2 {
            return Err(VsaError::InvalidLength(inner_length));
        }

        let end = 4 + usize::from(inner_length);
        if end > content.len() {
            return Err(VsaError::Truncated {
                expected: usize::from(inner_length) - 2,
                available: content.len() - Self::HEADER_LENGTH,
            });
        }

        Ok(VendorSpecific {
            vendor_id,
            vendor_code,
            value: content[Self::HEADER_LENGTH..end].to_vec(),
        })
    }

    /// Build the content of a type-26 attribute
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(Self::HEADER_LENGTH + self.value.len());
        bytes.extend_from_slice(&self.vendor_id.to_be_bytes());
        bytes.push(self.vendor_code);
        bytes.push((self.value.len() + 2) as u8);
        bytes.extend_from_slice(&self.value);
        bytes
    }
}
