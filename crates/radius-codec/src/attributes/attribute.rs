use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Attribute data too short: {0} bytes")]
    TooShort(usize),
    #[error("Invalid attribute length: {0}")]
    InvalidLength(u8),
    #[error("Insufficient data for attribute: expected {expected}, got {available}")]
    Truncated { expected: usize, available: usize },
    #[error("Attribute value too long: {0} bytes (max 253)")]
    ValueTooLong(usize),
}

/// One raw attribute record as defined in RFC 2865 Section 5
///
/// ```text
///  0                   1                   2
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |     Type      |    Length     |  Value ...
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// The value is borrowed from the packet buffer while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute<'a> {
    /// Attribute type (1 byte)
    pub attr_type: u8,
    /// Attribute value (0-253 bytes)
    pub value: &'a [u8],
}

impl<'a> Attribute<'a> {
    /// Minimum attribute length (type + length fields = 2 bytes)
    pub const MIN_LENGTH: usize = 2;
    /// Maximum attribute length (255 bytes including type and length)
    pub const MAX_LENGTH: usize = 255;
    /// Maximum value length (253 bytes)
    pub const MAX_VALUE_LENGTH: usize = 253;

    pub fn new(attr_type: u8, value: &'a [u8]) -> Result<Self, RecordError> {
        if value.len() > Self::MAX_VALUE_LENGTH {
            return Err(RecordError::ValueTooLong(value.len()));
        }
        Ok(Attribute { attr_type, value })
    }

    /// Decode the record at the start of `data`
    pub fn decode(data: &'a [u8]) -> Result<Self, RecordError> {
        if data.len() < Self::MIN_LENGTH {
            return Err(RecordError::TooShort(data.len()));
        }

        let attr_type = data[0];
        let length = data[1];
        if usize::from(length) < Self::MIN_LENGTH {
            return Err(RecordError::InvalidLength(length));
        }

        let length = usize::from(length);
        if data.len() < length {
            return Err(RecordError::Truncated {
                expected: length,
                available: data.len(),
            });
        }

        Ok(Attribute {
            attr_type,
            value: &data[Self::MIN_LENGTH..length],
        })
    }

    /// Append the encoded record to `buffer`
    pub fn encode_into(&self, buffer: &mut Vec<u8>) {
        buffer.push(self.attr_type);
        buffer.push(self.encoded_length() as u8);
        buffer.extend_from_slice(self.value);
    }

    /// Get the encoded length of this attribute
    pub fn encoded_length(&self) -> usize {
        Self::MIN_LENGTH + self.value.len()
    }
}
