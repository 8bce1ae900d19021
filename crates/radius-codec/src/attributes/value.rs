use crate::dictionary::{SemanticType, USER_PASSWORD};
use crate::password::{self, CipherError};
use std::fmt;
use std::net::Ipv4Addr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("Expected at most 4 bytes for integer, got {0}")]
    IntegerLength(usize),
    #[error("Expected 4 bytes for IPv4 address, got {0}")]
    Ipv4Length(usize),
    #[error("Character {0:?} cannot be encoded as ISO-8859-1")]
    Unencodable(char),
    #[error("Value of type {found} cannot be stored in a {expected} attribute")]
    TypeMismatch {
        expected: SemanticType,
        found: &'static str,
    },
    #[error("Attributes of type {0} cannot be encoded")]
    Unsupported(SemanticType),
    #[error("Password cipher error: {0}")]
    Cipher(#[from] CipherError),
}

/// Decoded attribute value. The variant is chosen by the attribute's
/// [`SemanticType`], never by inspecting the bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// `string` and `tagged-string`
    Text(String),
    /// `integer` and `tagged-integer`
    Integer(u32),
    /// `binary`, including the recovered User-Password plaintext
    Bytes(Vec<u8>),
    /// `ipaddr`
    Ipv4(Ipv4Addr),
}

impl AttributeValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeValue::Text(_) => "text",
            AttributeValue::Integer(_) => "integer",
            AttributeValue::Bytes(_) => "bytes",
            AttributeValue::Ipv4(_) => "ipv4",
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Text(text) => f.write_str(text),
            AttributeValue::Integer(value) => write!(f, "{}", value),
            AttributeValue::Ipv4(addr) => write!(f, "{}", addr),
            AttributeValue::Bytes(bytes) => write!(f, "0x{}", hex::encode(bytes)),
        }
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<u32> for AttributeValue {
    fn from(value: u32) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<Ipv4Addr> for AttributeValue {
    fn from(value: Ipv4Addr) -> Self {
        AttributeValue::Ipv4(value)
    }
}

impl From<Vec<u8>> for AttributeValue {
    fn from(value: Vec<u8>) -> Self {
        AttributeValue::Bytes(value)
    }
}

impl From<&[u8]> for AttributeValue {
    fn from(value: &[u8]) -> Self {
        AttributeValue::Bytes(value.to_vec())
    }
}

/// Types that can be read back out of an [`AttributeValue`]
pub trait FromAttributeValue: Sized {
    /// Name used in type mismatch errors
    const TYPE_NAME: &'static str;

    fn from_value(value: &AttributeValue) -> Option<Self>;
}

impl FromAttributeValue for String {
    const TYPE_NAME: &'static str = "text";

    fn from_value(value: &AttributeValue) -> Option<Self> {
        match value {
            AttributeValue::Text(text) => Some(text.clone()),
            _ => None,
        }
    }
}

impl FromAttributeValue for u32 {
    const TYPE_NAME: &'static str = "integer";

    fn from_value(value: &AttributeValue) -> Option<Self> {
        match value {
            AttributeValue::Integer(value) => Some(*value),
            _ => None,
        }
    }
}

impl FromAttributeValue for Ipv4Addr {
    const TYPE_NAME: &'static str = "ipv4";

    fn from_value(value: &AttributeValue) -> Option<Self> {
        match value {
            AttributeValue::Ipv4(addr) => Some(*addr),
            _ => None,
        }
    }
}

impl FromAttributeValue for Vec<u8> {
    const TYPE_NAME: &'static str = "bytes";

    fn from_value(value: &AttributeValue) -> Option<Self> {
        match value {
            AttributeValue::Bytes(bytes) => Some(bytes.clone()),
            _ => None,
        }
    }
}

impl FromAttributeValue for AttributeValue {
    const TYPE_NAME: &'static str = "any";

    fn from_value(value: &AttributeValue) -> Option<Self> {
        Some(value.clone())
    }
}

/// Decode raw attribute content according to its semantic type.
///
/// Text is ISO-8859-1: each byte becomes the character with the same code point,
/// so bytes are never rejected as invalid UTF-8. `code` only matters for
/// `binary` attributes, where User-Password (2) is decrypted with `secret` and
/// `authenticator`. Unsupported types produce `Ok(None)`.
pub fn decode_content(
    content: &[u8],
    kind: &SemanticType,
    code: u8,
    authenticator: &[u8; 16],
    secret: &[u8],
) -> Result<Option<AttributeValue>, ContentError> {
    let value = match kind {
        SemanticType::String | SemanticType::TaggedString => {
            AttributeValue::Text(content.iter().map(|&b| char::from(b)).collect())
        }
        SemanticType::Integer | SemanticType::TaggedInteger => {
            if content.len() > 4 {
                return Err(ContentError::IntegerLength(content.len()));
            }
            // Short integers are left-padded with zeros.
            let mut bytes = [0u8; 4];
            bytes[4 - content.len()..].copy_from_slice(content);
            AttributeValue::Integer(u32::from_be_bytes(bytes))
        }
        SemanticType::IpAddr => {
            let octets: [u8; 4] = content
                .try_into()
                .map_err(|_| ContentError::Ipv4Length(content.len()))?;
            AttributeValue::Ipv4(Ipv4Addr::from(octets))
        }
        SemanticType::Binary if code == USER_PASSWORD => {
            AttributeValue::Bytes(password::decrypt(content, secret, authenticator)?)
        }
        SemanticType::Binary => AttributeValue::Bytes(content.to_vec()),
        SemanticType::Unsupported(_) => return Ok(None),
    };
    Ok(Some(value))
}

/// Encode a value for the wire; the inverse of [`decode_content`].
pub fn encode_content(
    value: &AttributeValue,
    kind: &SemanticType,
    code: u8,
    authenticator: &[u8; 16],
    secret: &[u8],
) -> Result<Vec<u8>, ContentError> {
    match (kind, value) {
        (SemanticType::String | SemanticType::TaggedString, AttributeValue::Text(text)) => text
            .chars()
            .map(|c| u8::try_from(c).map_err(|_| ContentError::Unencodable(c)))
            .collect(),
        (SemanticType::Integer | SemanticType::TaggedInteger, AttributeValue::Integer(value)) => {
            Ok(value.to_be_bytes().to_vec())
        }
        (SemanticType::IpAddr, AttributeValue::Ipv4(addr)) => Ok(addr.octets().to_vec()),
        (SemanticType::Binary, AttributeValue::Bytes(bytes)) if code == USER_PASSWORD => {
            Ok(password::encrypt(bytes, secret, authenticator)?)
        }
        (SemanticType::Binary, AttributeValue::Bytes(bytes)) => Ok(bytes.clone()),
        (SemanticType::Unsupported(_), _) => Err(ContentError::Unsupported(kind.clone())),
        (expected, found) => Err(ContentError::TypeMismatch {
            expected: expected.clone(),
            found: found.type_name(),
        }),
    }
}
