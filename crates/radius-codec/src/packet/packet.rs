use super::Code;
use crate::attributes::{
    AccessError, Attribute, AttributeError, AttributeMap, AttributeValue, ContentError,
    FromAttributeValue, RecordError, VendorSpecific, VsaError, decode_content, encode_content,
};
use crate::auth;
use crate::dictionary::{Definition, Dictionary, SemanticType, VENDOR_SPECIFIC};
use thiserror::Error;
use tracing::{debug, error, warn};

#[derive(Error, Debug)]
pub enum PacketError {
    #[error("Packet too short: {0} bytes (min 20)")]
    TooShort(usize),
    #[error("Packet length does not match, expected: {declared}, actual: {actual}")]
    MalformedPacket { declared: usize, actual: usize },
    #[error("Packet too large: {0} bytes")]
    PacketTooLarge(usize),
    #[error("Invalid packet code: {0}")]
    InvalidCode(u8),
    #[error("Attribute {0} not found in dictionary")]
    UnknownAttributeName(String),
    #[error("Cannot encode attribute {name}: {source}")]
    Attribute {
        name: String,
        #[source]
        source: RecordError,
    },
    #[error("Cannot encode vendor attribute {name}: {source}")]
    VendorSpecific {
        name: String,
        #[source]
        source: VsaError,
    },
    #[error("Cannot encode value of {name}: {source}")]
    Content {
        name: String,
        #[source]
        source: ContentError,
    },
}

/// RADIUS Packet structure as defined in RFC 2865 Section 3
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |     Code      |  Identifier   |            Length             |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// |                         Authenticator                         |
/// |                                                               |
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |  Attributes ...
/// +-+-+-+-+-+-+-+-+-+-+-+-+-
/// ```
///
/// Attributes are held by name, already decoded through a [`Dictionary`]. The
/// shared secret travels with the packet so that User-Password can be hidden
/// again when the packet is encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// Packet type (1 byte)
    pub code: Code,
    /// Packet identifier for matching requests/responses (1 byte)
    pub identifier: u8,
    /// Request Authenticator (16 bytes); responses carry the request's value
    pub authenticator: [u8; 16],
    /// Decoded attributes by name
    pub attributes: AttributeMap,
    /// Shared secret of the client this packet belongs to
    pub secret: Vec<u8>,
}

/// Output of [`Packet::decode`]: the packet plus every attribute that was left out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPacket {
    pub packet: Packet,
    pub diagnostics: Vec<AttributeError>,
}

impl DecodedPacket {
    /// True when every attribute in the datagram made it into the packet
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl Packet {
    /// Minimum RADIUS packet size (20 bytes: 1 code + 1 id + 2 length + 16 authenticator)
    pub const MIN_PACKET_SIZE: usize = 20;
    /// Maximum RADIUS packet size (4096 bytes as per RFC 2865)
    pub const MAX_PACKET_SIZE: usize = 4096;

    pub fn new(code: Code, identifier: u8, authenticator: [u8; 16], secret: impl Into<Vec<u8>>) -> Self {
        Packet {
            code,
            identifier,
            authenticator,
            attributes: AttributeMap::new(),
            secret: secret.into(),
        }
    }

    /// New request with a random Request Authenticator
    pub fn new_request(code: Code, identifier: u8, secret: impl Into<Vec<u8>>) -> Self {
        Self::new(
            code,
            identifier,
            auth::generate_request_authenticator(),
            secret,
        )
    }

    /// Start a response to this packet.
    ///
    /// Identifier, authenticator and secret are copied so the response can be
    /// matched and signed without threading them through the caller.
    pub fn create_response(&self, code: Code) -> Packet {
        Packet {
            code,
            identifier: self.identifier,
            authenticator: self.authenticator,
            attributes: AttributeMap::new(),
            secret: self.secret.clone(),
        }
    }

    /// Append a value under `name`
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        self.attributes.add(name, value);
    }

    /// Single value under `name`; see [`AttributeMap::get`]
    pub fn get<T: FromAttributeValue>(&self, name: &str) -> Result<Option<T>, AccessError> {
        self.attributes.get(name)
    }

    /// Every value under `name`; see [`AttributeMap::get_all`]
    pub fn get_all<T: FromAttributeValue>(&self, name: &str) -> Result<Vec<T>, AccessError> {
        self.attributes.get_all(name)
    }

    /// Decode a datagram.
    ///
    /// Only header problems fail the call. A broken, unknown or undecodable
    /// attribute is skipped and reported in [`DecodedPacket::diagnostics`]; when the
    /// record framing itself is broken the remaining bytes are skipped as well.
    pub fn decode<D: Dictionary + ?Sized>(
        data: &[u8],
        dictionary: &D,
        secret: &[u8],
    ) -> Result<DecodedPacket, PacketError> {
        if data.len() < 4 {
            return Err(PacketError::TooShort(data.len()));
        }

        // The length field is checked before the minimum size, so a short buffer
        // claiming a different length is still reported as malformed.
        let declared = usize::from(u16::from_be_bytes([data[2], data[3]]));
        if declared != data.len() {
            error!(
                declared = declared,
                actual = data.len(),
                "Packet length does not match"
            );
            return Err(PacketError::MalformedPacket {
                declared,
                actual: data.len(),
            });
        }
        if declared < Self::MIN_PACKET_SIZE {
            return Err(PacketError::TooShort(declared));
        }
        if declared > Self::MAX_PACKET_SIZE {
            return Err(PacketError::PacketTooLarge(declared));
        }

        let code = Code::from_u8(data[0]).ok_or(PacketError::InvalidCode(data[0]))?;
        let mut authenticator = [0u8; 16];
        authenticator.copy_from_slice(&data[4..Self::MIN_PACKET_SIZE]);

        let mut packet = Packet::new(code, data[1], authenticator, secret);
        let mut diagnostics = Vec::new();

        let mut offset = Self::MIN_PACKET_SIZE;
        while offset < data.len() {
            let record = match Attribute::decode(&data[offset..]) {
                Ok(record) => record,
                Err(source) => {
                    warn!(
                        request_id = packet.identifier,
                        offset = offset,
                        error = %source,
                        "Malformed attribute, ignoring rest of packet"
                    );
                    diagnostics.push(AttributeError::Malformed { offset, source });
                    break;
                }
            };

            if let Err(e) = packet.decode_attribute(&record, offset, dictionary) {
                log_attribute_error(packet.identifier, &e);
                diagnostics.push(e);
            }
            offset += record.encoded_length();
        }

        debug!(
            packet_type = ?packet.code,
            request_id = packet.identifier,
            attributes = packet.attributes.len(),
            skipped = diagnostics.len(),
            "Decoded RADIUS packet"
        );

        Ok(DecodedPacket {
            packet,
            diagnostics,
        })
    }

    fn decode_attribute<D: Dictionary + ?Sized>(
        &mut self,
        record: &Attribute<'_>,
        offset: usize,
        dictionary: &D,
    ) -> Result<(), AttributeError> {
        if record.attr_type == VENDOR_SPECIFIC {
            let vsa = VendorSpecific::parse(record.value)
                .map_err(|source| AttributeError::MalformedVendorSpecific { offset, source })?;
            let def = dictionary
                .lookup_vendor(vsa.vendor_id, vsa.vendor_code)
                .ok_or(AttributeError::UnknownVendorAttribute {
                    vendor_id: vsa.vendor_id,
                    vendor_code: vsa.vendor_code,
                })?;
            // The outer type code is passed on, so vendor attributes never reach
            // the User-Password cipher.
            self.store(&def.name, &def.kind, record.attr_type, &vsa.value)
        } else {
            let def = dictionary
                .lookup_standard(record.attr_type)
                .ok_or(AttributeError::UnknownAttribute {
                    code: record.attr_type,
                })?;
            self.store(&def.name, &def.kind, record.attr_type, record.value)
        }
    }

    fn store(
        &mut self,
        name: &str,
        kind: &SemanticType,
        code: u8,
        content: &[u8],
    ) -> Result<(), AttributeError> {
        let value = decode_content(content, kind, code, &self.authenticator, &self.secret)
            .map_err(|source| AttributeError::DecodeFailure {
                name: name.to_string(),
                source,
            })?
            .ok_or_else(|| AttributeError::UnsupportedType {
                name: name.to_string(),
                tag: kind.to_string(),
            })?;
        self.attributes.add(name, value);
        Ok(())
    }

    /// Encode packet to bytes.
    ///
    /// The stored authenticator is written as is; use [`Packet::encode_response`]
    /// or [`Packet::encode_accounting_request`] when it has to be computed.
    pub fn encode<D: Dictionary + ?Sized>(&self, dictionary: &D) -> Result<Vec<u8>, PacketError> {
        let mut buffer = Vec::with_capacity(Self::MIN_PACKET_SIZE + 16 * self.attributes.len());
        buffer.push(self.code.as_u8());
        buffer.push(self.identifier);
        // Length is filled in once the attributes are written
        buffer.extend_from_slice(&[0, 0]);
        buffer.extend_from_slice(&self.authenticator);

        for (name, values) in self.attributes.iter() {
            let definition = dictionary
                .lookup_name(name)
                .ok_or_else(|| PacketError::UnknownAttributeName(name.to_string()))?;
            for value in values {
                self.encode_attribute(&mut buffer, name, definition, value)?;
            }
        }

        let total_length = buffer.len();
        if total_length > Self::MAX_PACKET_SIZE {
            return Err(PacketError::PacketTooLarge(total_length));
        }
        buffer[2..4].copy_from_slice(&(total_length as u16).to_be_bytes());

        Ok(buffer)
    }

    fn encode_attribute(
        &self,
        buffer: &mut Vec<u8>,
        name: &str,
        definition: Definition<'_>,
        value: &AttributeValue,
    ) -> Result<(), PacketError> {
        let content_error = |source| PacketError::Content {
            name: name.to_string(),
            source,
        };
        let record_error = |source| PacketError::Attribute {
            name: name.to_string(),
            source,
        };

        match definition {
            Definition::Standard(def) => {
                let content =
                    encode_content(value, &def.kind, def.code, &self.authenticator, &self.secret)
                        .map_err(content_error)?;
                Attribute::new(def.code, &content)
                    .map_err(record_error)?
                    .encode_into(buffer);
            }
            Definition::Vendor(def) => {
                let content = encode_content(
                    value,
                    &def.kind,
                    VENDOR_SPECIFIC,
                    &self.authenticator,
                    &self.secret,
                )
                .map_err(content_error)?;
                let payload = VendorSpecific::new(def.vendor_id, def.vendor_code, content)
                    .map_err(|source| PacketError::VendorSpecific {
                        name: name.to_string(),
                        source,
                    })?
                    .to_bytes();
                Attribute::new(VENDOR_SPECIFIC, &payload)
                    .map_err(record_error)?
                    .encode_into(buffer);
            }
        }
        Ok(())
    }

    /// Encode a response and sign it with the Response Authenticator.
    ///
    /// `self.authenticator` must hold the Request Authenticator, which is what
    /// [`Packet::create_response`] copies.
    pub fn encode_response<D: Dictionary + ?Sized>(
        &self,
        dictionary: &D,
    ) -> Result<Vec<u8>, PacketError> {
        let mut bytes = self.encode(dictionary)?;
        let response_auth =
            auth::calculate_response_authenticator(&bytes, &self.authenticator, &self.secret)?;
        bytes[4..Self::MIN_PACKET_SIZE].copy_from_slice(&response_auth);
        Ok(bytes)
    }

    /// Encode an Accounting-Request with its RFC 2866 authenticator
    pub fn encode_accounting_request<D: Dictionary + ?Sized>(
        &self,
        dictionary: &D,
    ) -> Result<Vec<u8>, PacketError> {
        let mut bytes = self.encode(dictionary)?;
        let request_auth = auth::calculate_accounting_request_authenticator(&bytes, &self.secret)?;
        bytes[4..Self::MIN_PACKET_SIZE].copy_from_slice(&request_auth);
        Ok(bytes)
    }
}

fn log_attribute_error(request_id: u8, e: &AttributeError) {
    match e {
        AttributeError::UnknownVendorAttribute {
            vendor_id,
            vendor_code,
        } => debug!(
            request_id = request_id,
            vendor_id = vendor_id,
            vendor_code = vendor_code,
            "Unknown vsa"
        ),
        AttributeError::UnknownAttribute { code } => warn!(
            request_id = request_id,
            code = code,
            "Attribute not found in dictionary"
        ),
        AttributeError::DecodeFailure { name, source } => error!(
            request_id = request_id,
            attribute = %name,
            error = %source,
            "Failed to decode attribute"
        ),
        other => warn!(request_id = request_id, error = %other, "Skipped attribute"),
    }
}
