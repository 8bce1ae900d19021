//! Attribute dictionary
//!
//! The codec never owns attribute definitions. It resolves numeric codes (and
//! vendor id / vendor code pairs) through the [`Dictionary`] trait, which lets
//! callers plug in whatever source they load definitions from. [`RadiusDictionary`]
//! is the in-memory implementation shipped with the crate: it can be built by hand,
//! loaded from a JSON document, or seeded with the built-in RFC table via
//! [`RadiusDictionary::standard`].
//!
//! # Example
//!
//! ```rust
//! use radius_codec::dictionary::{Dictionary, RadiusDictionary, SemanticType};
//!
//! let dictionary = RadiusDictionary::new()
//!     .with_attribute(1, "User-Name", SemanticType::String)
//!     .with_vendor_attribute(10415, 1, "3GPP-IMSI", SemanticType::String);
//!
//! assert_eq!(dictionary.lookup_standard(1).unwrap().name, "User-Name");
//! assert!(dictionary.lookup_vendor(10415, 2).is_none());
//! ```

mod standard;

pub use standard::{USER_PASSWORD, VENDOR_3GPP, VENDOR_SPECIFIC};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Duplicate attribute name: {0}")]
    DuplicateName(String),
    #[error("Duplicate attribute code: {0}")]
    DuplicateCode(u8),
    #[error("Duplicate vendor attribute: {vendor_id}:{vendor_code}")]
    DuplicateVendorCode { vendor_id: u32, vendor_code: u8 },
    #[error("Attribute {0} is reserved for Vendor-Specific")]
    ReservedCode(u8),
}

/// Semantic type tag of an attribute, as written in dictionary files
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SemanticType {
    /// `string`
    String,
    /// `tagged-string` (RFC 2868), decoded like `string`
    TaggedString,
    /// `integer`, 32-bit unsigned in network order
    Integer,
    /// `tagged-integer` (RFC 2868), decoded like `integer`
    TaggedInteger,
    /// `ipaddr`, 4-byte IPv4 address
    IpAddr,
    /// `binary` (alias `octets`)
    Binary,
    /// Any other tag, kept verbatim so the dictionary saves back unchanged.
    /// Attributes of this type load fine but never produce a value.
    Unsupported(Box<str>),
}

impl SemanticType {
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "string" => SemanticType::String,
            "tagged-string" => SemanticType::TaggedString,
            "integer" => SemanticType::Integer,
            "tagged-integer" => SemanticType::TaggedInteger,
            "ipaddr" => SemanticType::IpAddr,
            "binary" | "octets" => SemanticType::Binary,
            _ => SemanticType::Unsupported(tag.trim().into()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SemanticType::String => "string",
            SemanticType::TaggedString => "tagged-string",
            SemanticType::Integer => "integer",
            SemanticType::TaggedInteger => "tagged-integer",
            SemanticType::IpAddr => "ipaddr",
            SemanticType::Binary => "binary",
            SemanticType::Unsupported(tag) => &**tag,
        }
    }
}

impl From<String> for SemanticType {
    fn from(tag: String) -> Self {
        SemanticType::parse(&tag)
    }
}

impl From<SemanticType> for String {
    fn from(kind: SemanticType) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Definition of a standard (non vendor-specific) attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    pub code: u8,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SemanticType,
}

/// Definition of a sub-attribute carried inside Vendor-Specific (26)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorAttributeDefinition {
    pub vendor_id: u32,
    pub vendor_code: u8,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SemanticType,
}

/// Result of a lookup by attribute name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Definition<'a> {
    Standard(&'a AttributeDefinition),
    Vendor(&'a VendorAttributeDefinition),
}

impl Definition<'_> {
    pub fn name(&self) -> &str {
        match self {
            Definition::Standard(def) => &def.name,
            Definition::Vendor(def) => &def.name,
        }
    }

    pub fn kind(&self) -> &SemanticType {
        match self {
            Definition::Standard(def) => &def.kind,
            Definition::Vendor(def) => &def.kind,
        }
    }
}

/// Read-only attribute lookup consumed by the packet codec.
///
/// Implementations must not change while a decode or encode borrowing them is in
/// flight; sharing one behind an `Arc` across threads is the expected usage.
pub trait Dictionary: Send + Sync {
    /// Look up a standard attribute by its type code
    fn lookup_standard(&self, code: u8) -> Option<&AttributeDefinition>;

    /// Look up a vendor attribute by vendor id and the vendor's own type code
    fn lookup_vendor(&self, vendor_id: u32, vendor_code: u8) -> Option<&VendorAttributeDefinition>;

    /// Look up any attribute by name (used when encoding)
    fn lookup_name(&self, name: &str) -> Option<Definition<'_>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameKey {
    Standard(u8),
    Vendor(u32, u8),
}

/// On-disk layout of a JSON dictionary
#[derive(Debug, Default, Serialize, Deserialize)]
struct DictionaryFile {
    #[serde(default)]
    attributes: Vec<AttributeDefinition>,
    #[serde(default)]
    vendor_attributes: Vec<VendorAttributeDefinition>,
}

/// In-memory [`Dictionary`]
#[derive(Debug, Clone, Default)]
pub struct RadiusDictionary {
    attributes: HashMap<u8, AttributeDefinition>,
    vendor_attributes: HashMap<(u32, u8), VendorAttributeDefinition>,
    names: HashMap<String, NameKey>,
}

impl RadiusDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dictionary preloaded with the RFC 2865/2866/2868/2869/3579 attributes and the
    /// commonly used 3GPP (vendor 10415) attributes.
    pub fn standard() -> Self {
        standard::build()
    }

    /// Load a dictionary from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Load a dictionary from a JSON document of the form
    /// `{"attributes": [...], "vendor_attributes": [...]}`
    pub fn from_json_str(contents: &str) -> Result<Self, DictionaryError> {
        let file: DictionaryFile = serde_json::from_str(contents)?;
        let mut dictionary = Self::new();
        for def in file.attributes {
            dictionary.insert_attribute(def)?;
        }
        for def in file.vendor_attributes {
            dictionary.insert_vendor_attribute(def)?;
        }
        tracing::debug!(
            attributes = dictionary.attributes.len(),
            vendor_attributes = dictionary.vendor_attributes.len(),
            "Loaded RADIUS dictionary"
        );
        Ok(dictionary)
    }

    /// Save the dictionary as a JSON file, sorted by code
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), DictionaryError> {
        let mut file = DictionaryFile {
            attributes: self.attributes.values().cloned().collect(),
            vendor_attributes: self.vendor_attributes.values().cloned().collect(),
        };
        file.attributes.sort_by_key(|def| def.code);
        file.vendor_attributes
            .sort_by_key(|def| (def.vendor_id, def.vendor_code));
        let contents = serde_json::to_string_pretty(&file)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Add a standard attribute, rejecting duplicate codes and names.
    ///
    /// Code 26 is rejected: it always carries Vendor-Specific payloads, which are
    /// defined with [`RadiusDictionary::insert_vendor_attribute`].
    pub fn insert_attribute(&mut self, def: AttributeDefinition) -> Result<(), DictionaryError> {
        if def.code == VENDOR_SPECIFIC {
            return Err(DictionaryError::ReservedCode(def.code));
        }
        if self.attributes.contains_key(&def.code) {
            return Err(DictionaryError::DuplicateCode(def.code));
        }
        if self.names.contains_key(&def.name) {
            return Err(DictionaryError::DuplicateName(def.name));
        }
        self.names
            .insert(def.name.clone(), NameKey::Standard(def.code));
        self.attributes.insert(def.code, def);
        Ok(())
    }

    /// Add a vendor attribute, rejecting duplicate (vendor id, code) pairs and names
    pub fn insert_vendor_attribute(
        &mut self,
        def: VendorAttributeDefinition,
    ) -> Result<(), DictionaryError> {
        let key = (def.vendor_id, def.vendor_code);
        if self.vendor_attributes.contains_key(&key) {
            return Err(DictionaryError::DuplicateVendorCode {
                vendor_id: def.vendor_id,
                vendor_code: def.vendor_code,
            });
        }
        if self.names.contains_key(&def.name) {
            return Err(DictionaryError::DuplicateName(def.name));
        }
        self.names
            .insert(def.name.clone(), NameKey::Vendor(key.0, key.1));
        self.vendor_attributes.insert(key, def);
        Ok(())
    }

    /// Builder-style insert. Replaces any existing definition with the same code.
    /// Code 26 is ignored, see [`RadiusDictionary::insert_attribute`].
    pub fn with_attribute(mut self, code: u8, name: impl Into<String>, kind: SemanticType) -> Self {
        if code == VENDOR_SPECIFIC {
            tracing::warn!(code = code, "Ignoring standard definition for Vendor-Specific");
            return self;
        }
        if let Some(old) = self.attributes.remove(&code) {
            self.names.remove(&old.name);
        }
        let name = name.into();
        self.forget_name(&name);
        self.names.insert(name.clone(), NameKey::Standard(code));
        self.attributes
            .insert(code, AttributeDefinition { code, name, kind });
        self
    }

    /// Builder-style vendor insert. Replaces any existing definition for the pair.
    pub fn with_vendor_attribute(
        mut self,
        vendor_id: u32,
        vendor_code: u8,
        name: impl Into<String>,
        kind: SemanticType,
    ) -> Self {
        if let Some(old) = self.vendor_attributes.remove(&(vendor_id, vendor_code)) {
            self.names.remove(&old.name);
        }
        let name = name.into();
        self.forget_name(&name);
        self.names
            .insert(name.clone(), NameKey::Vendor(vendor_id, vendor_code));
        self.vendor_attributes.insert(
            (vendor_id, vendor_code),
            VendorAttributeDefinition {
                vendor_id,
                vendor_code,
                name,
                kind,
            },
        );
        self
    }

    pub fn len(&self) -> usize {
        self.attributes.len() + self.vendor_attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn forget_name(&mut self, name: &str) {
        match self.names.remove(name) {
            Some(NameKey::Standard(code)) => {
                self.attributes.remove(&code);
            }
            Some(NameKey::Vendor(vendor_id, vendor_code)) => {
                self.vendor_attributes.remove(&(vendor_id, vendor_code));
            }
            None => {}
        }
    }
}

impl Dictionary for RadiusDictionary {
    fn lookup_standard(&self, code: u8) -> Option<&AttributeDefinition> {
        self.attributes.get(&code)
    }

    fn lookup_vendor(&self, vendor_id: u32, vendor_code: u8) -> Option<&VendorAttributeDefinition> {
        self.vendor_attributes.get(&(vendor_id, vendor_code))
    }

    fn lookup_name(&self, name: &str) -> Option<Definition<'_>> {
        match self.names.get(name)? {
            NameKey::Standard(code) => self.attributes.get(code).map(Definition::Standard),
            NameKey::Vendor(vendor_id, vendor_code) => self
                .vendor_attributes
                .get(&(*vendor_id, *vendor_code))
                .map(Definition::Vendor),
        }
    }
}
