//! 3GPP-User-Location-Info (3GPP TS 29.061, vendor 10415 attribute 22)
//!
//! ```text
//!            Bits
//!   Octet  8   7   6   5   4   3   2   1
//!     1   |     Geographic Location Type  |
//!     2   |  MCC digit 2  |  MCC digit 1  |
//!     3   |  MNC digit 3  |  MCC digit 3  |
//!     4   |  MNC digit 2  |  MNC digit 1  |
//!    5..  |  Location identifiers ...     |
//! ```
//!
//! MNC digit 3 is `1111` when the MNC has two digits.

use crate::attributes::AccessError;
use crate::packet::Packet;
use std::fmt;
use thiserror::Error;
use tracing::error;

/// Dictionary name of the attribute carrying the location
pub const USER_LOCATION_INFO: &str = "3GPP-User-Location-Info";

const TWO_DIGIT_MNC: u8 = 0x0f;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    #[error("User location info truncated: {0} bytes")]
    Truncated(usize),
    #[error(transparent)]
    Access(#[from] AccessError),
}

/// Geographic location type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationType {
    Cgi,
    Sai,
    Rai,
    Tai,
    Ecgi,
    TaiAndEcgi,
    /// A type this decoder does not know; no MCC/MNC is extracted
    Unknown(u8),
}

impl LocationType {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => LocationType::Cgi,
            1 => LocationType::Sai,
            2 => LocationType::Rai,
            128 => LocationType::Tai,
            129 => LocationType::Ecgi,
            130 => LocationType::TaiAndEcgi,
            other => LocationType::Unknown(other),
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            LocationType::Cgi => 0,
            LocationType::Sai => 1,
            LocationType::Rai => 2,
            LocationType::Tai => 128,
            LocationType::Ecgi => 129,
            LocationType::TaiAndEcgi => 130,
            LocationType::Unknown(other) => other,
        }
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationType::Cgi => f.write_str("CGI"),
            LocationType::Sai => f.write_str("SAI"),
            LocationType::Rai => f.write_str("RAI"),
            LocationType::Tai => f.write_str("TAI"),
            LocationType::Ecgi => f.write_str("ECGI"),
            LocationType::TaiAndEcgi => f.write_str("TAI+ECGI"),
            LocationType::Unknown(other) => write!(f, "unknown({})", other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserLocationInfo {
    pub location_type: LocationType,
    /// MCC followed by the 2 or 3 MNC digits; `None` for unknown location types
    pub mcc_mnc: Option<String>,
}

impl UserLocationInfo {
    pub fn parse(bytes: &[u8]) -> Result<Self, LocationError> {
        let Some(&type_byte) = bytes.first() else {
            return Err(LocationError::Truncated(0));
        };

        let location_type = LocationType::from_u8(type_byte);
        if let LocationType::Unknown(_) = location_type {
            error!(
                location = %hex::encode(bytes),
                "Unable to parse mccmnc from location attribute"
            );
            return Ok(UserLocationInfo {
                location_type,
                mcc_mnc: None,
            });
        }

        if bytes.len() < 4 {
            return Err(LocationError::Truncated(bytes.len()));
        }

        let digits = [
            bytes[1] & 0x0f,
            bytes[1] >> 4,
            bytes[2] & 0x0f,
            bytes[3] & 0x0f,
            bytes[3] >> 4,
        ];
        let mut mcc_mnc: String = digits.iter().map(|d| d.to_string()).collect();
        let mnc_digit3 = bytes[2] >> 4;
        if mnc_digit3 != TWO_DIGIT_MNC {
            mcc_mnc.push_str(&mnc_digit3.to_string());
        }

        Ok(UserLocationInfo {
            location_type,
            mcc_mnc: Some(mcc_mnc),
        })
    }

    /// Read the location from a decoded packet, if it carries one
    pub fn from_packet(packet: &Packet) -> Result<Option<Self>, LocationError> {
        match packet.get::<Vec<u8>>(USER_LOCATION_INFO)? {
            Some(bytes) => Self::parse(&bytes).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::Code;

    #[test]
    fn test_cgi_two_digit_mnc() {
        // MCC 310, MNC 41
        let info = UserLocationInfo::parse(&[0x00, 0x13, 0xf0, 0x14, 0x00, 0x01]).unwrap();
        assert_eq!(info.location_type, LocationType::Cgi);
        assert_eq!(info.mcc_mnc.as_deref(), Some("31041"));
    }

    #[test]
    fn test_tai_and_ecgi_three_digit_mnc() {
        // MCC 310, MNC 410
        let info = UserLocationInfo::parse(&[0x82, 0x13, 0x00, 0x14]).unwrap();
        assert_eq!(info.location_type, LocationType::TaiAndEcgi);
        assert_eq!(info.mcc_mnc.as_deref(), Some("310410"));
    }

    #[test]
    fn test_ecgi_european_plmn() {
        // MCC 262, MNC 01
        let info = UserLocationInfo::parse(&[0x81, 0x62, 0xf2, 0x10, 0x00]).unwrap();
        assert_eq!(info.location_type, LocationType::Ecgi);
        assert_eq!(info.mcc_mnc.as_deref(), Some("26201"));
    }

    #[test]
    fn test_unknown_type_is_reported_not_failed() {
        let info = UserLocationInfo::parse(&[0x05, 0x13, 0xf0, 0x14]).unwrap();
        assert_eq!(info.location_type, LocationType::Unknown(5));
        assert_eq!(info.mcc_mnc, None);
    }

    #[test]
    fn test_truncated() {
        assert_eq!(UserLocationInfo::parse(&[]), Err(LocationError::Truncated(0)));
        assert_eq!(
            UserLocationInfo::parse(&[0x00, 0x13]),
            Err(LocationError::Truncated(2))
        );
    }

    #[test]
    fn test_location_type_round_trip() {
        for value in [0u8, 1, 2, 128, 129, 130, 77] {
            assert_eq!(LocationType::from_u8(value).as_u8(), value);
        }
        assert_eq!(LocationType::TaiAndEcgi.to_string(), "TAI+ECGI");
    }

    #[test]
    fn test_from_packet() {
        let mut packet = Packet::new(Code::AccountingRequest, 1, [0u8; 16], b"s");
        assert_eq!(UserLocationInfo::from_packet(&packet), Ok(None));

        packet.add(USER_LOCATION_INFO, vec![0x01, 0x13, 0xf0, 0x14]);
        let info = UserLocationInfo::from_packet(&packet).unwrap().unwrap();
        assert_eq!(info.location_type, LocationType::Sai);
        assert_eq!(info.mcc_mnc.as_deref(), Some("31041"));

        packet.add(USER_LOCATION_INFO, vec![0x01, 0x13, 0xf0, 0x14]);
        assert!(matches!(
            UserLocationInfo::from_packet(&packet),
            Err(LocationError::Access(AccessError::MultipleValues { .. }))
        ));
    }
}
