use super::{RadiusDictionary, SemanticType};
use SemanticType::{Binary, Integer, IpAddr, String, TaggedInteger, TaggedString};

/// User-Password (2) - RFC 2865, hidden with the shared secret
pub const USER_PASSWORD: u8 = 2;
/// Vendor-Specific (26) - RFC 2865, container for vendor sub-attributes
pub const VENDOR_SPECIFIC: u8 = 26;
/// 3GPP vendor id (TS 29.061)
pub const VENDOR_3GPP: u32 = 10415;

const STANDARD_ATTRIBUTES: &[(u8, &str, SemanticType)] = &[
    // RFC 2865
    (1, "User-Name", String),
    (USER_PASSWORD, "User-Password", Binary),
    (3, "CHAP-Password", Binary),
    (4, "NAS-IP-Address", IpAddr),
    (5, "NAS-Port", Integer),
    (6, "Service-Type", Integer),
    (7, "Framed-Protocol", Integer),
    (8, "Framed-IP-Address", IpAddr),
    (9, "Framed-IP-Netmask", IpAddr),
    (10, "Framed-Routing", Integer),
    (11, "Filter-Id", String),
    (12, "Framed-MTU", Integer),
    (13, "Framed-Compression", Integer),
    (14, "Login-IP-Host", IpAddr),
    (15, "Login-Service", Integer),
    (16, "Login-TCP-Port", Integer),
    (18, "Reply-Message", String),
    (19, "Callback-Number", String),
    (20, "Callback-Id", String),
    (22, "Framed-Route", String),
    (23, "Framed-IPX-Network", IpAddr),
    (24, "State", Binary),
    (25, "Class", Binary),
    (27, "Session-Timeout", Integer),
    (28, "Idle-Timeout", Integer),
    (29, "Termination-Action", Integer),
    (30, "Called-Station-Id", String),
    (31, "Calling-Station-Id", String),
    (32, "NAS-Identifier", String),
    (33, "Proxy-State", Binary),
    (34, "Login-LAT-Service", String),
    (35, "Login-LAT-Node", String),
    (36, "Login-LAT-Group", Binary),
    (37, "Framed-AppleTalk-Link", Integer),
    (38, "Framed-AppleTalk-Network", Integer),
    (39, "Framed-AppleTalk-Zone", String),
    // RFC 2866
    (40, "Acct-Status-Type", Integer),
    (41, "Acct-Delay-Time", Integer),
    (42, "Acct-Input-Octets", Integer),
    (43, "Acct-Output-Octets", Integer),
    (44, "Acct-Session-Id", String),
    (45, "Acct-Authentic", Integer),
    (46, "Acct-Session-Time", Integer),
    (47, "Acct-Input-Packets", Integer),
    (48, "Acct-Output-Packets", Integer),
    (49, "Acct-Terminate-Cause", Integer),
    (50, "Acct-Multi-Session-Id", String),
    (51, "Acct-Link-Count", Integer),
    // RFC 2869
    (52, "Acct-Input-Gigawords", Integer),
    (53, "Acct-Output-Gigawords", Integer),
    (55, "Event-Timestamp", Integer),
    (60, "CHAP-Challenge", Binary),
    (61, "NAS-Port-Type", Integer),
    (62, "Port-Limit", Integer),
    (63, "Login-LAT-Port", String),
    // RFC 2868
    (64, "Tunnel-Type", TaggedInteger),
    (65, "Tunnel-Medium-Type", TaggedInteger),
    (66, "Tunnel-Client-Endpoint", TaggedString),
    (67, "Tunnel-Server-Endpoint", TaggedString),
    (81, "Tunnel-Private-Group-Id", TaggedString),
    // RFC 3579 / RFC 2869
    (79, "EAP-Message", Binary),
    (80, "Message-Authenticator", Binary),
    (87, "NAS-Port-Id", String),
];

const VENDOR_3GPP_ATTRIBUTES: &[(u8, &str, SemanticType)] = &[
    (1, "3GPP-IMSI", String),
    (2, "3GPP-Charging-Id", Integer),
    (3, "3GPP-PDP-Type", Integer),
    (5, "3GPP-GPRS-Negotiated-QoS-Profile", String),
    (6, "3GPP-SGSN-Address", IpAddr),
    (7, "3GPP-GGSN-Address", IpAddr),
    (8, "3GPP-IMSI-MCC-MNC", String),
    (9, "3GPP-GGSN-MCC-MNC", String),
    (10, "3GPP-NSAPI", String),
    (12, "3GPP-Selection-Mode", String),
    (13, "3GPP-Charging-Characteristics", String),
    (18, "3GPP-SGSN-MCC-MNC", String),
    (20, "3GPP-IMEISV", String),
    (21, "3GPP-RAT-Type", Binary),
    (22, "3GPP-User-Location-Info", Binary),
    (23, "3GPP-MS-TimeZone", Binary),
];

pub(super) fn build() -> RadiusDictionary {
    let dictionary = STANDARD_ATTRIBUTES
        .iter()
        .fold(RadiusDictionary::new(), |dict, (code, name, kind)| {
            dict.with_attribute(*code, *name, kind.clone())
        });

    VENDOR_3GPP_ATTRIBUTES
        .iter()
        .fold(dictionary, |dict, (code, name, kind)| {
            dict.with_vendor_attribute(VENDOR_3GPP, *code, *name, kind.clone())
        })
}
