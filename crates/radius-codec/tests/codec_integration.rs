//! Integration tests for the RADIUS packet codec
//!
//! These tests exercise the public API end to end:
//! - Decoding wire captures against the built-in and JSON dictionaries
//! - Encode/decode round trips for every semantic type
//! - Request/response flows with User-Password and authenticators
//! - Diagnostics for attributes that cannot be decoded

use radius_codec::attributes::VendorSpecific;
use radius_codec::auth::{verify_accounting_request_authenticator, verify_response_authenticator};
use radius_codec::dictionary::{USER_PASSWORD, VENDOR_3GPP};
use radius_codec::{
    AccessError, AttributeError, AttributeValue, Code, LocationType, Packet, PacketError,
    RadiusDictionary, SemanticType, UserLocationInfo,
};
use std::net::Ipv4Addr;
use std::sync::Arc;

const SECRET: &[u8] = b"testing123";

/// Helper to build a raw datagram with a correct length field
fn datagram(code: u8, identifier: u8, authenticator: [u8; 16], attributes: &[u8]) -> Vec<u8> {
    let mut data = vec![code, identifier, 0, 0];
    data.extend_from_slice(&authenticator);
    data.extend_from_slice(attributes);
    let length = data.len() as u16;
    data[2..4].copy_from_slice(&length.to_be_bytes());
    data
}

#[test]
fn test_decode_access_request_capture() {
    // Access-Request, id 0x2a: User-Name "steve", NAS-IP-Address 192.168.1.16,
    // NAS-Port 3, Calling-Station-Id "00-04-5F-00-0F-D1"
    let capture = hex::decode(
        "012a003a\
         0f403f9473978057bd83d5cb98f4227a\
         0107737465766504 06c0a80110050600000003\
         1f1330302d30342d35462d30302d30462d4431"
            .replace(' ', ""),
    )
    .unwrap();

    let dictionary = RadiusDictionary::standard();
    let decoded = Packet::decode(&capture, &dictionary, SECRET).unwrap();
    assert!(decoded.is_clean(), "{:?}", decoded.diagnostics);

    let packet = decoded.packet;
    assert_eq!(packet.code, Code::AccessRequest);
    assert_eq!(packet.identifier, 0x2a);
    assert_eq!(packet.get::<String>("User-Name").unwrap().as_deref(), Some("steve"));
    assert_eq!(
        packet.get::<Ipv4Addr>("NAS-IP-Address").unwrap(),
        Some(Ipv4Addr::new(192, 168, 1, 16))
    );
    assert_eq!(packet.get::<u32>("NAS-Port").unwrap(), Some(3));
    assert_eq!(
        packet.get::<String>("Calling-Station-Id").unwrap().as_deref(),
        Some("00-04-5F-00-0F-D1")
    );

    // Re-encoding reproduces the capture byte for byte
    assert_eq!(packet.encode(&dictionary).unwrap(), capture);
}

#[test]
fn test_round_trip_every_semantic_type() {
    let dictionary = RadiusDictionary::new()
        .with_attribute(1, "User-Name", SemanticType::String)
        .with_attribute(USER_PASSWORD, "User-Password", SemanticType::Binary)
        .with_attribute(8, "Framed-IP-Address", SemanticType::IpAddr)
        .with_attribute(25, "Class", SemanticType::Binary)
        .with_attribute(27, "Session-Timeout", SemanticType::Integer)
        .with_attribute(64, "Tunnel-Type", SemanticType::TaggedInteger)
        .with_attribute(81, "Tunnel-Private-Group-Id", SemanticType::TaggedString)
        .with_vendor_attribute(VENDOR_3GPP, 1, "3GPP-IMSI", SemanticType::String)
        .with_vendor_attribute(VENDOR_3GPP, 2, "3GPP-Charging-Id", SemanticType::Integer)
        .with_vendor_attribute(VENDOR_3GPP, 6, "3GPP-SGSN-Address", SemanticType::IpAddr)
        .with_vendor_attribute(VENDOR_3GPP, 22, "3GPP-User-Location-Info", SemanticType::Binary);

    let mut packet = Packet::new(Code::AccessRequest, 200, [0x5a; 16], SECRET);
    packet.add("User-Name", "müller");
    packet.add("User-Password", b"a password longer than sixteen bytes".to_vec());
    packet.add("Framed-IP-Address", Ipv4Addr::new(100, 64, 0, 1));
    packet.add("Class", vec![0x00, 0xff, 0x10]);
    packet.add("Class", Vec::<u8>::new());
    packet.add("Session-Timeout", 86_400u32);
    packet.add("Tunnel-Type", 13u32);
    packet.add("Tunnel-Private-Group-Id", "vlan-42");
    packet.add("3GPP-IMSI", "001010123456789");
    packet.add("3GPP-Charging-Id", u32::MAX);
    packet.add("3GPP-SGSN-Address", Ipv4Addr::new(10, 1, 2, 3));
    packet.add("3GPP-User-Location-Info", vec![0x82, 0x13, 0x00, 0x14, 0x00, 0x01]);

    let encoded = packet.encode(&dictionary).unwrap();
    let decoded = Packet::decode(&encoded, &dictionary, SECRET).unwrap();

    assert!(decoded.is_clean(), "{:?}", decoded.diagnostics);
    assert_eq!(decoded.packet, packet);
}

#[test]
fn test_access_request_to_accept_flow() {
    let dictionary = Arc::new(RadiusDictionary::standard());

    // Client side
    let mut request = Packet::new_request(Code::AccessRequest, 17, SECRET);
    request.add("User-Name", "alice");
    request.add("User-Password", b"s3cr3t".to_vec());
    request.add("NAS-Identifier", "nas-01");
    let wire = request.encode(dictionary.as_ref()).unwrap();

    // Server side
    let server_dictionary = Arc::clone(&dictionary);
    let received = Packet::decode(&wire, server_dictionary.as_ref(), SECRET)
        .unwrap()
        .packet;
    assert_eq!(
        received.get::<Vec<u8>>("User-Password").unwrap(),
        Some(b"s3cr3t".to_vec())
    );

    let mut accept = received.create_response(Code::AccessAccept);
    accept.add("Reply-Message", "Hello, alice");
    accept.add("Session-Timeout", 3600u32);
    let reply = accept.encode_response(server_dictionary.as_ref()).unwrap();

    // Client validates the response against its own request
    assert_eq!(reply[1], request.identifier);
    assert!(verify_response_authenticator(&reply, &request.authenticator, SECRET));

    let response = Packet::decode(&reply, dictionary.as_ref(), SECRET).unwrap().packet;
    assert_eq!(response.code, Code::AccessAccept);
    assert_eq!(response.get::<u32>("Session-Timeout").unwrap(), Some(3600));
}

#[test]
fn test_wrong_secret_garbles_password_only() {
    let dictionary = RadiusDictionary::standard();
    let mut request = Packet::new(Code::AccessRequest, 1, [9u8; 16], SECRET);
    request.add("User-Name", "bob");
    request.add("User-Password", b"letmein".to_vec());
    let wire = request.encode(&dictionary).unwrap();

    let decoded = Packet::decode(&wire, &dictionary, b"not-the-secret").unwrap();
    assert!(decoded.is_clean());
    assert_eq!(decoded.packet.get::<String>("User-Name").unwrap().as_deref(), Some("bob"));
    assert_ne!(
        decoded.packet.get::<Vec<u8>>("User-Password").unwrap(),
        Some(b"letmein".to_vec())
    );
}

#[test]
fn test_accounting_request_with_location() {
    let dictionary = RadiusDictionary::standard();
    let mut request = Packet::new(Code::AccountingRequest, 3, [0u8; 16], SECRET);
    request.add("Acct-Status-Type", 1u32);
    request.add("Acct-Session-Id", "5a1b-0001");
    request.add("3GPP-IMSI", "310410123456789");
    request.add("3GPP-User-Location-Info", vec![0x00, 0x13, 0xf0, 0x14, 0x00, 0x01, 0x00, 0x02]);

    let wire = request.encode_accounting_request(&dictionary).unwrap();
    assert!(verify_accounting_request_authenticator(&wire, SECRET));

    let packet = Packet::decode(&wire, &dictionary, SECRET).unwrap().packet;
    let location = UserLocationInfo::from_packet(&packet).unwrap().unwrap();
    assert_eq!(location.location_type, LocationType::Cgi);
    assert_eq!(location.mcc_mnc.as_deref(), Some("31041"));
}

#[test]
fn test_length_mismatch_never_parses() {
    let dictionary = RadiusDictionary::standard();
    let good = datagram(1, 1, [0u8; 16], &[1, 5, b'b', b'o', b'b']);

    for actual in [good.len() - 1, good.len() + 1, good.len() + 100] {
        let mut data = good.clone();
        data.resize(actual, 0);
        match Packet::decode(&data, &dictionary, SECRET) {
            Err(PacketError::MalformedPacket { declared, actual: got }) => {
                assert_eq!(declared, good.len());
                assert_eq!(got, actual);
            }
            other => panic!("expected MalformedPacket, got {:?}", other),
        }
    }
}

#[test]
fn test_mixed_diagnostics_keep_good_attributes() {
    let dictionary = RadiusDictionary::standard();

    let mut attributes = vec![1, 7, b'c', b'a', b'r', b'o', b'l'];
    // Unknown standard attribute
    attributes.extend_from_slice(&[240, 3, 0]);
    // Vendor 9 (Cisco) is not in the built-in dictionary
    let cisco = VendorSpecific::new(9, 1, b"shell:priv-lvl=15".to_vec()).unwrap().to_bytes();
    attributes.push(26);
    attributes.push((cisco.len() + 2) as u8);
    attributes.extend_from_slice(&cisco);
    // Vendor-Specific too short to hold a header
    attributes.extend_from_slice(&[26, 5, 0, 0, 0]);
    // NAS-Port with 5 bytes cannot be an integer
    attributes.extend_from_slice(&[5, 7, 0, 0, 0, 0, 1]);
    attributes.extend_from_slice(&[32, 5, b'n', b'a', b's']);

    let data = datagram(1, 1, [0u8; 16], &attributes);
    let decoded = Packet::decode(&data, &dictionary, SECRET).unwrap();

    assert_eq!(decoded.diagnostics.len(), 4);
    assert_eq!(decoded.diagnostics[0], AttributeError::UnknownAttribute { code: 240 });
    assert_eq!(
        decoded.diagnostics[1],
        AttributeError::UnknownVendorAttribute {
            vendor_id: 9,
            vendor_code: 1
        }
    );
    assert!(matches!(
        decoded.diagnostics[2],
        AttributeError::MalformedVendorSpecific { .. }
    ));
    assert!(matches!(
        &decoded.diagnostics[3],
        AttributeError::DecodeFailure { name, .. } if name == "NAS-Port"
    ));

    let packet = decoded.packet;
    assert_eq!(packet.get::<String>("User-Name").unwrap().as_deref(), Some("carol"));
    assert_eq!(packet.get::<String>("NAS-Identifier").unwrap().as_deref(), Some("nas"));
    assert_eq!(packet.attributes.len(), 2);
}

#[test]
fn test_unsupported_dictionary_type_is_reported() {
    let dictionary = RadiusDictionary::from_json_str(
        r#"{"attributes": [
            {"code": 1, "name": "User-Name", "type": "string"},
            {"code": 55, "name": "Event-Timestamp", "type": "date"}
        ]}"#,
    )
    .unwrap();

    let data = datagram(4, 1, [0u8; 16], &[55, 6, 0x65, 0x00, 0x00, 0x00, 1, 3, b'x']);
    let decoded = Packet::decode(&data, &dictionary, SECRET).unwrap();

    assert_eq!(
        decoded.diagnostics,
        vec![AttributeError::UnsupportedType {
            name: "Event-Timestamp".to_string(),
            tag: "date".to_string(),
        }]
    );
    assert!(decoded.packet.attributes.contains("User-Name"));
}

#[test]
fn test_accessor_contract() {
    let mut packet = Packet::new(Code::AccessAccept, 1, [0u8; 16], SECRET);
    packet.add("Reply-Message", "first");
    packet.add("Reply-Message", "second");
    packet.add("Framed-IP-Address", Ipv4Addr::LOCALHOST);

    assert!(matches!(
        packet.get::<String>("Reply-Message"),
        Err(AccessError::MultipleValues { count: 2, .. })
    ));
    assert_eq!(packet.get::<String>("Filter-Id"), Ok(None));
    assert_eq!(packet.get_all::<String>("Filter-Id"), Ok(vec![]));
    assert!(matches!(
        packet.get::<u32>("Framed-IP-Address"),
        Err(AccessError::TypeMismatch { .. })
    ));
    assert_eq!(
        packet.get_all::<AttributeValue>("Reply-Message").unwrap(),
        vec![
            AttributeValue::Text("first".to_string()),
            AttributeValue::Text("second".to_string())
        ]
    );
}

#[test]
fn test_shared_dictionary_across_threads() {
    let dictionary = Arc::new(RadiusDictionary::standard());
    let mut request = Packet::new(Code::AccessRequest, 1, [1u8; 16], SECRET);
    request.add("User-Name", "threaded");
    let wire = Arc::new(request.encode(dictionary.as_ref()).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let dictionary = Arc::clone(&dictionary);
            let wire = Arc::clone(&wire);
            std::thread::spawn(move || {
                Packet::decode(&wire, dictionary.as_ref(), SECRET)
                    .unwrap()
                    .packet
                    .get::<String>("User-Name")
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().as_deref(), Some("threaded"));
    }
}
