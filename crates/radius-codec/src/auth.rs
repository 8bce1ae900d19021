//! Packet authenticators (RFC 2865 Section 3, RFC 2866 Section 3)
//!
//! These operate on encoded packets, since the digests cover the wire bytes.

use crate::packet::{Packet, PacketError};
use rand::Rng;

const AUTHENTICATOR_RANGE: std::ops::Range<usize> = 4..Packet::MIN_PACKET_SIZE;

/// Generate a random Request Authenticator (16 bytes) per RFC 2865 Section 3
pub fn generate_request_authenticator() -> [u8; 16] {
    let mut rng = rand::rng();
    let mut authenticator = [0u8; 16];
    rng.fill(&mut authenticator);
    authenticator
}

/// MD5(Code + ID + Length + `authenticator` + Attributes + Secret)
fn digest_with(packet_bytes: &[u8], authenticator: &[u8; 16], secret: &[u8]) -> Result<[u8; 16], PacketError> {
    if packet_bytes.len() < Packet::MIN_PACKET_SIZE {
        return Err(PacketError::TooShort(packet_bytes.len()));
    }

    let mut context = md5::Context::new();
    context.consume(&packet_bytes[..AUTHENTICATOR_RANGE.start]);
    context.consume(authenticator);
    context.consume(&packet_bytes[AUTHENTICATOR_RANGE.end..]);
    context.consume(secret);
    Ok(context.compute().0)
}

/// Calculate Response Authenticator per RFC 2865 Section 3
///
/// Response Authenticator = MD5(Code + ID + Length + Request Authenticator + Attributes + Secret)
///
/// `packet_bytes` is the encoded response; whatever sits in its authenticator
/// field is ignored. Used for Access-Accept, Access-Reject, Access-Challenge and
/// Accounting-Response.
pub fn calculate_response_authenticator(
    packet_bytes: &[u8],
    request_authenticator: &[u8; 16],
    secret: &[u8],
) -> Result<[u8; 16], PacketError> {
    digest_with(packet_bytes, request_authenticator, secret)
}

/// Verify the Response Authenticator of an encoded response
pub fn verify_response_authenticator(
    response_bytes: &[u8],
    request_authenticator: &[u8; 16],
    secret: &[u8],
) -> bool {
    match calculate_response_authenticator(response_bytes, request_authenticator, secret) {
        Ok(expected) => response_bytes[AUTHENTICATOR_RANGE] == expected,
        Err(_) => false,
    }
}

/// Calculate the Accounting-Request Request Authenticator per RFC 2866 Section 3
///
/// Same digest as the Response Authenticator with sixteen zero octets in place
/// of the Request Authenticator.
pub fn calculate_accounting_request_authenticator(
    packet_bytes: &[u8],
    secret: &[u8],
) -> Result<[u8; 16], PacketError> {
    digest_with(packet_bytes, &[0u8; 16], secret)
}

/// Verify the Request Authenticator of an encoded Accounting-Request
pub fn verify_accounting_request_authenticator(request_bytes: &[u8], secret: &[u8]) -> bool {
    match calculate_accounting_request_authenticator(request_bytes, secret) {
        Ok(expected) => request_bytes[AUTHENTICATOR_RANGE] == expected,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_authenticator() {
        let auth1 = generate_request_authenticator();
        let auth2 = generate_request_authenticator();
        // Should be random
        assert_ne!(auth1, auth2);
    }

    #[test]
    fn test_response_authenticator_matches_rfc_layout() {
        let secret = b"sharedsecret";
        let request_auth = [1u8; 16];
        // Access-Accept, id 42, length 26, Reply-Message "ok!!"
        let mut packet = vec![2, 42, 0, 26];
        packet.extend_from_slice(&[0u8; 16]);
        packet.extend_from_slice(&[18, 6, b'o', b'k', b'!', b'!']);

        let response_auth = calculate_response_authenticator(&packet, &request_auth, secret).unwrap();

        let mut expected_input = vec![2, 42, 0, 26];
        expected_input.extend_from_slice(&request_auth);
        expected_input.extend_from_slice(&[18, 6, b'o', b'k', b'!', b'!']);
        expected_input.extend_from_slice(secret);
        assert_eq!(response_auth, md5::compute(&expected_input).0);

        packet[4..20].copy_from_slice(&response_auth);
        assert!(verify_response_authenticator(&packet, &request_auth, secret));
        assert!(!verify_response_authenticator(&packet, &[2u8; 16], secret));
    }

    #[test]
    fn test_accounting_request_authenticator() {
        let secret = b"acct-secret";
        let mut packet = vec![4, 1, 0, 26];
        packet.extend_from_slice(&[0u8; 16]);
        packet.extend_from_slice(&[40, 6, 0, 0, 0, 1]);

        let auth = calculate_accounting_request_authenticator(&packet, secret).unwrap();
        packet[4..20].copy_from_slice(&auth);
        assert!(verify_accounting_request_authenticator(&packet, secret));

        packet[25] = 2;
        assert!(!verify_accounting_request_authenticator(&packet, secret));
    }

    #[test]
    fn test_short_input() {
        assert!(matches!(
            calculate_response_authenticator(&[0u8; 10], &[0u8; 16], b"s"),
            Err(PacketError::TooShort(10))
        ));
        assert!(!verify_response_authenticator(&[0u8; 10], &[0u8; 16], b"s"));
    }
}
