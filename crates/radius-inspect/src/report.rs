use radius_codec::{AttributeValue, DecodedPacket, UserLocationInfo};
use serde::Serialize;
use serde_json::{Map, Value, json};

#[derive(Debug, Serialize)]
pub struct Report {
    pub code: String,
    pub identifier: u8,
    pub authenticator: String,
    pub attributes: Map<String, Value>,
    pub diagnostics: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
}

pub fn render(decoded: &DecodedPacket, location: Option<&UserLocationInfo>) -> Report {
    let packet = &decoded.packet;

    let attributes = packet
        .attributes
        .iter()
        .map(|(name, values)| {
            let values: Vec<Value> = values.iter().map(value_json).collect();
            let value = match <[Value; 1]>::try_from(values) {
                Ok([single]) => single,
                Err(values) => Value::Array(values),
            };
            (name.to_string(), value)
        })
        .collect();

    Report {
        code: format!("{:?}", packet.code),
        identifier: packet.identifier,
        authenticator: hex::encode(packet.authenticator),
        attributes,
        diagnostics: decoded.diagnostics.iter().map(|d| d.to_string()).collect(),
        location: location.map(|info| {
            json!({
                "type": info.location_type.to_string(),
                "mcc_mnc": info.mcc_mnc,
            })
        }),
    }
}

fn value_json(value: &AttributeValue) -> Value {
    match value {
        AttributeValue::Text(text) => Value::String(text.clone()),
        AttributeValue::Integer(n) => json!(n),
        AttributeValue::Ipv4(addr) => Value::String(addr.to_string()),
        AttributeValue::Bytes(bytes) => Value::String(hex::encode(bytes)),
    }
}
