//! The outbound half of the envelope (`spec.md` §4.1): base64-encoded JSON,
//! not percent-escaped (percent-escaping only applies to request bodies).

use serde::de::DeserializeOwned;
use serde::Serialize;
use vql_codec::TicksField;
use vql_respcode::ResponseCode;

use crate::errors::ToResponseCode;

/// Decode a request body (`spec.md` §4.1: percent-escaped base64 JSON).
/// Returns the typed payload and its echoed `Ticks`, or the mapped
/// [`ResponseCode`] and a best-effort `Ticks` of `0` on failure — there is
/// no `Ticks` to echo back when the body didn't even parse.
pub fn decode_request<T: DeserializeOwned + TicksField>(body: &str) -> Result<(T, i64), (ResponseCode, i64)> {
    match vql_codec::decode::<T>(body, true) {
        Ok(envelope) => Ok((envelope.value, envelope.ticks)),
        Err(e) => Err((e.to_response_code(), 0)),
    }
}

#[derive(Serialize)]
struct Envelope<T> {
    #[serde(rename = "ResponseCode")]
    response_code: i32,
    #[serde(rename = "Ticks")]
    ticks: i64,
    #[serde(flatten)]
    body: T,
}

/// Encode a response envelope. Encoding a well-formed `Envelope<T>` cannot
/// fail in practice (`serde_json` only fails on non-UTF8 map keys or `NaN`
/// floats, neither of which this crate's DTOs contain); a failure here
/// falls back to an empty, zero-ticks `SecSquashed` body rather than
/// panicking the handler.
pub fn respond<T: Serialize>(code: ResponseCode, ticks: i64, body: T) -> String {
    let envelope = Envelope {
        response_code: code.as_i32(),
        ticks,
        body,
    };
    vql_codec::encode(&envelope, false).unwrap_or_else(|_| {
        vql_codec::encode(
            &Envelope {
                response_code: ResponseCode::SecSquashed.as_i32(),
                ticks: 0,
                body: crate::dto::EmptyBody {},
            },
            false,
        )
        .expect("constant fallback envelope always encodes")
    })
}
