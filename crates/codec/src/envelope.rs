//! Request/response envelope: URL-escaped, base64-encoded JSON.
//!
//! A request body is percent-escaped on top of base64; a response body is
//! base64 only (`spec.md` §4.1). Both directions go through the same two
//! primitives so the asymmetry lives in one place (`url_escaped: bool`)
//! instead of being reimplemented per caller.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::CodecError;

/// A decoded envelope paired with the raw `Ticks` anchor the caller echoes
/// back. Handlers read `value` and pass `ticks` straight through to the
/// response so the round-trip in `spec.md` §8 property 6 holds by
/// construction.
pub struct Envelope<T> {
    pub value: T,
    pub ticks: i64,
}

/// Encode a JSON-serializable payload as base64, optionally percent-escaping
/// the result for use as a request body (`url_escaped = true`).
pub fn encode<T: Serialize>(value: &T, url_escaped: bool) -> Result<String, CodecError> {
    let json = serde_json::to_vec(value).map_err(|_| CodecError::EncodeInvalid)?;
    let encoded = BASE64.encode(json);
    Ok(if url_escaped {
        percent_encoding::utf8_percent_encode(&encoded, percent_encoding::NON_ALPHANUMERIC)
            .to_string()
    } else {
        encoded
    })
}

/// Decode a body produced by [`encode`], extracting the `Ticks` field
/// alongside the typed payload.
///
/// `url_escaped` must match how the body was produced: `true` for an
/// inbound request body, `false` for a response body read back in tests.
pub fn decode<T: DeserializeOwned + TicksField>(
    body: &str,
    url_escaped: bool,
) -> Result<Envelope<T>, CodecError> {
    let unescaped = if url_escaped {
        percent_encoding::percent_decode_str(body)
            .decode_utf8()
            .map_err(|_| CodecError::EncodeInvalid)?
            .into_owned()
    } else {
        body.to_string()
    };

    let raw = BASE64
        .decode(unescaped.as_bytes())
        .map_err(|_| CodecError::EncodeInvalid)?;

    let value: T = serde_json::from_slice(&raw).map_err(|_| CodecError::EncodeInvalid)?;
    let ticks = value.ticks();
    Ok(Envelope { value, ticks })
}

/// Implemented by every request/response payload so the decoder can echo
/// `Ticks` without the caller re-parsing the body a second time.
pub trait TicksField {
    fn ticks(&self) -> i64;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
    struct Sample {
        ticks: i64,
        name: String,
    }

    impl TicksField for Sample {
        fn ticks(&self) -> i64 {
            self.ticks
        }
    }

    #[test]
    fn round_trips_request_body() {
        let sample = Sample {
            ticks: 1592619000,
            name: "vendor sample".to_string(),
        };
        let body = encode(&sample, true).unwrap();
        let decoded: Envelope<Sample> = decode(&body, true).unwrap();
        assert_eq!(decoded.value, sample);
        assert_eq!(decoded.ticks, 1592619000);
    }

    #[test]
    fn round_trips_response_body() {
        let sample = Sample {
            ticks: 42,
            name: "resp".to_string(),
        };
        let body = encode(&sample, false).unwrap();
        let decoded: Envelope<Sample> = decode(&body, false).unwrap();
        assert_eq!(decoded.value, sample);
    }

    #[test]
    fn rejects_garbage() {
        let result: Result<Envelope<Sample>, _> = decode("not valid base64!!", true);
        assert_eq!(result.unwrap_err(), CodecError::EncodeInvalid);
    }
}
