//! The response envelope shared by every endpoint.

use crate::error::FundataError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{"retcode": <int>, "message": <string>, "data": <any>}`.
///
/// `data` is endpoint-specific. It is `Value::Null` when the field is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub retcode: i64,
    pub message: String,
    #[serde(default)]
    pub data: Value,
}

impl ResponseEnvelope {
    /// True when the service reports `retcode == 0`.
    pub fn is_success(&self) -> bool {
        self.retcode == 0
    }

    /// Deserialize `data` into an endpoint-specific type.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T, FundataError> {
        T::deserialize(&self.data)
            .map_err(|e| FundataError::Decode(format!("unexpected data shape: {e}")))
    }
}

/// Parse a raw response body as an envelope.
///
/// Works on bytes so that a body which is not valid UTF-8 is rejected
/// instead of being repaired.
///
/// # Errors
/// Returns `FundataError::Decode` if the body is not UTF-8 JSON, or lacks
/// `retcode` or `message`.
pub fn decode_envelope(body: impl AsRef<[u8]>) -> Result<ResponseEnvelope, FundataError> {
    serde_json::from_slice(body.as_ref()).map_err(|e| FundataError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_envelope() {
        let envelope = decode_envelope(r#"{"retcode":0,"message":"ok","data":{"x":1}}"#).unwrap();

        assert_eq!(envelope.retcode, 0);
        assert_eq!(envelope.message, "ok");
        assert_eq!(envelope.data, json!({"x": 1}));
        assert!(envelope.is_success());
    }

    #[test]
    fn test_decode_null_and_missing_data() {
        let explicit = decode_envelope(r#"{"retcode":0,"message":"ok","data":null}"#).unwrap();
        let missing = decode_envelope(r#"{"retcode":0,"message":"ok"}"#).unwrap();

        assert_eq!(explicit.data, Value::Null);
        assert_eq!(missing.data, Value::Null);
    }

    #[test]
    fn test_decode_nonzero_retcode() {
        let envelope = decode_envelope(r#"{"retcode":403,"message":"sign error","data":[]}"#).unwrap();
        assert!(!envelope.is_success());
        assert_eq!(envelope.data, json!([]));
    }

    #[test]
    fn test_decode_malformed_json() {
        let err = decode_envelope("<html>bad gateway</html>").unwrap_err();
        assert!(err.is_decode());

        assert!(decode_envelope("").is_err());
        assert!(decode_envelope(r#"{"retcode":0,"message":"ok""#).is_err());
    }

    #[test]
    fn test_decode_invalid_utf8() {
        let body: &[u8] = b"{\"retcode\":0,\"message\":\"\xff\xfe\",\"data\":null}";
        let err = decode_envelope(body).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_decode_missing_required_fields() {
        assert!(decode_envelope(r#"{"message":"ok","data":{}}"#).is_err());
        assert!(decode_envelope(r#"{"retcode":0,"data":{}}"#).is_err());
        assert!(decode_envelope("{}").is_err());
        assert!(decode_envelope("null").is_err());
        assert!(decode_envelope("[]").is_err());
    }

    #[test]
    fn test_decode_wrong_field_types() {
        assert!(decode_envelope(r#"{"retcode":"0","message":"ok"}"#).is_err());
        assert!(decode_envelope(r#"{"retcode":0,"message":5}"#).is_err());
    }

    #[test]
    fn test_data_as_typed() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Rank {
            player: String,
            score: u32,
        }

        let envelope = decode_envelope(
            r#"{"retcode":0,"message":"ok","data":[{"player":"a","score":3}]}"#,
        )
        .unwrap();

        let ranks: Vec<Rank> = envelope.data_as().unwrap();
        assert_eq!(
            ranks,
            vec![Rank {
                player: "a".into(),
                score: 3
            }]
        );

        let err = envelope.data_as::<Rank>().unwrap_err();
        assert!(err.is_decode());
    }
}
