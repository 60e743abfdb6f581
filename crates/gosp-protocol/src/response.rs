//! Interpreting server responses.
//!
//! The server answers with a status code and a JSON body. These helpers
//! decide, for one response, whether it is a success, a failure the
//! server explained (`{message, loc?}`), or something malformed.

use gosp_transport::HttpResponse;
use serde_json::Value;

use crate::{ApiError, Codec, ProtocolError, SourceLocation};

/// Value of the `Authorization` header for a bearer credential.
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// The outcome of one evaluation, as reported by the server.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalResponse {
    /// `{ "result": <value> }`
    Value(Value),
    /// `{ "message": "...", "loc"?: {...} }`
    Failure(ApiError),
}

impl EvalResponse {
    /// Classifies an evaluation response.
    ///
    /// - a `message` field wins regardless of status (the server reports
    ///   evaluation errors as 400 with `message` and `loc`);
    /// - a 2xx body with a `result` field (even `null`) is a value;
    /// - anything else is a [`ProtocolError`].
    pub fn from_response<C: Codec>(resp: &HttpResponse, codec: &C) -> Result<Self, ProtocolError> {
        let body: Value = match codec.decode(&resp.body) {
            Ok(body) => body,
            Err(_) if !resp.is_success() => {
                return Err(ProtocolError::Status(resp.status));
            }
            Err(e) => return Err(e),
        };

        if let Some(message) = body.get("message").and_then(Value::as_str) {
            let loc = match body.get("loc") {
                Some(loc) if !loc.is_null() => Some(
                    serde_json::from_value::<SourceLocation>(loc.clone())
                        .map_err(ProtocolError::Decode)?,
                ),
                _ => None,
            };
            return Ok(Self::Failure(ApiError {
                message: message.to_string(),
                loc,
            }));
        }

        if !resp.is_success() {
            return Err(ProtocolError::Status(resp.status));
        }

        match body.get("result") {
            Some(value) => Ok(Self::Value(value.clone())),
            None => Err(ProtocolError::InvalidMessage(body.to_string())),
        }
    }
}

/// Extracts the server's explanation from a non-2xx response.
///
/// Falls back to [`ProtocolError::Status`] when the body is not an
/// [`ApiError`].
pub fn api_error<C: Codec>(resp: &HttpResponse, codec: &C) -> Result<ApiError, ProtocolError> {
    codec
        .decode::<ApiError>(&resp.body)
        .map_err(|_| ProtocolError::Status(resp.status))
}

/// Renders a result value the way a user expects to read it: strings
/// without quotes, everything else as JSON text.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JsonCodec;

    fn resp(status: u16, body: &str) -> HttpResponse {
        HttpResponse::new(status, body.as_bytes().to_vec())
    }

    #[test]
    fn test_bearer_format() {
        assert_eq!(bearer("abc"), "Bearer abc");
    }

    #[test]
    fn test_eval_result_value() {
        let r = EvalResponse::from_response(&resp(200, r#"{"result":2}"#), &JsonCodec)
            .unwrap();
        assert_eq!(r, EvalResponse::Value(serde_json::json!(2)));
    }

    #[test]
    fn test_eval_null_result_is_still_a_value() {
        let r = EvalResponse::from_response(&resp(200, r#"{"result":null}"#), &JsonCodec)
            .unwrap();
        assert_eq!(r, EvalResponse::Value(Value::Null));
    }

    #[test]
    fn test_eval_failure_with_loc_on_400() {
        let body = r#"{"message":"division by zero","loc":{"source":"repl","line":1,"column":2}}"#;
        let r = EvalResponse::from_response(&resp(400, body), &JsonCodec).unwrap();
        match r {
            EvalResponse::Failure(err) => {
                assert_eq!(err.message, "division by zero");
                assert_eq!(err.loc.unwrap().to_string(), "repl:1:2");
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_eval_failure_without_loc_on_200() {
        let r = EvalResponse::from_response(&resp(200, r#"{"message":"bad"}"#), &JsonCodec)
            .unwrap();
        assert_eq!(
            r,
            EvalResponse::Failure(ApiError {
                message: "bad".into(),
                loc: None
            })
        );
    }

    #[test]
    fn test_eval_non_json_error_page_reports_status() {
        let err = EvalResponse::from_response(&resp(502, "<html>bad gateway</html>"), &JsonCodec)
            .unwrap_err();
        assert!(matches!(err, ProtocolError::Status(502)));
        assert_eq!(err.to_string(), "server error: 502");
    }

    #[test]
    fn test_eval_non_json_success_is_decode_error() {
        let err = EvalResponse::from_response(&resp(200, "not json"), &JsonCodec).unwrap_err();
        assert!(matches!(err, ProtocolError::Decode(_)));
    }

    #[test]
    fn test_eval_success_without_result_is_invalid() {
        let err = EvalResponse::from_response(&resp(200, r#"{"status":"OK"}"#), &JsonCodec)
            .unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidMessage(_)));
    }

    #[test]
    fn test_api_error_fallback_to_status() {
        let err = api_error(&resp(500, ""), &JsonCodec).unwrap_err();
        assert!(matches!(err, ProtocolError::Status(500)));

        let ok = api_error(&resp(409, r#"{"message":"username already exists"}"#), &JsonCodec)
            .unwrap();
        assert_eq!(ok.message, "username already exists");
    }

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(&serde_json::json!(2)), "2");
        assert_eq!(render_value(&serde_json::json!("hi")), "hi");
        assert_eq!(render_value(&serde_json::json!([1, 2])), "[1,2]");
        assert_eq!(render_value(&Value::Null), "null");
    }
}
