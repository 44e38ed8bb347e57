//! Request body extraction.
//!
//! Bodies are read as raw bytes so every malformed input maps to the same
//! `Not a JSON` answer regardless of `Content-Type`.

use std::str::FromStr;

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use hbnb_domain::error::ValidationError;
use hbnb_domain::record::Kind;

use crate::api::parse_id;
use crate::error::ApiError;

/// A JSON object body. As an extractor it rejects anything that is not a
/// non-empty object.
#[derive(Debug)]
pub struct Payload(Map<String, Value>);

impl Payload {
    /// Parse `bytes` as a JSON object. An empty object is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NotAJson`] when `bytes` is not a JSON object.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ValidationError> {
        match serde_json::from_slice(bytes) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            _ => Err(ValidationError::NotAJson),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value of a required field. Absent, `null` and `""` count as missing.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] naming `field`.
    pub fn require(&self, field: &'static str) -> Result<&Value, ValidationError> {
        match self.0.get(field) {
            None | Some(Value::Null) => Err(ValidationError::MissingField(field)),
            Some(Value::String(text)) if text.is_empty() => {
                Err(ValidationError::MissingField(field))
            }
            Some(value) => Ok(value),
        }
    }

    /// Required field holding the id of a `kind` record.
    ///
    /// # Errors
    ///
    /// Returns a `400` when the field is missing and a `404` when its value
    /// cannot be an id.
    pub fn require_id<I: FromStr>(&self, field: &'static str, kind: Kind) -> Result<I, ApiError> {
        let value = self.require(field)?;
        let raw = match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        Ok(parse_id(kind, &raw)?)
    }

    /// Deserialize the object into a request type. Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidValue`] when a field has the wrong shape.
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<T, ValidationError> {
        Ok(serde_json::from_value(Value::Object(self.0))?)
    }
}

impl<S: Send + Sync> FromRequest<S> for Payload {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| ValidationError::NotAJson)?;
        let payload = Self::from_slice(&bytes)?;
        if payload.is_empty() {
            return Err(ValidationError::NotAJson.into());
        }
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbnb_domain::id::UserId;

    #[test]
    fn should_reject_non_object_bodies() {
        let bodies: [&[u8]; 5] = [b"", b"nope", b"[1, 2]", b"\"text\"", b"null"];
        for body in bodies {
            assert!(matches!(
                Payload::from_slice(body),
                Err(ValidationError::NotAJson)
            ));
        }
    }

    #[test]
    fn should_treat_null_and_empty_string_as_missing() {
        let payload = Payload::from_slice(br#"{"name": "", "email": null}"#).unwrap();
        assert!(matches!(
            payload.require("name"),
            Err(ValidationError::MissingField("name"))
        ));
        assert!(matches!(
            payload.require("email"),
            Err(ValidationError::MissingField("email"))
        ));
        assert!(matches!(
            payload.require("text"),
            Err(ValidationError::MissingField("text"))
        ));
    }

    #[test]
    fn should_parse_required_id() {
        let id = UserId::new();
        let payload = Payload::from_slice(format!(r#"{{"user_id": "{id}"}}"#).as_bytes()).unwrap();
        let parsed: UserId = payload.require_id("user_id", Kind::User).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn should_ignore_unknown_keys_when_deserializing() {
        #[derive(serde::Deserialize)]
        struct Request {
            name: String,
        }

        let payload =
            Payload::from_slice(br#"{"name": "Nevada", "id": "x", "__class__": "State"}"#).unwrap();
        let request: Request = payload.deserialize().unwrap();
        assert_eq!(request.name, "Nevada");
    }
}
