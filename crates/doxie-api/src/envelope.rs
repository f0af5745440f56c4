// Three-way result of a single scanner call.

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::Error;

/// What a successful call produced.
///
/// The variant is decided at runtime from the status and `Content-Type`:
/// 204 becomes [`Ack`](Self::Ack), a JSON body becomes
/// [`Decoded`](Self::Decoded), anything else is kept verbatim as
/// [`Raw`](Self::Raw). File fetches that wrote to disk also report `Ack(true)`.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    Decoded(serde_json::Value),
    Raw(Bytes),
    Ack(bool),
}

impl Envelope {
    /// The decoded JSON value, if any.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Decoded(value) => Some(value),
            _ => None,
        }
    }

    /// The raw body, if the response was not JSON.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Raw(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// `true` for `Ack(true)`.
    pub fn is_ack(&self) -> bool {
        matches!(self, Self::Ack(true))
    }

    /// Decode a JSON envelope into a typed model.
    ///
    /// A non-JSON envelope is reported as a deserialization error carrying
    /// a description of what was received instead.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, Error> {
        match self {
            Self::Decoded(value) => {
                let body = value.to_string();
                serde_json::from_value(value).map_err(|e| Error::Deserialization {
                    message: e.to_string(),
                    body,
                })
            }
            Self::Raw(bytes) => Err(Error::Deserialization {
                message: "expected a JSON response".into(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            }),
            Self::Ack(_) => Err(Error::Deserialization {
                message: "expected a JSON response, got no content".into(),
                body: String::new(),
            }),
        }
    }

    /// The bytes to persist when a fetch is redirected to a file.
    ///
    /// Raw bodies are written verbatim, JSON is re-serialized, and a
    /// no-content acknowledgement produces an empty file.
    pub(crate) fn into_file_contents(self) -> Bytes {
        match self {
            Self::Raw(bytes) => bytes,
            Self::Decoded(value) => Bytes::from(value.to_string()),
            Self::Ack(_) => Bytes::new(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Firmware {
        firmware: String,
    }

    #[test]
    fn decode_json_into_model() {
        let env = Envelope::Decoded(json!({ "firmware": "0.29" }));
        let fw: Firmware = env.decode().unwrap();
        assert_eq!(fw.firmware, "0.29");
    }

    #[test]
    fn decode_raw_is_an_error() {
        let env = Envelope::Raw(Bytes::from_static(b"\xff\xd8\xff"));
        let err = env.decode::<Firmware>().unwrap_err();
        assert!(matches!(err, Error::Deserialization { .. }));
    }

    #[test]
    fn file_contents_per_variant() {
        let raw = Envelope::Raw(Bytes::from_static(b"jpeg"));
        assert_eq!(raw.into_file_contents(), Bytes::from_static(b"jpeg"));

        let json = Envelope::Decoded(json!(["/a.jpg"]));
        assert_eq!(json.into_file_contents(), Bytes::from_static(br#"["/a.jpg"]"#));

        assert!(Envelope::Ack(true).into_file_contents().is_empty());
    }

    #[test]
    fn accessors() {
        let env = Envelope::Ack(true);
        assert!(env.is_ack());
        assert!(env.as_json().is_none());
        assert!(env.as_bytes().is_none());
        assert!(!Envelope::Ack(false).is_ack());
    }
}
