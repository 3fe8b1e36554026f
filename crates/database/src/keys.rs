//! Typed keys over the flat string store.
//!
//! Each key pins a wire name and the encoding of its value. The wire names
//! match the records the site has always written, so existing data keeps
//! loading.

use crate::error::{DatabaseError, Result};
use crate::models::Inquiry;

/// A key in the store together with the type of value stored under it.
pub trait StoreKey {
    /// Wire name of the key.
    const NAME: &'static str;

    /// Decoded value type.
    type Value;

    /// Encode a value for storage.
    fn encode(value: &Self::Value) -> Result<String>;

    /// Decode a stored value.
    fn decode(raw: &str) -> Result<Self::Value>;
}

/// The ordered list of captured inquiries (JSON array).
#[derive(Debug, Clone, Copy)]
pub struct Inquiries;

impl StoreKey for Inquiries {
    const NAME: &'static str = "nactax_inquiries";
    type Value = Vec<Inquiry>;

    fn encode(value: &Self::Value) -> Result<String> {
        serde_json::to_string(value).map_err(|source| DatabaseError::Serialization {
            key: Self::NAME,
            source,
        })
    }

    fn decode(raw: &str) -> Result<Self::Value> {
        serde_json::from_str(raw).map_err(|source| DatabaseError::Serialization {
            key: Self::NAME,
            source,
        })
    }
}

/// Chat widget on/off flag, stored as the literal `"true"` or `"false"`.
#[derive(Debug, Clone, Copy)]
pub struct ChatEnabled;

impl StoreKey for ChatEnabled {
    const NAME: &'static str = "nactax_chat_enabled";
    type Value = bool;

    fn encode(value: &Self::Value) -> Result<String> {
        Ok(value.to_string())
    }

    fn decode(raw: &str) -> Result<Self::Value> {
        // Only an explicit "false" disables the widget.
        Ok(raw != "false")
    }
}

/// Chat system instruction, stored as free text.
#[derive(Debug, Clone, Copy)]
pub struct ChatPrompt;

impl StoreKey for ChatPrompt {
    const NAME: &'static str = "nactax_chat_prompt";
    type Value = String;

    fn encode(value: &Self::Value) -> Result<String> {
        Ok(value.clone())
    }

    fn decode(raw: &str) -> Result<Self::Value> {
        Ok(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_enabled_decoding() {
        assert!(!ChatEnabled::decode("false").unwrap());
        assert!(ChatEnabled::decode("true").unwrap());
        // Anything that is not the literal "false" counts as enabled.
        assert!(ChatEnabled::decode("").unwrap());
        assert!(ChatEnabled::decode("FALSE").unwrap());
    }

    #[test]
    fn test_chat_enabled_encoding() {
        assert_eq!(ChatEnabled::encode(&true).unwrap(), "true");
        assert_eq!(ChatEnabled::encode(&false).unwrap(), "false");
    }

    #[test]
    fn test_inquiries_decodes_site_records() {
        let raw = r#"[{"id":"1717171717171","name":"Ann","email":"ann@example.com","message":"Hi","date":"2024-05-31T16:08:37.171Z"}]"#;
        let list = Inquiries::decode(raw).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, "1717171717171");
        assert_eq!(list[0].name, "Ann");
    }

    #[test]
    fn test_inquiries_rejects_garbage() {
        let err = Inquiries::decode("not json").unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Serialization {
                key: "nactax_inquiries",
                ..
            }
        ));
    }
}
