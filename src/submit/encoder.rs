//! Document wire encoding.

use crate::error::EncodeError;

use super::document::Document;

/// Converts a [`Document`] into its wire payload.
///
/// Encoding is pure and synchronous; it has no effect on the limiter.
pub trait DocumentEncoder: Send + Sync {
    /// Encode the document, or fail with an [`EncodeError`].
    fn encode(&self, document: &Document) -> Result<Vec<u8>, EncodeError>;
}

/// JSON encoder backed by `serde_json`.
pub struct JsonEncoder;

impl DocumentEncoder for JsonEncoder {
    fn encode(&self, document: &Document) -> Result<Vec<u8>, EncodeError> {
        Ok(serde_json::to_vec(document)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_encoder_produces_valid_json() {
        let body = JsonEncoder.encode(&Document::sample()).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["doc_id"], "doc_id_value");
    }
}
