//! Registration document model.

use serde::{Deserialize, Serialize};

/// A document submitted for registration.
///
/// Field names serialize in snake_case, matching the registration API's wire
/// format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub participant_inn: String,
    pub doc_id: String,
    pub doc_status: String,
    pub doc_type: String,
    pub import_request: bool,
    pub owner_inn: String,
    pub producer_inn: String,
    pub production_date: String,
    pub production_type: String,
    pub products: Vec<Product>,
    pub reg_date: String,
    pub reg_number: String,
}

/// A product entry within a registration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub certificate_document: String,
    pub certificate_document_date: String,
    pub certificate_document_number: String,
    pub owner_inn: String,
    pub producer_inn: String,
    pub production_date: String,
    pub tnved_code: String,
    pub uit_code: String,
    pub uitu_code: String,
}

impl Document {
    /// A filled-in document for demos and tests.
    pub fn sample() -> Self {
        Self {
            participant_inn: "participant_inn_value".to_string(),
            doc_id: "doc_id_value".to_string(),
            doc_status: "doc_status_value".to_string(),
            doc_type: "LP_INTRODUCE_GOODS".to_string(),
            import_request: true,
            owner_inn: "owner_inn_value".to_string(),
            producer_inn: "producer_inn_value".to_string(),
            production_date: "2020-01-23".to_string(),
            production_type: "production_type_value".to_string(),
            products: vec![Product {
                certificate_document: "certificate_document_value".to_string(),
                certificate_document_date: "2020-01-23".to_string(),
                certificate_document_number: "certificate_document_number_value".to_string(),
                owner_inn: "owner_inn_value".to_string(),
                producer_inn: "producer_inn_value".to_string(),
                production_date: "2020-01-23".to_string(),
                tnved_code: "tnved_code_value".to_string(),
                uit_code: "uit_code_value".to_string(),
                uitu_code: "uitu_code_value".to_string(),
            }],
            reg_date: "2020-01-23".to_string(),
            reg_number: "reg_number_value".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_serializes_snake_case() {
        let json = serde_json::to_value(Document::sample()).unwrap();

        assert_eq!(json["doc_type"], "LP_INTRODUCE_GOODS");
        assert_eq!(json["import_request"], true);
        assert_eq!(json["products"][0]["tnved_code"], "tnved_code_value");
    }
}
