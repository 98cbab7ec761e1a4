//! Product document types for the search index.
//!
//! This module defines the document structure that is indexed in the search engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a product record cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The identifier was empty after trimming.
    #[error("id is required")]
    MissingId,

    /// The product name was empty after trimming.
    #[error("product_name is required")]
    MissingProductName,
}

/// Document representation for the search index.
///
/// This struct represents a product as it is stored in the search engine. The `id`
/// doubles as the document identifier, so indexing the same record twice replaces the
/// earlier copy instead of adding a second one.
///
/// # Fields
///
/// - `id`: Unique identifier for the product (document id)
/// - `product_name`: Display name (primary search field)
/// - `drug_generic`: Generic drug name, empty when unknown (secondary search field)
/// - `company`: Manufacturer, empty when unknown
/// - `created_at` / `updated_at`: Timestamps stamped at ingestion time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRecord {
    pub id: String,
    pub product_name: String,
    #[serde(default)]
    pub drug_generic: String,
    #[serde(default)]
    pub company: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductRecord {
    /// Create a new record, trimming every field.
    ///
    /// Both timestamps are set to `stamped_at`.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for the product
    /// * `product_name` - The product display name
    /// * `drug_generic` - Generic name, may be empty
    /// * `company` - Manufacturer, may be empty
    /// * `stamped_at` - Ingestion time
    ///
    /// # Returns
    ///
    /// * `Ok(ProductRecord)` - If `id` and `product_name` are non-empty after trimming
    /// * `Err(RecordError)` - Otherwise
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::Utc;
    /// use product_search_shared::ProductRecord;
    ///
    /// let record = ProductRecord::new(" P-1 ", "Aspirin 500mg", "acetylsalicylic acid", "", Utc::now())
    ///     .expect("valid record");
    /// assert_eq!(record.id, "P-1");
    /// ```
    pub fn new(
        id: &str,
        product_name: &str,
        drug_generic: &str,
        company: &str,
        stamped_at: DateTime<Utc>,
    ) -> Result<Self, RecordError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(RecordError::MissingId);
        }
        let product_name = product_name.trim();
        if product_name.is_empty() {
            return Err(RecordError::MissingProductName);
        }

        Ok(Self {
            id: id.to_string(),
            product_name: product_name.to_string(),
            drug_generic: drug_generic.trim().to_string(),
            company: company.trim().to_string(),
            created_at: stamped_at,
            updated_at: stamped_at,
        })
    }

    /// The document ID used in the search index.
    pub fn document_id(&self) -> &str {
        &self.id
    }
}
