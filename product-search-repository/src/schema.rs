//! Index settings and mappings for the product index.
//!
//! The schema is an immutable value handed to whoever creates the index. Field names are
//! exported as constants so the query builder targets exactly what is mapped here.

use serde_json::{json, Value};

/// Default name of the product index.
pub const DEFAULT_INDEX_NAME: &str = "products";

/// Mapped field names.
pub mod fields {
    pub const ID: &str = "id";
    pub const PRODUCT_NAME: &str = "product_name";
    pub const DRUG_GENERIC: &str = "drug_generic";
    pub const COMPANY: &str = "company";
    pub const CREATED_AT: &str = "created_at";
    pub const UPDATED_AT: &str = "updated_at";

    /// Unanalyzed form of `product_name`, used for tie-break sorting.
    pub const PRODUCT_NAME_KEYWORD: &str = "product_name.keyword";
}

/// Analyzer applied at index time to the searchable text fields.
pub const INDEX_ANALYZER: &str = "ngram_token_analyzer";

/// Analyzer applied to query text for the searchable text fields.
pub const SEARCH_ANALYZER: &str = "search_term_analyzer";

/// Settings and mappings used when creating an index.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSchema {
    body: Value,
}

impl IndexSchema {
    /// Wrap an arbitrary settings/mappings body.
    ///
    /// Useful for tests and for pointing the pipeline at an alternate layout.
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    /// The product schema.
    ///
    /// The configuration includes:
    /// - **ngram_token_analyzer**: lowercase/asciifolded 2-3 character ngrams for partial matches
    /// - **search_term_analyzer**: standard tokens, lowercase, asciifolding for query text
    /// - **keyword subfields**: exact forms of each text field for sorting
    ///
    /// # Sharding Configuration
    ///
    /// - 1 primary shard
    /// - 1 replica for redundancy
    pub fn products() -> Self {
        let text_field = json!({
            "type": "text",
            "analyzer": INDEX_ANALYZER,
            "search_analyzer": SEARCH_ANALYZER,
            "fields": {
                "keyword": {
                    "type": "keyword",
                    "ignore_above": 256
                }
            }
        });

        Self::new(json!({
            "settings": {
                "number_of_shards": 1,
                "number_of_replicas": 1,
                "analysis": {
                    "tokenizer": {
                        "ngram_tokenizer": {
                            "type": "ngram",
                            "min_gram": 2,
                            "max_gram": 3,
                            "token_chars": ["letter", "digit"]
                        }
                    },
                    "analyzer": {
                        INDEX_ANALYZER: {
                            "type": "custom",
                            "tokenizer": "ngram_tokenizer",
                            "filter": ["lowercase", "asciifolding"]
                        },
                        SEARCH_ANALYZER: {
                            "type": "custom",
                            "tokenizer": "standard",
                            "filter": ["lowercase", "asciifolding"]
                        }
                    }
                }
            },
            "mappings": {
                "properties": {
                    "id": { "type": "keyword" },
                    "product_name": text_field.clone(),
                    "drug_generic": text_field.clone(),
                    "company": text_field,
                    "created_at": { "type": "date" },
                    "updated_at": { "type": "date" }
                }
            }
        }))
    }

    /// The request body sent on index creation.
    pub fn body(&self) -> &Value {
        &self.body
    }
}

impl Default for IndexSchema {
    fn default() -> Self {
        Self::products()
    }
}
