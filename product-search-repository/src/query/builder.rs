//! Builds the ranking query for a product search.

use serde_json::{json, Value};

use crate::schema::fields;
use product_search_shared::SearchRequest;

/// Fuzziness sent with the per-field matches. `AUTO` scales allowed edits with term length.
pub const FUZZINESS: &str = "AUTO";

/// Fields searched with fuzzy matching, in clause order.
pub const FUZZY_FIELDS: [&str; 3] = [fields::PRODUCT_NAME, fields::DRUG_GENERIC, fields::COMPANY];

/// Boosts applied to the exact-phrase clause.
pub const PHRASE_BOOSTS: [(&str, u32); 3] = [
    (fields::PRODUCT_NAME, 3),
    (fields::DRUG_GENERIC, 2),
    (fields::COMPANY, 1),
];

/// A field reference with a relevance multiplier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoostedField {
    pub name: &'static str,
    pub boost: u32,
}

impl BoostedField {
    /// Render as `name^boost`, or bare `name` for a boost of 1.
    pub fn render(&self) -> String {
        if self.boost == 1 {
            self.name.to_string()
        } else {
            format!("{}^{}", self.name, self.boost)
        }
    }
}

/// One OR'd clause of the ranking query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryClause {
    /// Matches every document with no scoring bias.
    MatchAll,
    /// Fuzzy match of all query terms against one field.
    FuzzyMatch { field: &'static str, query: String },
    /// Exact phrase across several weighted fields.
    PhraseMultiMatch {
        fields: Vec<BoostedField>,
        query: String,
    },
}

impl QueryClause {
    fn to_json(&self) -> Value {
        match self {
            QueryClause::MatchAll => json!({ "match_all": {} }),
            QueryClause::FuzzyMatch { field, query } => {
                let mut options = serde_json::Map::new();
                options.insert(
                    field.to_string(),
                    json!({
                        "query": query,
                        "operator": "and",
                        "fuzziness": FUZZINESS
                    }),
                );
                json!({ "match": options })
            }
            QueryClause::PhraseMultiMatch { fields, query } => json!({
                "multi_match": {
                    "query": query,
                    "fields": fields.iter().map(BoostedField::render).collect::<Vec<_>>(),
                    "type": "phrase"
                }
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: &'static str,
    pub order: SortOrder,
}

/// Field name the engine uses for relevance.
pub const SCORE_FIELD: &str = "_score";

/// Deepest hit the engine will page to (`index.max_result_window`).
pub const MAX_RESULT_WINDOW: u64 = 10_000;

/// A fully specified search: clauses, page window, ordering and total tracking.
///
/// `clauses` holds either a single [`QueryClause::MatchAll`] or the OR'd ranking clauses,
/// of which at least one must match.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredQuery {
    pub clauses: Vec<QueryClause>,
    pub from: u64,
    pub size: u32,
    pub sort: Vec<SortKey>,
    pub track_total_hits: bool,
}

impl StructuredQuery {
    /// Returns true if this query matches every document.
    pub fn is_match_all(&self) -> bool {
        matches!(self.clauses.as_slice(), [QueryClause::MatchAll])
    }

    /// Keep the page window within the first `window` hits.
    ///
    /// A page starting at or past `window` becomes a count-only request (no hits, total
    /// still tracked); a page straddling it is shortened. The engine rejects either
    /// otherwise.
    pub fn within_result_window(mut self, window: u64) -> Self {
        if self.from >= window {
            self.from = 0;
            self.size = 0;
        } else if self.from + u64::from(self.size) > window {
            self.size = (window - self.from) as u32;
        }
        self
    }

    /// Render the engine request body.
    pub fn to_body(&self) -> Value {
        let query = if self.is_match_all() {
            QueryClause::MatchAll.to_json()
        } else {
            json!({
                "bool": {
                    "should": self.clauses.iter().map(QueryClause::to_json).collect::<Vec<_>>(),
                    "minimum_should_match": 1
                }
            })
        };

        let sort: Vec<Value> = self
            .sort
            .iter()
            .map(|key| {
                let mut entry = serde_json::Map::new();
                entry.insert(key.field.to_string(), json!({ "order": key.order.as_str() }));
                Value::Object(entry)
            })
            .collect();

        json!({
            "query": query,
            "from": self.from,
            "size": self.size,
            "track_total_hits": self.track_total_hits,
            "sort": sort
        })
    }
}

/// Build the ranking query for a normalized request.
///
/// Empty text matches everything. Otherwise four clauses are OR'd: a fuzzy match on each of
/// `product_name`, `drug_generic` and `company`, plus an exact phrase across all three
/// weighted 3/2/1. Results are ordered by score, ties broken by the keyword form of
/// `product_name` ascending, and the exact total is requested.
///
/// # Example
///
/// ```
/// use product_search_repository::query::build_query;
/// use product_search_shared::SearchRequest;
///
/// let query = build_query(&SearchRequest::new("aspirin", 2, 10).unwrap());
/// assert_eq!(query.clauses.len(), 4);
/// assert_eq!(query.from, 10);
/// ```
pub fn build_query(request: &SearchRequest) -> StructuredQuery {
    let text = request.query.trim();

    let clauses = if request.is_match_all() {
        vec![QueryClause::MatchAll]
    } else {
        let mut clauses: Vec<QueryClause> = FUZZY_FIELDS
            .iter()
            .map(|&field| QueryClause::FuzzyMatch {
                field,
                query: text.to_string(),
            })
            .collect();
        clauses.push(QueryClause::PhraseMultiMatch {
            fields: PHRASE_BOOSTS
                .iter()
                .map(|&(name, boost)| BoostedField { name, boost })
                .collect(),
            query: text.to_string(),
        });
        clauses
    };

    StructuredQuery {
        clauses,
        from: request.offset(),
        size: request.size,
        sort: vec![
            SortKey {
                field: SCORE_FIELD,
                order: SortOrder::Desc,
            },
            SortKey {
                field: fields::PRODUCT_NAME_KEYWORD,
                order: SortOrder::Asc,
            },
        ],
        track_total_hits: true,
    }
}
