//! Query construction and response mapping for product search.
//!
//! [`build_query`] turns a normalized `SearchRequest` into a `StructuredQuery`;
//! [`map_response`] turns the backend's raw answer back into typed hits.

mod builder;
mod mapper;

pub use builder::{
    build_query, BoostedField, QueryClause, SortKey, SortOrder, StructuredQuery, FUZZINESS,
    FUZZY_FIELDS, MAX_RESULT_WINDOW, PHRASE_BOOSTS, SCORE_FIELD,
};
pub use mapper::map_response;
