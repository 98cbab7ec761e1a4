//! Maps a raw search response body into typed hits.

use serde_json::{Map, Value};
use tracing::warn;

use crate::errors::SearchIndexError;
use crate::schema::fields;
use product_search_shared::SearchHit;

/// Convert a raw search response into hits and the engine's total match count.
///
/// A missing or malformed total is an error rather than a silent zero, since pagination is
/// computed from it. Hits without a `_source` object are skipped; missing product fields
/// default to empty strings and a missing score to `0.0`. Store order is preserved.
///
/// # Returns
///
/// * `Ok((hits, total))` - The page of hits and the total number of matches
/// * `Err(SearchIndexError::InvalidResponse)` - If `hits`, its total, or its hit array is missing
pub fn map_response(raw: &Value) -> Result<(Vec<SearchHit>, u64), SearchIndexError> {
    let hits = raw
        .get("hits")
        .and_then(Value::as_object)
        .ok_or_else(|| SearchIndexError::invalid_response("invalid response format"))?;

    let total = extract_total(hits)
        .ok_or_else(|| SearchIndexError::invalid_response("invalid response format"))?;

    let items = hits
        .get("hits")
        .and_then(Value::as_array)
        .ok_or_else(|| SearchIndexError::invalid_response("invalid hits format"))?;

    let mut mapped = Vec::with_capacity(items.len());
    for (position, item) in items.iter().enumerate() {
        let Some(source) = item.get("_source").and_then(Value::as_object) else {
            let id = item.get("_id").and_then(Value::as_str).unwrap_or_default();
            warn!(
                position,
                id = %id,
                "Skipping search hit without a document body"
            );
            continue;
        };

        mapped.push(SearchHit {
            id: get_string(source, fields::ID),
            product_name: get_string(source, fields::PRODUCT_NAME),
            drug_generic: get_string(source, fields::DRUG_GENERIC),
            company: get_string(source, fields::COMPANY),
            score: item.get("_score").and_then(Value::as_f64).unwrap_or(0.0),
        });
    }

    Ok((mapped, total))
}

/// `hits.total` is `{"value": n, "relation": "eq"}` on current engines and a bare number on
/// older ones.
fn extract_total(hits: &Map<String, Value>) -> Option<u64> {
    match hits.get("total")? {
        Value::Object(total) => total.get("value").and_then(Value::as_u64),
        other => other.as_u64(),
    }
}

fn get_string(source: &Map<String, Value>, key: &str) -> String {
    source
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(total: Value, hits: Value) -> Value {
        json!({
            "took": 3,
            "timed_out": false,
            "hits": {
                "total": total,
                "max_score": 1.0,
                "hits": hits
            }
        })
    }

    #[test]
    fn test_map_full_hit() {
        let raw = response(
            json!({"value": 1, "relation": "eq"}),
            json!([{
                "_index": "products",
                "_id": "P-1",
                "_score": 4.2,
                "_source": {
                    "id": "P-1",
                    "product_name": "Aspirin 500mg",
                    "drug_generic": "acetylsalicylic acid",
                    "company": "Bayer",
                    "created_at": "2024-01-01T00:00:00Z",
                    "updated_at": "2024-01-01T00:00:00Z"
                }
            }]),
        );

        let (hits, total) = map_response(&raw).unwrap();
        assert_eq!(total, 1);
        assert_eq!(
            hits,
            vec![SearchHit {
                id: "P-1".to_string(),
                product_name: "Aspirin 500mg".to_string(),
                drug_generic: "acetylsalicylic acid".to_string(),
                company: "Bayer".to_string(),
                score: 4.2,
            }]
        );
    }

    #[test]
    fn test_total_may_exceed_returned_hits() {
        let raw = response(
            json!({"value": 250, "relation": "eq"}),
            json!([{"_score": 1.0, "_source": {"id": "a", "product_name": "A"}}]),
        );
        let (hits, total) = map_response(&raw).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(total, 250);
    }

    #[test]
    fn test_legacy_numeric_total() {
        let raw = response(json!(7), json!([]));
        let (hits, total) = map_response(&raw).unwrap();
        assert!(hits.is_empty());
        assert_eq!(total, 7);
    }

    #[test]
    fn test_missing_hits_is_error() {
        let err = map_response(&json!({"took": 1})).unwrap_err();
        assert!(matches!(err, SearchIndexError::InvalidResponse(ref m) if m == "invalid response format"));
    }

    #[test]
    fn test_missing_total_is_error() {
        let raw = json!({"hits": {"hits": []}});
        assert!(matches!(
            map_response(&raw).unwrap_err(),
            SearchIndexError::InvalidResponse(_)
        ));

        let raw = response(json!({"relation": "eq"}), json!([]));
        assert!(map_response(&raw).is_err());

        let raw = response(json!("many"), json!([]));
        assert!(map_response(&raw).is_err());
    }

    #[test]
    fn test_missing_hits_array_is_error() {
        let raw = json!({"hits": {"total": {"value": 0}}});
        let err = map_response(&raw).unwrap_err();
        assert!(matches!(err, SearchIndexError::InvalidResponse(ref m) if m == "invalid hits format"));
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let raw = response(
            json!({"value": 1}),
            json!([{"_score": 0.5, "_source": {"id": "P-9", "product_name": 12}}]),
        );
        let (hits, _) = map_response(&raw).unwrap();
        assert_eq!(hits[0].id, "P-9");
        assert_eq!(hits[0].product_name, "");
        assert_eq!(hits[0].drug_generic, "");
        assert_eq!(hits[0].company, "");
    }

    #[test]
    fn test_hits_without_source_are_skipped() {
        let raw = response(
            json!({"value": 3}),
            json!([
                {"_id": "a", "_score": 3.0, "_source": {"id": "a", "product_name": "A"}},
                {"_id": "b", "_score": 2.0},
                {"_id": "c", "_score": 1.0, "_source": {"id": "c", "product_name": "C"}}
            ]),
        );
        let (hits, total) = map_response(&raw).unwrap();
        assert_eq!(total, 3);
        let ids: Vec<_> = hits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_null_score_defaults_to_zero() {
        let raw = response(
            json!({"value": 1}),
            json!([{"_score": null, "_source": {"id": "a", "product_name": "A"}}]),
        );
        let (hits, _) = map_response(&raw).unwrap();
        assert_eq!(hits[0].score, 0.0);
    }

    #[test]
    fn test_store_order_is_preserved() {
        let raw = response(
            json!({"value": 3}),
            json!([
                {"_score": 2.0, "_source": {"id": "1", "product_name": "Aspirin A"}},
                {"_score": 2.0, "_source": {"id": "2", "product_name": "Aspirin B"}},
                {"_score": 5.0, "_source": {"id": "3", "product_name": "Aspirin C"}}
            ]),
        );
        let (hits, _) = map_response(&raw).unwrap();
        let names: Vec<_> = hits.iter().map(|h| h.product_name.as_str()).collect();
        assert_eq!(names, vec!["Aspirin A", "Aspirin B", "Aspirin C"]);
    }
}
