use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized search-result entry.
///
/// Optional fields serialize as explicit `null` when the upstream omits
/// or renames them, so the front-end always sees the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieSummary {
    pub id: String,
    pub title: String,
    pub year: Option<i32>,
    pub poster: Option<String>,
    pub primary_image: Option<String>,
    pub description: Option<String>,
    pub genres: Option<Vec<String>>,
    pub average_rating: Option<f64>,
    pub num_votes: Option<i64>,
    pub runtime_minutes: Option<i32>,
}

/// Normalized single-movie record: the summary fields plus two
/// loosely-typed pass-through fields the detail endpoint may carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetail {
    #[serde(flatten)]
    pub summary: MovieSummary,
    pub countries_of_origin: Option<Value>,
    pub production_companies: Option<Value>,
}

/// Result of a search call, raw payload included for debugging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub items: Vec<MovieSummary>,
    pub total: i64,
    pub cursor: Option<String>,
    pub raw: Value,
}

/// Result of a rating lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingResult {
    pub rating: Option<f64>,
    pub raw: Value,
}

/// Result of a detail lookup, raw payload included for debugging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailResult {
    pub detail: MovieDetail,
    pub raw: Value,
}
