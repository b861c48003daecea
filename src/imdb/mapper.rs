//! Pure field-mapping functions from raw upstream JSON to canonical
//! records. Every function is total: missing, renamed, or malformed
//! fields map to a default or to absent, never to an error.

use serde_json::Value;

use super::types::{MovieDetail, MovieSummary};

/// First string-or-number value among candidate keys, coerced to a string
fn string_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| coerce_string(value.get(*k)?))
}

fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First JSON number among candidate keys. Numeric strings do not count;
/// a numeric field is either a valid number or absent.
fn f64_field(value: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|k| value.get(*k)?.as_f64())
}

fn i64_field(value: &Value, keys: &[&str]) -> Option<i64> {
    keys.iter().find_map(|k| value.get(*k)?.as_i64())
}

fn i32_field(value: &Value, keys: &[&str]) -> Option<i32> {
    i64_field(value, keys).and_then(|n| i32::try_from(n).ok())
}

/// Year: `startYear` when numeric, else the leading year component of a
/// `releaseDate` date string such as `1999-03-31`.
fn year_field(value: &Value) -> Option<i32> {
    if let Some(year) = i32_field(value, &["startYear"]) {
        return Some(year);
    }

    match value.get("releaseDate") {
        Some(Value::Number(n)) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        Some(Value::String(s)) => s.split('-').next().and_then(|y| y.parse().ok()),
        _ => None,
    }
}

/// String entries of an array-valued key, absent when the key is not an array
fn string_list(value: &Value, key: &str) -> Option<Vec<String>> {
    let entries = value.get(key)?.as_array()?;
    Some(
        entries
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
    )
}

/// First array-shaped value among candidate keys, else the value itself
/// when it is an array, else empty.
pub fn array_field(value: &Value, keys: &[&str]) -> Vec<Value> {
    keys.iter()
        .find_map(|k| value.get(*k)?.as_array())
        .or_else(|| value.as_array())
        .cloned()
        .unwrap_or_default()
}

/// Map one upstream search-result element to a canonical summary
pub fn map_summary(item: &Value) -> MovieSummary {
    MovieSummary {
        id: string_field(item, &["id", "tconst"]).unwrap_or_default(),
        title: string_field(item, &["primaryTitle", "title"]).unwrap_or_default(),
        year: year_field(item),
        poster: string_field(item, &["primaryImage", "image"]),
        primary_image: string_field(item, &["primaryImage"]),
        description: string_field(item, &["description"]),
        genres: string_list(item, "genres"),
        average_rating: f64_field(item, &["averageRating"]),
        num_votes: i64_field(item, &["numVotes"]),
        runtime_minutes: i32_field(item, &["runtimeMinutes"]),
    }
}

/// Map an upstream detail payload. The requested id is the last fallback
/// for the mapped id; the detail endpoint also knows `name` and `plot`
/// as title/description aliases.
pub fn map_detail(item: &Value, requested_id: &str) -> MovieDetail {
    let summary = MovieSummary {
        id: string_field(item, &["id", "tconst"]).unwrap_or_else(|| requested_id.to_string()),
        title: string_field(item, &["primaryTitle", "title", "name"]).unwrap_or_default(),
        year: year_field(item),
        poster: string_field(item, &["primaryImage", "image"]),
        primary_image: string_field(item, &["primaryImage"]),
        description: string_field(item, &["description", "plot"]),
        genres: string_list(item, "genres"),
        average_rating: f64_field(item, &["averageRating"]),
        num_votes: i64_field(item, &["numVotes"]),
        runtime_minutes: i32_field(item, &["runtimeMinutes"]),
    };

    MovieDetail {
        summary,
        countries_of_origin: first_present(item, &["countriesOfOrigin", "country"]),
        production_companies: first_present(item, &["productionCompanies"]),
    }
}

/// First non-null value among candidate keys, passed through untyped
fn first_present(value: &Value, keys: &[&str]) -> Option<Value> {
    keys.iter()
        .find_map(|k| value.get(*k).filter(|v| !v.is_null()).cloned())
}

/// Map the upstream search result list, defaulting to empty when the
/// `results` field is absent or not an array
pub fn map_search_items(data: &Value) -> Vec<MovieSummary> {
    data.get("results")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(map_summary).collect())
        .unwrap_or_default()
}

/// Best-effort total: upstream-reported count, else the mapped item count
pub fn search_total(data: &Value, item_count: usize) -> i64 {
    i64_field(data, &["numFound", "total"]).unwrap_or(item_count as i64)
}

/// Opaque continuation cursor, passed through unmodified
pub fn search_cursor(data: &Value) -> Option<String> {
    data.get("cursorMark")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Single numeric rating with fallback between the two field names the
/// rating endpoint has been seen to use
pub fn map_rating(data: &Value) -> Option<f64> {
    f64_field(data, &["averageRating", "rating"])
}
