use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    routing::post,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use validator::Validate;

use crate::{
    ApiResponse, ApiResult, Ctx,
    error::ApiError,
    imdb::{DEFAULT_ROWS, GenreFilter, ImdbError, SearchParams, SortOrder},
};

/// Input schema for `movies.search`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchInput {
    /// Title autocomplete query
    pub q: Option<String>,
    /// Single genre or list of genres
    pub genre: Option<GenreFilter>,
    /// Result count, 1 to 100
    #[validate(range(min = 1, max = 100))]
    pub rows: u32,
    /// Earliest release year
    pub start_year_from: Option<i32>,
    /// Latest release year
    pub start_year_to: Option<i32>,
    /// Sort direction: ASC or DESC
    pub sort_order: SortOrder,
    /// Upstream sort field
    pub sort_field: String,
    /// Continuation cursor from a previous page
    pub cursor_mark: Option<String>,
}

impl Default for SearchInput {
    fn default() -> Self {
        Self {
            q: None,
            genre: None,
            rows: DEFAULT_ROWS,
            start_year_from: None,
            start_year_to: None,
            sort_order: SortOrder::default(),
            sort_field: "id".to_string(),
            cursor_mark: None,
        }
    }
}

impl From<SearchInput> for SearchParams {
    fn from(input: SearchInput) -> Self {
        Self {
            q: input.q,
            genre: input.genre,
            rows: Some(input.rows),
            start_year_from: input.start_year_from,
            start_year_to: input.start_year_to,
            sort_order: Some(input.sort_order),
            sort_field: Some(input.sort_field),
            cursor_mark: input.cursor_mark,
        }
    }
}

// ============ Handlers ============

/// Dispatch a named procedure call
/// POST /api/rpc/{procedure}
async fn call_procedure(
    State(ctx): State<Ctx>,
    Path(procedure): Path<String>,
    body: Bytes,
) -> ApiResult<Value> {
    // An absent body means "no input", matching a null input value
    let input = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::Validation(format!("Invalid input: {e}")))?
    };

    match procedure.as_str() {
        "movies.search" => search(&ctx, input).await,
        "movies.getById" => get_by_id(&ctx, input).await,
        "movies.getRating" => get_rating(&ctx, input).await,
        "movies.getGenres" => get_genres(&ctx, input).await,
        "movies.getTop250" => get_top250(&ctx, input).await,
        _ => Err(ApiError::NotFound(format!(
            "Unknown procedure: {procedure}"
        ))),
    }
}

/// Search movies by title, genre, and year range
async fn search(ctx: &Ctx, input: Value) -> ApiResult<Value> {
    let input: SearchInput = parse_input(input)?;

    let result = ctx
        .imdb
        .search(&input.into())
        .await
        .map_err(|e| bad_request("movies.search", e))?;

    respond("Search completed", result)
}

/// Fetch a single movie by id
async fn get_by_id(ctx: &Ctx, input: Value) -> ApiResult<Value> {
    let id = parse_id(input)?;

    let result = ctx
        .imdb
        .get_by_id(&id)
        .await
        .map_err(|e| not_found("movies.getById", e))?;

    respond("Movie retrieved", result)
}

/// Fetch a movie's rating
async fn get_rating(ctx: &Ctx, input: Value) -> ApiResult<Value> {
    let id = parse_id(input)?;

    let result = ctx
        .imdb
        .get_rating(&id)
        .await
        .map_err(|e| bad_request("movies.getRating", e))?;

    respond("Rating retrieved", result)
}

/// List available genres
async fn get_genres(ctx: &Ctx, input: Value) -> ApiResult<Value> {
    expect_no_input(&input)?;

    let genres = ctx
        .imdb
        .get_genres()
        .await
        .map_err(|e| bad_request("movies.getGenres", e))?;

    respond("Genres listed", genres)
}

/// Fetch the top-250 movie list
async fn get_top250(ctx: &Ctx, input: Value) -> ApiResult<Value> {
    expect_no_input(&input)?;

    let movies = ctx
        .imdb
        .get_top250()
        .await
        .map_err(|e| bad_request("movies.getTop250", e))?;

    respond("Top 250 retrieved", movies)
}

// ============ Helpers ============

/// Deserialize and validate a procedure input before any upstream call
fn parse_input<T: DeserializeOwned + Validate>(input: Value) -> Result<T, ApiError> {
    let parsed: T = serde_json::from_value(input)
        .map_err(|e| ApiError::Validation(format!("Invalid input: {e}")))?;

    parsed
        .validate()
        .map_err(|e| ApiError::Validation(format!("Invalid input: {e}")))?;

    Ok(parsed)
}

/// Id inputs are bare JSON strings and must be non-empty
fn parse_id(input: Value) -> Result<String, ApiError> {
    let id: String = serde_json::from_value(input)
        .map_err(|e| ApiError::Validation(format!("Invalid input: {e}")))?;

    if id.is_empty() {
        return Err(ApiError::Validation(
            "Invalid input: id must be a non-empty string".to_string(),
        ));
    }

    Ok(id)
}

fn expect_no_input(input: &Value) -> Result<(), ApiError> {
    if input.is_null() {
        Ok(())
    } else {
        Err(ApiError::Validation(
            "Invalid input: procedure takes no input".to_string(),
        ))
    }
}

/// Log the full component error, hand the client only the category and
/// the upstream-derived message
fn bad_request(procedure: &str, err: ImdbError) -> ApiError {
    tracing::warn!(procedure, error = ?err, "upstream call failed");
    ApiError::BadRequest(err.to_string())
}

fn not_found(procedure: &str, err: ImdbError) -> ApiError {
    tracing::warn!(procedure, error = ?err, "upstream call failed");
    ApiError::NotFound(err.to_string())
}

fn respond<T: Serialize>(message: &str, data: T) -> ApiResult<Value> {
    let data = serde_json::to_value(data)
        .map_err(|e| ApiError::Internal(format!("Response serialization failed: {e}")))?;

    Ok(Json(ApiResponse {
        code: 200,
        message: message.to_string(),
        data: Some(data),
    }))
}

/// Mount the procedure endpoint
pub fn mount() -> Router<Ctx> {
    Router::new().route("/rpc/{procedure}", post(call_procedure))
}

#[cfg(test)]
mod tests {
    use crate::{
        Ctx, app,
        imdb::{ImdbClient, ImdbProvider},
    };
    use axum::{
        body::Body,
        http::{Request, StatusCode, header::CONTENT_TYPE},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    fn test_ctx(server: &MockServer) -> Ctx {
        Ctx::new(ImdbProvider::new(
            ImdbClient::new("imdb.example.test", "test-key").base_url(server.uri()),
        ))
    }

    async fn rpc(ctx: Ctx, procedure: &str, input: Option<Value>) -> (StatusCode, Value) {
        let request = match input {
            Some(input) => Request::builder()
                .method("POST")
                .uri(format!("/api/rpc/{procedure}"))
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&input).unwrap()))
                .unwrap(),
            None => Request::builder()
                .method("POST")
                .uri(format!("/api/rpc/{procedure}"))
                .body(Body::empty())
                .unwrap(),
        };

        let response = app(ctx).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap();

        (status, body)
    }

    #[tokio::test]
    async fn test_search_rows_out_of_range_rejected_before_upstream() {
        let server = MockServer::start().await;

        // The stub must never be hit: validation happens first
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
            .expect(0)
            .mount(&server)
            .await;

        for rows in [0, 101] {
            let (status, body) =
                rpc(test_ctx(&server), "movies.search", Some(json!({"rows": rows}))).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body["message"].as_str().unwrap().contains("rows"));
            assert_eq!(body["data"], Value::Null);
        }
    }

    #[tokio::test]
    async fn test_search_accepts_genre_string_and_list() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/imdb/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
            .expect(2)
            .mount(&server)
            .await;

        let inputs = [
            json!({"genre": "Action"}),
            json!({"genre": ["Action", "Drama"]}),
        ];
        for input in inputs {
            let (status, _) = rpc(test_ctx(&server), "movies.search", Some(input)).await;
            assert_eq!(status, StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn test_search_returns_mapped_envelope() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/imdb/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"tconst": "tt1", "primaryTitle": "X"}],
                "numFound": 1
            })))
            .mount(&server)
            .await;

        let (status, body) = rpc(test_ctx(&server), "movies.search", Some(json!({}))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["code"], 200);
        assert_eq!(body["data"]["items"][0]["id"], "tt1");
        assert_eq!(body["data"]["total"], 1);
        assert_eq!(body["data"]["cursor"], Value::Null);
    }

    #[tokio::test]
    async fn test_get_by_id_surfaces_upstream_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/imdb/tt0"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "not found"})))
            .mount(&server)
            .await;

        let (status, body) = rpc(test_ctx(&server), "movies.getById", Some(json!("tt0"))).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["message"].as_str().unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn test_get_by_id_rejects_empty_id() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let (status, _) = rpc(test_ctx(&server), "movies.getById", Some(json!(""))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_rating_classifies_upstream_failure_as_bad_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/imdb/tt1/rating"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "upstream broke"})))
            .mount(&server)
            .await;

        let (status, body) = rpc(test_ctx(&server), "movies.getRating", Some(json!("tt1"))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("upstream broke"));
    }

    #[tokio::test]
    async fn test_get_genres_without_input() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/imdb/genres"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"genres": ["Action"]})))
            .mount(&server)
            .await;

        let (status, body) = rpc(test_ctx(&server), "movies.getGenres", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!(["Action"]));
    }

    #[tokio::test]
    async fn test_unknown_procedure_is_not_found() {
        let server = MockServer::start().await;

        let (status, body) = rpc(test_ctx(&server), "movies.doesNotExist", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["message"].as_str().unwrap().contains("movies.doesNotExist"));
    }
}
