use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    Result,
    client::{ImdbClient, Param},
    mapper,
    types::{DetailResult, RatingResult, SearchResult},
};

const SEARCH_PATH: &str = "/api/imdb/search";
const GENRES_PATH: &str = "/api/imdb/genres";
const TOP250_PATH: &str = "/api/imdb/top250-movies";

pub const DEFAULT_ROWS: u32 = 25;

/// Search sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Genre filter: a single genre or a list of genres
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenreFilter {
    One(String),
    Many(Vec<String>),
}

impl From<GenreFilter> for Param {
    fn from(filter: GenreFilter) -> Self {
        match filter {
            GenreFilter::One(genre) => Self::One(genre),
            GenreFilter::Many(genres) => Self::Many(genres),
        }
    }
}

/// Search options for the upstream search endpoint
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    /// Title autocomplete query
    pub q: Option<String>,
    /// Genre filter
    pub genre: Option<GenreFilter>,
    /// Result count, defaults to 25
    pub rows: Option<u32>,
    /// Earliest release year, inclusive
    pub start_year_from: Option<i32>,
    /// Latest release year, inclusive
    pub start_year_to: Option<i32>,
    /// Sort direction, defaults to ascending
    pub sort_order: Option<SortOrder>,
    /// Upstream sort field
    pub sort_field: Option<String>,
    /// Opaque continuation cursor from a previous result
    pub cursor_mark: Option<String>,
}

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    pub fn with_genre(mut self, genre: GenreFilter) -> Self {
        self.genre = Some(genre);
        self
    }

    pub fn with_rows(mut self, rows: u32) -> Self {
        self.rows = Some(rows);
        self
    }

    pub fn with_year_range(mut self, from: Option<i32>, to: Option<i32>) -> Self {
        self.start_year_from = from;
        self.start_year_to = to;
        self
    }

    pub fn with_sort(mut self, order: SortOrder, field: impl Into<String>) -> Self {
        self.sort_order = Some(order);
        self.sort_field = Some(field.into());
        self
    }

    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor_mark = Some(cursor.into());
        self
    }
}

/// Typed operations against the upstream movie API, one HTTP call each
#[derive(Clone)]
pub struct ImdbProvider {
    client: ImdbClient,
}

impl ImdbProvider {
    #[must_use]
    pub fn new(client: ImdbClient) -> Self {
        Self { client }
    }

    /// Search movies.
    ///
    /// Filters are passed through by name when present; a year bound of
    /// zero is sent like any other value.
    pub async fn search(&self, opts: &SearchParams) -> Result<SearchResult> {
        let mut params: Vec<(&str, Param)> = vec![
            ("type", "movie".into()),
            ("rows", opts.rows.unwrap_or(DEFAULT_ROWS).into()),
            ("sortOrder", opts.sort_order.unwrap_or_default().as_str().into()),
        ];

        if let Some(genre) = opts.genre.clone() {
            params.push(("genre", genre.into()));
        }
        if let Some(q) = &opts.q {
            params.push(("primaryTitleAutocomplete", q.clone().into()));
        }
        if let Some(from) = opts.start_year_from {
            params.push(("startYearFrom", from.into()));
        }
        if let Some(to) = opts.start_year_to {
            params.push(("startYearTo", to.into()));
        }
        if let Some(field) = &opts.sort_field {
            params.push(("sortField", field.clone().into()));
        }
        if let Some(cursor) = &opts.cursor_mark {
            params.push(("cursorMark", cursor.clone().into()));
        }

        let data = self.client.call(SEARCH_PATH, &params).await?;

        let items = mapper::map_search_items(&data);
        let total = mapper::search_total(&data, items.len());
        let cursor = mapper::search_cursor(&data);

        Ok(SearchResult {
            items,
            total,
            cursor,
            raw: data,
        })
    }

    /// Fetch a single movie by id
    pub async fn get_by_id(&self, id: &str) -> Result<DetailResult> {
        let path = format!("/api/imdb/{}", urlencoding::encode(id));
        let data = self.client.call(&path, &[]).await?;
        let detail = mapper::map_detail(&data, id);

        Ok(DetailResult { detail, raw: data })
    }

    /// Fetch the rating for a movie
    pub async fn get_rating(&self, id: &str) -> Result<RatingResult> {
        let path = format!("/api/imdb/{}/rating", urlencoding::encode(id));
        let data = self.client.call(&path, &[]).await?;
        let rating = mapper::map_rating(&data);

        Ok(RatingResult { rating, raw: data })
    }

    /// List the genres the upstream knows about
    pub async fn get_genres(&self) -> Result<Vec<String>> {
        let data = self.client.call(GENRES_PATH, &[]).await?;

        Ok(mapper::array_field(&data, &["genres"])
            .into_iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect())
    }

    /// Fetch the top-250 list, shape as returned upstream
    pub async fn get_top250(&self) -> Result<Vec<Value>> {
        let data = self.client.call(TOP250_PATH, &[]).await?;

        Ok(mapper::array_field(&data, &["items", "results"]))
    }
}
