//! Pagination query parameters shared by every list endpoint.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::Page;

fn default_limit() -> i64 {
    Page::DEFAULT_LIMIT
}

/// `skip`/`limit` query string accepted by list endpoints.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Number of leading rows to skip.
    #[serde(default)]
    pub skip: i64,
    /// Maximum number of rows to return.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl From<PageQuery> for Page {
    fn from(query: PageQuery) -> Self {
        Self::new(query.skip, query.limit)
    }
}
