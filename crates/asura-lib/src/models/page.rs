use serde::{Deserialize, Serialize};

/// One page of a paginated listing
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MangaPage<T> {
    pub current_page: i64,
    pub has_next_page: bool,
    pub results: Vec<T>,
}

impl<T> MangaPage<T> {
    /// Page with no results and no next page, used when a listing can't be fetched
    pub fn empty(page: i64) -> Self {
        Self {
            current_page: page,
            has_next_page: false,
            results: vec![],
        }
    }
}
