use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Chapter {
    pub id: String,
    pub title: String,
    pub release_date: String,
}

/// Chapter listed in a manga detail response. Ids are numeric and
/// grow with each release, titles are optional.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DetailedChapter {
    pub id: i64,
    pub title: Option<String>,
    pub release_date: String,
}

/// One image of a chapter, `page` is 1-based
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct PageImage {
    pub page: i64,
    pub img: String,
}
